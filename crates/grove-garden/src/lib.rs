//! Plant growth, fertilizer, and harvest rules for the Grove engine.
//!
//! Plants grow by receiving task completions, speed up with purchased
//! fertilizer, and pay out points when harvested at maturity. Neglected
//! plants can optionally wither.
//!
//! # Modules
//!
//! - [`config`] -- Growth and harvest tunables plus the plant and fertilizer catalogs
//! - [`plant`] -- The plant state machine: tending, maturing, harvesting, withering
//! - [`fertilizer`] -- Fertilizer purchase checks and application
//! - [`garden`] -- [`Garden`] registry of plants keyed by ID
//! - [`error`] -- [`GardenError`]

pub mod config;
pub mod error;
pub mod fertilizer;
pub mod garden;
pub mod plant;

pub use config::GardenConfig;
pub use error::GardenError;
pub use garden::Garden;
