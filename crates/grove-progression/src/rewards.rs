//! Static reward tables.
//!
//! # Streak bonus
//!
//! | Streak (days) | Bonus points |
//! |---|---|
//! | >= 30 | 100 |
//! | >= 14 | 50 |
//! | >= 7 | 30 |
//! | >= 3 | 20 |
//! | >= 1 | 10 |
//!
//! # Intensity tiers
//!
//! | Day points | Tier |
//! |---|---|
//! | 0 | 0 |
//! | 1--50 | 1 |
//! | 51--100 | 2 |
//! | 101--200 | 3 |
//! | 201+ | 4 |

use grove_types::IntensityTier;

/// A row of the streak bonus table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakTier {
    /// Minimum streak length for this tier.
    pub min_streak: u32,
    /// Bonus points awarded for the day.
    pub bonus: u64,
}

/// Streak bonus tiers, highest first. The first matching row wins.
pub const STREAK_BONUS_TIERS: &[StreakTier] = &[
    StreakTier {
        min_streak: 30,
        bonus: 100,
    },
    StreakTier {
        min_streak: 14,
        bonus: 50,
    },
    StreakTier {
        min_streak: 7,
        bonus: 30,
    },
    StreakTier {
        min_streak: 3,
        bonus: 20,
    },
    StreakTier {
        min_streak: 1,
        bonus: 10,
    },
];

/// Upper bounds (inclusive) of tiers 1--3. Anything above the last bound is tier 4.
pub const INTENSITY_UPPER_BOUNDS: [(u64, IntensityTier); 3] = [
    (50, IntensityTier::Light),
    (100, IntensityTier::Moderate),
    (200, IntensityTier::Busy),
];

/// Bonus points for a streak of the given length.
///
/// A streak of 0 (never logged in) earns nothing.
pub fn streak_bonus(streak: u32) -> u64 {
    STREAK_BONUS_TIERS
        .iter()
        .find(|tier| streak >= tier.min_streak)
        .map_or(0, |tier| tier.bonus)
}

/// Classify a day's point total into a heatmap tier.
pub fn intensity_tier(points: u64) -> IntensityTier {
    if points == 0 {
        return IntensityTier::Idle;
    }
    INTENSITY_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| points <= *upper)
        .map_or(IntensityTier::Intense, |(_, tier)| *tier)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
