//! Progression engine: XP earned per logged set and the XP-to-level curve
//!
//! The curve is `floor(1000 * (level - 1)^1.8)` capped at [`MAX_LEVEL`]. The
//! thresholds are stored as integer constants so level boundaries never depend
//! on floating-point `powf` results.
//!
//! Everything here is pure: callers pass the current XP and level in and get
//! values back. Persistence lives in [`crate::ledger`].

use serde::{Deserialize, Serialize};

/// Highest reachable level. Level 10 is terminal until a reset.
pub const MAX_LEVEL: u32 = 10;

/// XP required to reach each level, indexed by `level - 1`.
pub const LEVEL_THRESHOLDS: [i64; MAX_LEVEL as usize] = [
    0, 1_000, 3_482, 7_224, 12_125, 18_119, 25_157, 33_202, 42_224, 52_195,
];

/// XP accumulated inside the current level band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// XP earned since reaching the current level
    pub current: i64,
    /// XP width of the current level band (0 at max level)
    pub needed: i64,
    /// Share of the band completed, 0..=100
    pub percentage: f64,
}

/// XP earned for a logged set: `floor(weight * reps * sets / 10)`.
///
/// Negative or non-finite weights earn nothing.
pub fn xp_earned(weight: f64, reps: u32, sets: u32) -> i64 {
    if !weight.is_finite() || weight <= 0.0 {
        return 0;
    }
    let raw = weight * f64::from(reps) * f64::from(sets) / 10.0;
    raw.floor() as i64
}

/// Total XP needed to reach `level`. Levels above [`MAX_LEVEL`] are clamped.
pub fn xp_required_for_level(level: u32) -> i64 {
    match level {
        0 | 1 => 0,
        _ => LEVEL_THRESHOLDS[(level.min(MAX_LEVEL) - 1) as usize],
    }
}

/// Highest level whose threshold `xp` meets.
pub fn level_for_xp(xp: i64) -> u32 {
    (1..=MAX_LEVEL)
        .rev()
        .find(|&level| xp >= xp_required_for_level(level))
        .unwrap_or(1)
}

/// Progress toward the next level.
///
/// At [`MAX_LEVEL`] the bar is always full with nothing left to earn.
pub fn progress(xp: i64, level: u32) -> Progress {
    let current = xp - xp_required_for_level(level);

    if level >= MAX_LEVEL {
        return Progress {
            current,
            needed: 0,
            percentage: 100.0,
        };
    }

    let needed = xp_required_for_level(level + 1) - xp_required_for_level(level);
    let percentage = if needed == 0 {
        100.0
    } else {
        (100.0 * current as f64 / needed as f64).clamp(0.0, 100.0)
    };

    Progress {
        current,
        needed,
        percentage,
    }
}
