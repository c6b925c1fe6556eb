//! Built-in campaign boards
//!
//! Campaign games start from a fixed layout against a bot. They have no
//! capture clock; instead they end in a draw when the human stops moving for
//! [`crate::constants::NO_MOVE_TIMEOUT_SECS`].

use crate::error::{EngineError, EngineResult};
use crate::types::Speed;

/// One campaign board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignLevel {
    pub speed: Speed,
    pub layout: &'static str,
}

/// White belt
pub const LEVELS: [CampaignLevel; 2] = [
    CampaignLevel {
        speed: Speed::Standard,
        layout: "
            00000000K2000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            P1P1P1P1P1P1P1P1
            R1N1B1Q1K1B1N1R1
        ",
    },
    CampaignLevel {
        speed: Speed::Standard,
        layout: "
            00000000K2000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            0000000000000000
            R10000Q1K10000R1
        ",
    },
];

/// Look up a level by index
pub fn level(level: usize) -> EngineResult<CampaignLevel> {
    LEVELS
        .get(level)
        .copied()
        .ok_or(EngineError::UnknownCampaignLevel {
            level,
            available: LEVELS.len(),
        })
}
