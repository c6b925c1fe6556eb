//! Bot difficulty tiers
//!
//! | Tier         | Period | Breadth | Threshold | Cadence |
//! |--------------|--------|---------|-----------|---------|
//! | novice       | 45     | 10      | 0.0       | random  |
//! | intermediate | 30     | 3       | 0.0       | random  |
//! | advanced     | 15     | 1       | 0.0       | random  |
//! | campaign     | 20     | 2       | 1.0       | fixed   |
//!
//! A bot considers moving roughly once per `period` ticks, and then picks
//! among the `breadth` best-scoring candidates whose score beats `threshold`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Novice,
    Intermediate,
    Advanced,
    Campaign,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Campaign,
    ];

    /// Average ticks between moves
    pub fn period(self) -> u64 {
        match self {
            Difficulty::Novice => 45,
            Difficulty::Intermediate => 30,
            Difficulty::Advanced => 15,
            Difficulty::Campaign => 20,
        }
    }

    /// How many of the best candidates are in the running
    pub fn breadth(self) -> usize {
        match self {
            Difficulty::Novice => 10,
            Difficulty::Intermediate => 3,
            Difficulty::Advanced => 1,
            Difficulty::Campaign => 2,
        }
    }

    /// Candidates must score above this to be considered at all
    pub fn threshold(self) -> f64 {
        match self {
            Difficulty::Campaign => 1.0,
            _ => 0.0,
        }
    }

    /// Whether the tier moves on a fixed beat instead of a random one
    pub fn fixed_cadence(self) -> bool {
        self == Difficulty::Campaign
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Novice => "novice",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Campaign => "campaign",
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| EngineError::UnknownDifficulty { tag: s.to_string() })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
