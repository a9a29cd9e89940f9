use serde::{Deserialize, Serialize};

use super::SimulatorInputError;

pub const MAX_CHALLENGE_COUNT: u8 = 20;
pub const EVALUATION_POINTS_PER_CHALLENGE: f64 = 2.5;
pub const PROFIT_PER_CHALLENGE: u64 = 50_000;

/// Slider value for attempted initiatives, bounded to `0..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ChallengeCount(u8);

impl ChallengeCount {
    pub fn new(value: u32) -> Result<Self, SimulatorInputError> {
        if value > u32::from(MAX_CHALLENGE_COUNT) {
            return Err(SimulatorInputError::ChallengeCountOutOfRange {
                found: value,
                max: MAX_CHALLENGE_COUNT,
            });
        }
        Ok(Self(value as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for ChallengeCount {
    type Error = SimulatorInputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChallengeCount> for u32 {
    fn from(value: ChallengeCount) -> Self {
        u32::from(value.0)
    }
}

/// What a given number of challenges is worth to the employee and the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncentiveOutcome {
    pub challenge_count: u8,
    pub evaluation_score: u32,
    pub company_profit: u64,
}

pub fn simulate_incentive(challenges: ChallengeCount) -> IncentiveOutcome {
    let count = challenges.get();
    // Half-points round up; inputs are never negative.
    let evaluation_score = (f64::from(count) * EVALUATION_POINTS_PER_CHALLENGE).round() as u32;

    IncentiveOutcome {
        challenge_count: count,
        evaluation_score,
        company_profit: u64::from(count) * PROFIT_PER_CHALLENGE,
    }
}
