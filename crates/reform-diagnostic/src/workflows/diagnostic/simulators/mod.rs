//! Steps 2 and 3: incentive, pay-rule and ROI simulators.
//!
//! Every simulator is a pure function of its input; nothing is cached between calls.

pub mod evaluation;
pub mod pay_rules;
pub mod roi;

pub use evaluation::{
    simulate_incentive, ChallengeCount, IncentiveOutcome, MAX_CHALLENGE_COUNT,
    PROFIT_PER_CHALLENGE,
};
pub use pay_rules::{EmployeePay, EmployeeProfile, PayRule, PayRuleComparison};
pub use roi::{simulate_roi, Payback, RoiInput, RoiOutcome, MONTHLY_TEMPLATE_COST};

/// Rejected simulator input; the UI bounds normally prevent these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulatorInputError {
    #[error("challenge count must be between 0 and {max}, found {found}")]
    ChallengeCountOutOfRange { found: u32, max: u8 },
    #[error("employee count must be at least 1")]
    NoEmployees,
    #[error("wasted minutes per day must be a non-negative number, found {0}")]
    InvalidWasteMinutes(f64),
    #[error("hourly wage must be a non-negative number, found {0}")]
    InvalidHourlyWage(f64),
    #[error("inputs produce a loss too large to represent in yen")]
    LossOutOfRange,
    #[error("unknown pay rule '{0}'")]
    UnknownPayRule(String),
}
