use serde::{Deserialize, Serialize};

use super::SimulatorInputError;

/// Monthly price of the template package, in yen.
pub const MONTHLY_TEMPLATE_COST: i64 = 50_000;
pub const WORKING_DAYS_PER_YEAR: f64 = 250.0;
const MINUTES_PER_HOUR: f64 = 60.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const DAYS_PER_MONTH: f64 = 30.0;
// Largest annual loss that still converts to i64 without saturating.
const MAX_YEN: f64 = i64::MAX as f64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub employee_count: u32,
    pub waste_minutes_per_day: f64,
    pub hourly_wage: f64,
}

impl Default for RoiInput {
    fn default() -> Self {
        Self {
            employee_count: 10,
            waste_minutes_per_day: 30.0,
            hourly_wage: 1500.0,
        }
    }
}

impl RoiInput {
    pub fn validate(&self) -> Result<(), SimulatorInputError> {
        if self.employee_count == 0 {
            return Err(SimulatorInputError::NoEmployees);
        }
        if !self.waste_minutes_per_day.is_finite() || self.waste_minutes_per_day < 0.0 {
            return Err(SimulatorInputError::InvalidWasteMinutes(
                self.waste_minutes_per_day,
            ));
        }
        if !self.hourly_wage.is_finite() || self.hourly_wage < 0.0 {
            return Err(SimulatorInputError::InvalidHourlyWage(self.hourly_wage));
        }
        Ok(())
    }
}

/// Days until the template pays for itself, if it ever does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Payback {
    Days { days: u32 },
    NotRecoverable,
}

impl Payback {
    pub fn days(&self) -> Option<u32> {
        match self {
            Payback::Days { days } => Some(*days),
            Payback::NotRecoverable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiOutcome {
    pub daily_loss_per_person: f64,
    pub daily_loss_total: f64,
    /// Display values rounded to whole yen.
    pub daily_loss_per_person_yen: i64,
    pub daily_loss_total_yen: i64,
    pub annual_loss: i64,
    pub monthly_loss: i64,
    pub net_monthly_savings: i64,
    pub payback: Payback,
}

pub fn simulate_roi(input: &RoiInput) -> Result<RoiOutcome, SimulatorInputError> {
    input.validate()?;

    let daily_loss_per_person = (input.waste_minutes_per_day / MINUTES_PER_HOUR) * input.hourly_wage;
    let daily_loss_total = daily_loss_per_person * f64::from(input.employee_count);
    let annual_loss = (daily_loss_total * WORKING_DAYS_PER_YEAR).round();
    if !daily_loss_per_person.is_finite() || !annual_loss.is_finite() || annual_loss >= MAX_YEN {
        return Err(SimulatorInputError::LossOutOfRange);
    }
    let annual_loss = annual_loss as i64;
    let monthly_loss = (annual_loss as f64 / MONTHS_PER_YEAR).round() as i64;
    let net_monthly_savings = monthly_loss - MONTHLY_TEMPLATE_COST;

    Ok(RoiOutcome {
        daily_loss_per_person,
        daily_loss_total,
        daily_loss_per_person_yen: daily_loss_per_person.round() as i64,
        daily_loss_total_yen: daily_loss_total.round() as i64,
        annual_loss,
        monthly_loss,
        net_monthly_savings,
        payback: payback_for(net_monthly_savings),
    })
}

fn payback_for(net_monthly_savings: i64) -> Payback {
    if net_monthly_savings <= 0 {
        return Payback::NotRecoverable;
    }

    let daily_savings = net_monthly_savings as f64 / DAYS_PER_MONTH;
    let days = (MONTHLY_TEMPLATE_COST as f64 / daily_savings).ceil();
    Payback::Days {
        days: days.min(f64::from(u32::MAX)) as u32,
    }
}
