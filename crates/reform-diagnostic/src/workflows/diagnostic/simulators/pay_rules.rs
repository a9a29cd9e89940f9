use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SimulatorInputError;

/// Two mutually exclusive pay rules; the comparison never blends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayRule {
    /// Base salary plus overtime pay.
    CurrentPayroll,
    /// Base salary plus a productivity bonus funded from saved cost.
    OutcomeSharing,
}

impl PayRule {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CurrentPayroll => "現状の給与規定",
            Self::OutcomeSharing => "成果配分ルール",
        }
    }

    fn allowance_label(&self) -> &'static str {
        match self {
            Self::CurrentPayroll => "残業代",
            Self::OutcomeSharing => "生産性手当",
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            Self::CurrentPayroll => "現状の問題点",
            Self::OutcomeSharing => "解決策",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Self::CurrentPayroll => "同じ成果を出しているのに、ダラダラ残業する人の方が給料が高くなる矛盾。これでは効率化を進めるインセンティブが働きません。",
            Self::OutcomeSharing => "「時間をかけた人」を評価する限り、会社から無駄作業はなくなりません。浮いたコストを還元する「仕組み」に変えるだけで、社員は自ら動き出します。",
        }
    }

    /// Pay for one employee under this rule.
    pub fn pay_for(&self, profile: &EmployeeProfile) -> EmployeePay {
        let (allowance, comment, evaluation) = match self {
            Self::CurrentPayroll => (profile.overtime_pay, profile.current_comment, None),
            Self::OutcomeSharing => (
                profile.productivity_bonus,
                profile.outcome_comment,
                Some(profile.outcome_evaluation),
            ),
        };

        EmployeePay {
            name: profile.name,
            work_hours: profile.work_hours,
            overtime_hours: profile.overtime_hours,
            sales: profile.sales,
            base_salary: profile.base_salary,
            allowance_label: self.allowance_label(),
            allowance,
            total_pay: profile.base_salary + allowance,
            comment,
            evaluation,
        }
    }

    pub fn compare(&self) -> PayRuleComparison {
        let employees = EmployeeProfile::comparison_pair()
            .iter()
            .map(|profile| self.pay_for(profile))
            .collect();

        PayRuleComparison {
            rule: *self,
            rule_label: self.label(),
            employees,
            headline: self.headline(),
            summary: self.summary(),
        }
    }
}

impl fmt::Display for PayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentPayroll => f.write_str("current_payroll"),
            Self::OutcomeSharing => f.write_str("outcome_sharing"),
        }
    }
}

impl FromStr for PayRule {
    type Err = SimulatorInputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "current_payroll" | "current" | "a" => Ok(Self::CurrentPayroll),
            "outcome_sharing" | "result" | "b" => Ok(Self::OutcomeSharing),
            _ => Err(SimulatorInputError::UnknownPayRule(value.to_string())),
        }
    }
}

/// Fixed employee archetype used by the comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub name: &'static str,
    pub work_hours: u8,
    pub overtime_hours: u8,
    pub sales: u64,
    pub base_salary: u64,
    pub overtime_pay: u64,
    pub productivity_bonus: u64,
    pub current_comment: &'static str,
    pub outcome_comment: &'static str,
    pub outcome_evaluation: &'static str,
}

impl EmployeeProfile {
    /// Long hours, paid overtime.
    pub const SWEAT_TYPE: EmployeeProfile = EmployeeProfile {
        name: "Aさん（汗かきタイプ）",
        work_hours: 10,
        overtime_hours: 2,
        sales: 1_000_000,
        base_salary: 200_000,
        overtime_pay: 50_000,
        productivity_bonus: 0,
        current_comment: "残業代で稼ぐぞ！",
        outcome_comment: "ヤバい、私もツール覚えなきゃ",
        outcome_evaluation: "効率化の指導対象",
    };

    /// Same sales in half the time.
    pub const SMART_TYPE: EmployeeProfile = EmployeeProfile {
        name: "Bさん（スマートタイプ）",
        work_hours: 5,
        overtime_hours: 0,
        sales: 1_000_000,
        base_salary: 200_000,
        overtime_pay: 0,
        productivity_bonus: 80_000,
        current_comment: "工夫して早く帰ると給料が減る...バカらしいから明日からゆっくりやろう",
        outcome_comment: "もっと効率化してボーナス増やすぞ！",
        outcome_evaluation: "最高評価！",
    };

    pub fn comparison_pair() -> [EmployeeProfile; 2] {
        [Self::SWEAT_TYPE, Self::SMART_TYPE]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeePay {
    pub name: &'static str,
    pub work_hours: u8,
    pub overtime_hours: u8,
    pub sales: u64,
    pub base_salary: u64,
    pub allowance_label: &'static str,
    pub allowance: u64,
    pub total_pay: u64,
    pub comment: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayRuleComparison {
    pub rule: PayRule,
    pub rule_label: &'static str,
    pub employees: Vec<EmployeePay>,
    pub headline: &'static str,
    pub summary: &'static str,
}

impl PayRuleComparison {
    /// Positive when the efficient employee out-earns the long-hours one.
    pub fn efficiency_premium(&self) -> i64 {
        match self.employees.as_slice() {
            [sweat, smart] => smart.total_pay as i64 - sweat.total_pay as i64,
            _ => 0,
        }
    }
}
