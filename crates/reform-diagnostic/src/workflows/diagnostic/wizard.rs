//! Four-step wizard modelled as an explicit state value and a pure reducer.

use serde::{Deserialize, Serialize};

use super::health_check::{DiagnosticResult, HealthCategory};

pub const STEP_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("step {0} is outside 1..=4")]
    OutOfRange(u8),
}

/// A wizard step, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(1);
    pub const LAST: Step = Step(STEP_COUNT);

    pub fn new(number: u8) -> Result<Self, StepError> {
        if (1..=STEP_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(StepError::OutOfRange(number))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn next(&self) -> Option<Step> {
        Step::new(self.0 + 1).ok()
    }

    pub fn prev(&self) -> Option<Step> {
        self.0.checked_sub(1).and_then(|n| Step::new(n).ok())
    }

    pub fn title(&self) -> &'static str {
        match self.0 {
            1 => "健康診断（隠れ労働負荷チェック）",
            2 => "評価シミュレーター",
            3 => "ROI（投資対効果）シミュレーター",
            _ => "発注オーダーシート",
        }
    }

    pub fn all() -> impl Iterator<Item = Step> {
        (1..=STEP_COUNT).map(Step)
    }
}

impl TryFrom<u8> for Step {
    type Error = StepError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Step::new(value)
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    Next,
    Prev,
    /// Step-indicator selection; never gated on quiz completion.
    JumpTo { step: Step },
    /// Passive indicator update driven by user attention; no scrolling.
    FocusChange { step: Step },
    HealthCheckCompleted { result: DiagnosticResult },
}

/// Observable side effect the presentation layer should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEffect {
    ScrollTo { step: Step },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    active_step: Step,
    #[serde(default)]
    carried_health: Option<DiagnosticResult>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            active_step: Step::FIRST,
            carried_health: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub state: WizardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<WizardEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub step: Step,
    pub title: &'static str,
    pub status: StepStatus,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_step(&self) -> Step {
        self.active_step
    }

    pub fn carried_health(&self) -> Option<&DiagnosticResult> {
        self.carried_health.as_ref()
    }

    pub fn carried_health_score(&self) -> Option<u8> {
        self.carried_health.map(|result| result.total_score())
    }

    pub fn carried_health_category(&self) -> Option<HealthCategory> {
        self.carried_health.map(|result| result.category())
    }

    /// Pure transition: returns the next state without touching `self`.
    pub fn transition(&self, event: WizardEvent) -> Transition {
        let mut next = *self;
        let effect = next.apply(event);
        Transition {
            state: next,
            effect,
        }
    }

    pub fn apply(&mut self, event: WizardEvent) -> Option<WizardEffect> {
        match event {
            WizardEvent::Next => self.navigate(self.active_step.next()),
            WizardEvent::Prev => self.navigate(self.active_step.prev()),
            WizardEvent::JumpTo { step } => self.navigate(Some(step)),
            WizardEvent::FocusChange { step } => {
                self.active_step = step;
                None
            }
            WizardEvent::HealthCheckCompleted { result } => {
                // Carried once per session; later completions are ignored.
                if self.carried_health.is_none() {
                    self.carried_health = Some(result);
                }
                None
            }
        }
    }

    fn navigate(&mut self, target: Option<Step>) -> Option<WizardEffect> {
        let step = target?;
        self.active_step = step;
        Some(WizardEffect::ScrollTo { step })
    }

    pub fn indicator(&self) -> Vec<StepIndicator> {
        Step::all()
            .map(|step| StepIndicator {
                step,
                title: step.title(),
                status: match step.cmp(&self.active_step) {
                    std::cmp::Ordering::Less => StepStatus::Completed,
                    std::cmp::Ordering::Equal => StepStatus::Current,
                    std::cmp::Ordering::Greater => StepStatus::Upcoming,
                },
            })
            .collect()
    }
}
