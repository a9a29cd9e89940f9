use serde::{Deserialize, Serialize};

pub const DANGER_THRESHOLD: u8 = 10;
pub const CAUTION_THRESHOLD: u8 = 5;

/// Qualitative reading of the total workload score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    Healthy,
    Caution,
    Danger,
}

impl HealthCategory {
    /// Thresholds are checked from the top; the first match wins.
    pub fn classify(total_score: u8) -> Self {
        if total_score >= DANGER_THRESHOLD {
            Self::Danger
        } else if total_score >= CAUTION_THRESHOLD {
            Self::Caution
        } else {
            Self::Healthy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Danger => "危険",
            Self::Caution => "要注意",
            Self::Healthy => "健全",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Danger => "労働負荷が非常に高く、業務改革が急務です。早急な対策が必要です。",
            Self::Caution => "一部に課題が見られます。早めの対策で改善できます。",
            Self::Healthy => "現状は良好です。継続的な改善で更なる成長を目指しましょう。",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Danger => "労働負荷が非常に高く、従業員の健康や離職リスクが懸念されます。業務の効率化や自動化、適切な人員配置の見直しが急務です。",
            Self::Caution => "一部の業務に負荷がかかっている可能性があります。属人化の解消や業務プロセスの見直しを検討しましょう。",
            Self::Healthy => "現状の業務負荷は適切に管理されているようです。継続的な改善で更なる効率化を図りましょう。",
        }
    }
}
