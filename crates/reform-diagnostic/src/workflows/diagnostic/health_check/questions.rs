use serde::{Deserialize, Serialize};

/// Identifier wrapper for health-check questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u8);

/// One selectable answer and the load points it contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub label: &'static str,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn option(&self, index: usize) -> Option<&'static QuestionOption> {
        self.options.get(index)
    }

    pub fn max_score(&self) -> u8 {
        self.options
            .iter()
            .map(|option| option.score)
            .max()
            .unwrap_or(0)
    }
}

const fn option(label: &'static str, score: u8) -> QuestionOption {
    QuestionOption { label, score }
}

/// Hidden workload check shown in step 1.
pub const QUESTION_BANK: [Question; 6] = [
    Question {
        id: QuestionId(1),
        prompt: "売上目標達成には残業か増員が必要？",
        options: &[option("はい", 3), option("いいえ", 0)],
    },
    Question {
        id: QuestionId(2),
        prompt: "3年間採用ゼロでも回る？",
        options: &[option("厳しい", 3), option("なんとか", 1), option("余裕", 0)],
    },
    Question {
        id: QuestionId(3),
        prompt: "評価されるのは？",
        options: &[option("時間かけた人", 2), option("早く帰った人", 0)],
    },
    Question {
        id: QuestionId(4),
        prompt: "属人化業務は？",
        options: &[option("かなりある", 3), option("ある", 1), option("ない", 0)],
    },
    Question {
        id: QuestionId(5),
        prompt: "AIで無くしたい作業を即答できる？",
        options: &[option("できない", 2), option("だいたい", 1), option("明確", 0)],
    },
    Question {
        id: QuestionId(6),
        prompt: "過去のツールは文鎮化してる？",
        options: &[option("ある", 2), option("ない", 0)],
    },
];

pub fn question_bank() -> &'static [Question] {
    &QUESTION_BANK
}

pub fn find_question(id: QuestionId) -> Option<&'static Question> {
    QUESTION_BANK.iter().find(|question| question.id == id)
}

/// Highest total the bank can produce.
pub fn max_total_score() -> u8 {
    QUESTION_BANK.iter().map(Question::max_score).sum()
}
