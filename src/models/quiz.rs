use std::fmt;

use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    #[default]
    Active,
    Inactive,
}

impl QuizStatus {
    pub fn flipped(self) -> QuizStatus {
        match self {
            QuizStatus::Active => QuizStatus::Inactive,
            QuizStatus::Inactive => QuizStatus::Active,
        }
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizStatus::Active => write!(f, "active"),
            QuizStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
}

/// Authoritative quiz document as the remote API returns it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub duration: i32,
    pub number_of_questions: i32,
    pub reward: i32,
    pub max_participants: i32,
    #[serde(default)]
    pub status: QuizStatus,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Creation payload. Carries no identifier and no status, the server assigns both.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub title: String,
    pub duration: i32,
    pub number_of_questions: i32,
    pub reward: i32,
    pub max_participants: i32,
    pub questions: Vec<Question>,
}

/// Metadata-only update. The question list is never part of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i32>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.duration.is_none()
            && self.reward.is_none()
            && self.max_participants.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub number_of_questions: i32,
    #[serde(default)]
    pub reward: i32,
    #[serde(default)]
    pub max_participants: i32,
    #[serde(default)]
    pub status: QuizStatus,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuizSummary {
    /// Questions actually on the quiz, as opposed to the declared target.
    pub fn questions_added(&self) -> usize {
        self.questions.len()
    }
}

/// In-progress question being composed in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: i32,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        QuestionDraft {
            question: String::new(),
            options: Default::default(),
            correct_answer: 0,
        }
    }
}

impl QuestionDraft {
    /// Copies an existing question into the buffer. Missing options are left
    /// empty and extra ones are dropped.
    pub fn from_question(question: &Question) -> QuestionDraft {
        let mut draft = QuestionDraft {
            question: question.question.clone(),
            correct_answer: question.correct_answer,
            ..Default::default()
        };
        for (slot, option) in draft.options.iter_mut().zip(question.options.iter()) {
            *slot = option.clone();
        }
        draft
    }

    pub fn to_question(&self) -> Question {
        Question {
            question: self.question.clone(),
            options: self.options.to_vec(),
            correct_answer: self.correct_answer,
        }
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        *self = QuestionDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_questions_added_apart_from_target() {
        let raw = r#"{
            "_id": "65f0",
            "title": "Rust basics",
            "numberOfQuestions": 3,
            "questions": [{"question": "Q", "options": ["a", "b", "c", "d"], "correctAnswer": 1}]
        }"#;

        let summary: QuizSummary = serde_json::from_str(raw).unwrap();

        assert_eq!(summary.number_of_questions, 3);
        assert_eq!(summary.questions_added(), 1);
    }

    #[test]
    fn quiz_reads_mongo_style_identifier() {
        let raw = r#"{
            "_id": "65f0",
            "title": "Rust basics",
            "duration": 10,
            "numberOfQuestions": 1,
            "reward": 50,
            "maxParticipants": 100,
            "status": "inactive",
            "questions": [
                {"question": "2+2?", "options": ["1", "2", "3", "4"], "correctAnswer": 3}
            ],
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let quiz: Quiz = serde_json::from_str(raw).unwrap();

        assert_eq!(quiz.id.as_deref(), Some("65f0"));
        assert_eq!(quiz.status, QuizStatus::Inactive);
        assert_eq!(quiz.questions[0].correct_answer, 3);
    }

    #[test]
    fn status_defaults_to_active() {
        let raw = r#"{"id": "1", "title": "t", "duration": 1, "numberOfQuestions": 1, "reward": 0, "maxParticipants": 1}"#;
        let quiz: Quiz = serde_json::from_str(raw).unwrap();

        assert_eq!(quiz.status, QuizStatus::Active);
        assert!(quiz.questions.is_empty());
    }

    #[test]
    fn metadata_update_omits_unset_fields() {
        let update = MetadataUpdate {
            title: Some("New".to_string()),
            reward: Some(20),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();

        assert_eq!(value, serde_json::json!({"title": "New", "reward": 20}));
    }

    #[test]
    fn draft_from_short_question_pads_options() {
        let question = Question {
            question: "q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_answer: 1,
        };
        let draft = QuestionDraft::from_question(&question);

        assert_eq!(draft.options, ["a", "b", "", ""].map(String::from));
        assert_eq!(draft.correct_answer, 1);
    }

    #[test]
    fn flipping_status_twice_is_identity() {
        assert_eq!(QuizStatus::Active.flipped(), QuizStatus::Inactive);
        assert_eq!(QuizStatus::Active.flipped().flipped(), QuizStatus::Active);
    }
}
