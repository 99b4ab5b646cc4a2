use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuizRef {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// `quizId` is populated with the quiz document when the server joins it,
/// and left as the bare id otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuizLink {
    Populated(QuizRef),
    Id(String),
}

/// A participant's score on one quiz, as listed by `GET /result`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub user: String,
    #[serde(default)]
    pub quiz_id: Option<QuizLink>,
    pub score: i32,
    pub taken_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn quiz_title(&self) -> Option<&str> {
        match &self.quiz_id {
            Some(QuizLink::Populated(quiz)) => quiz.title.as_deref(),
            Some(QuizLink::Id(_)) | None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_accept_both_quiz_id_shapes() {
        let raw = r#"[
            {"_id": "r1", "user": "alice", "quizId": {"_id": "65f0", "title": "Rust basics"},
             "score": 3, "takenAt": "2025-01-05T10:30:00Z"},
            {"_id": "r2", "user": "bob", "quizId": "65f0",
             "score": 1, "takenAt": "2025-01-05T11:00:00Z"},
            {"_id": "r3", "user": "carol", "quizId": null,
             "score": 2, "takenAt": "2025-01-05T12:00:00Z"}
        ]"#;

        let results: Vec<QuizResult> = serde_json::from_str(raw).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].quiz_title(), Some("Rust basics"));
        assert_eq!(results[1].quiz_id, Some(QuizLink::Id("65f0".to_string())));
        assert_eq!(results[1].quiz_title(), None);
        assert_eq!(results[2].quiz_title(), None);
    }
}
