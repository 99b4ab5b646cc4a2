use serde::{Deserialize, Serialize};

use super::quiz::{Question, Quiz, QuizStatus, QuizSummary};

#[derive(Serialize, Debug)]
pub struct QuestionEnvelope<'a> {
    pub question: &'a Question,
}

#[derive(Serialize, Debug)]
pub struct StatusUpdate {
    pub status: QuizStatus,
}

/// Question mutations answer with the whole quiz wrapped under `quiz`.
#[derive(Deserialize, Debug)]
pub struct QuizEnvelope {
    pub quiz: Quiz,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuizListResponse {
    #[serde(default)]
    pub quizzes: Vec<QuizSummary>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Pulls the server-provided `message` out of an error body, if there is one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}
