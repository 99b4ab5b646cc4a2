//! Transport seam between the quiz forms and the remote quiz service.

pub mod http;

use async_trait::async_trait;

use crate::error::QuizError;
use crate::jwtoken::Session;
use crate::models::quiz::{MetadataUpdate, NewQuiz, Question, Quiz, QuizStatus, QuizSummary};
use crate::models::result::QuizResult;

pub use http::HttpQuizApi;

/// Every call takes the session explicitly; implementations check it before
/// anything leaves the process.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn list_quizzes(&self, session: &Session) -> Result<Vec<QuizSummary>, QuizError>;

    async fn get_quiz(&self, session: &Session, id: &str) -> Result<Quiz, QuizError>;

    async fn create_quiz(&self, session: &Session, quiz: &NewQuiz) -> Result<Quiz, QuizError>;

    async fn update_quiz(
        &self,
        session: &Session,
        id: &str,
        update: &MetadataUpdate,
    ) -> Result<(), QuizError>;

    async fn update_status(
        &self,
        session: &Session,
        id: &str,
        status: QuizStatus,
    ) -> Result<(), QuizError>;

    async fn delete_quiz(&self, session: &Session, id: &str) -> Result<(), QuizError>;

    async fn add_question(
        &self,
        session: &Session,
        id: &str,
        question: &Question,
    ) -> Result<Quiz, QuizError>;

    async fn update_question(
        &self,
        session: &Session,
        id: &str,
        index: usize,
        question: &Question,
    ) -> Result<Quiz, QuizError>;

    async fn delete_question(&self, session: &Session, id: &str, index: usize)
        -> Result<(), QuizError>;

    async fn list_results(&self, session: &Session) -> Result<Vec<QuizResult>, QuizError>;
}
