use std::{fmt, sync::Arc};

use log::{info, warn};
use thiserror::Error;

use super::Route;
use crate::api::QuizApi;
use crate::control::RequestControl;
use crate::error::{QuizError, ValidationError};
use crate::helpers::parse_int;
use crate::jwtoken::Session;
use crate::models::quiz::{NewQuiz, Question, QuestionDraft, Quiz};
use crate::validator::{validate_metadata, validate_questions, ValidationMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizField {
    Title,
    Duration,
    NumberOfQuestions,
    Reward,
    MaxParticipants,
}

/// Quiz fields exactly as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizForm {
    pub title: String,
    pub duration: String,
    pub number_of_questions: String,
    pub reward: String,
    pub max_participants: String,
}

impl Default for QuizForm {
    fn default() -> Self {
        QuizForm {
            title: String::new(),
            duration: "0".to_string(),
            number_of_questions: "0".to_string(),
            reward: "0".to_string(),
            max_participants: "0".to_string(),
        }
    }
}

impl QuizForm {
    fn slot(&mut self, field: QuizField) -> &mut String {
        match field {
            QuizField::Title => &mut self.title,
            QuizField::Duration => &mut self.duration,
            QuizField::NumberOfQuestions => &mut self.number_of_questions,
            QuizField::Reward => &mut self.reward,
            QuizField::MaxParticipants => &mut self.max_participants,
        }
    }
}

/// Collects a new quiz locally and creates it with a single request once the
/// declared number of questions has been added.
pub struct QuizBuilder {
    api: Arc<dyn QuizApi>,
    session: Session,
    control: RequestControl,
    form: QuizForm,
    questions: Vec<Question>,
    current_question: QuestionDraft,
}

impl fmt::Debug for QuizBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizBuilder")
            .field("form", &self.form)
            .field("questions", &self.questions)
            .field("current_question", &self.current_question)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Submitted {
    pub quiz: Quiz,
    pub route: Route,
}

/// A failed submit hands the untouched draft back so it can be retried.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SubmitError {
    pub builder: QuizBuilder,
    pub error: QuizError,
}

impl QuizBuilder {
    pub fn new(api: Arc<dyn QuizApi>, session: Session) -> QuizBuilder {
        QuizBuilder {
            api,
            session,
            control: RequestControl::new(),
            form: QuizForm::default(),
            questions: Vec::new(),
            current_question: QuestionDraft::default(),
        }
    }

    pub fn control(&self) -> RequestControl {
        self.control.clone()
    }

    pub fn form(&self) -> &QuizForm {
        &self.form
    }

    pub fn set_field(&mut self, field: QuizField, value: impl Into<String>) {
        *self.form.slot(field) = value.into();
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &QuestionDraft {
        &self.current_question
    }

    pub fn set_question_text(&mut self, text: impl Into<String>) {
        self.current_question.question = text.into();
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.current_question.set_option(index, value)
    }

    pub fn set_correct_answer(&mut self, index: i32) {
        self.current_question.correct_answer = index;
    }

    fn target(&self) -> Option<usize> {
        parse_int("numberOfQuestions", &self.form.number_of_questions)
            .ok()
            .and_then(|target| usize::try_from(target).ok())
    }

    /// Questions added so far and the declared target, if it parses.
    pub fn progress(&self) -> (usize, Option<usize>) {
        (self.questions.len(), self.target())
    }

    pub fn can_add_question(&self) -> bool {
        matches!(self.target(), Some(target) if self.questions.len() < target)
    }

    /// Appends the composition buffer as is. Does nothing once the declared
    /// count is reached.
    pub fn add_question(&mut self) -> bool {
        if !self.can_add_question() {
            return false;
        }
        let question = std::mem::take(&mut self.current_question).to_question();
        self.questions.push(question);
        true
    }

    /// Builds the creation payload, or says why it cannot be sent yet.
    pub fn payload(&self) -> Result<NewQuiz, ValidationError> {
        let quiz = NewQuiz {
            title: self.form.title.clone(),
            duration: parse_int("duration", &self.form.duration)?,
            number_of_questions: parse_int("numberOfQuestions", &self.form.number_of_questions)?,
            reward: parse_int("reward", &self.form.reward)?,
            max_participants: parse_int("maxParticipants", &self.form.max_participants)?,
            questions: self.questions.clone(),
        };

        let violations = validate_metadata(&quiz);
        if !violations.is_empty() {
            return Err(ValidationError::InvalidQuiz(violations));
        }
        if usize::try_from(quiz.number_of_questions).ok() != Some(quiz.questions.len()) {
            return Err(ValidationError::QuestionCountMismatch {
                expected: quiz.number_of_questions,
                actual: quiz.questions.len(),
            });
        }
        let violations = validate_questions(&quiz.questions, ValidationMode::Publish);
        if !violations.is_empty() {
            return Err(ValidationError::InvalidQuestion(violations));
        }

        Ok(quiz)
    }

    pub async fn submit(self) -> Result<Submitted, SubmitError> {
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(error) => {
                return Err(SubmitError {
                    builder: self,
                    error: error.into(),
                })
            }
        };

        info!(
            "Submitting quiz {:?} with {} questions",
            payload.title,
            payload.questions.len()
        );
        let result = self
            .control
            .run(self.api.create_quiz(&self.session, &payload))
            .await;

        match result {
            Ok(quiz) => Ok(Submitted {
                quiz,
                route: Route::QuizList,
            }),
            Err(error) => {
                warn!("Error creating quiz: {}", error);
                Err(SubmitError {
                    builder: self,
                    error,
                })
            }
        }
    }
}
