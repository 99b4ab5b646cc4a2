use std::fmt;

use thiserror::Error;

use crate::handlers::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    Empty,
    OutOfRange,
    WrongLength,
    NotPositive,
    Negative,
    EmptyChoice,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Issue::Empty => "must not be empty",
            Issue::OutOfRange => "must be between 0 and 3",
            Issue::WrongLength => "must have exactly 4 options",
            Issue::NotPositive => "must be a positive number",
            Issue::Negative => "must not be negative",
            Issue::EmptyChoice => "must point at a filled option",
        };
        f.write_str(text)
    }
}

/// One violated field, named the way the form names it (`options[2]`,
/// `questions[1].correctAnswer`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub issue: Issue,
}

impl Violation {
    pub fn new(field: impl Into<String>, issue: Issue) -> Violation {
        Violation {
            field: field.into(),
            issue,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.issue)
    }
}

struct Violations<'a>(&'a [Violation]);

impl fmt::Display for Violations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please add exactly {expected} questions before submitting ({actual} added).")]
    QuestionCountMismatch { expected: i32, actual: usize },
    #[error("Invalid question: {}", Violations(.0))]
    InvalidQuestion(Vec<Violation>),
    #[error("Invalid quiz: {}", Violations(.0))]
    InvalidQuiz(Vec<Violation>),
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Question {index} does not exist, the quiz has {len} questions")]
    QuestionIndexOutOfRange { index: usize, len: usize },
    #[error("Nothing to update, change at least one field")]
    NothingToUpdate,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationError::InvalidQuestion(violations) | ValidationError::InvalidQuiz(violations) => {
                violations
            }
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Please enter both email and password")]
    MissingCredentials,
    #[error("Not logged in")]
    Missing,
    #[error("Session expired, please log in again")]
    Expired,
    #[error("Session expiry falls outside the supported date range")]
    ExpiryOutOfRange,
    #[error("Invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("{message}")]
    Fetch { message: String },
    #[error("{message}")]
    Request { status: Option<u16>, message: String },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Another request is still in progress")]
    Busy,
    #[error("The view was closed before the response arrived")]
    Disposed,
}

impl QuizError {
    pub fn request(status: Option<u16>, message: impl Into<String>) -> QuizError {
        QuizError::Request {
            status,
            message: message.into(),
        }
    }

    /// Where the caller has to go after this error. Only errors that end the
    /// current editing session have a route.
    pub fn route(&self) -> Option<Route> {
        match self {
            QuizError::NotFound { .. } | QuizError::Fetch { .. } => Some(Route::QuizList),
            QuizError::Session(SessionError::Missing | SessionError::Expired) => Some(Route::Login),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, QuizError::Validation(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_message_names_target() {
        let error = ValidationError::QuestionCountMismatch {
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            error.to_string(),
            "Please add exactly 2 questions before submitting (1 added)."
        );
    }

    #[test]
    fn invalid_question_lists_every_field() {
        let error = ValidationError::InvalidQuestion(vec![
            Violation::new("question", Issue::Empty),
            Violation::new("options[3]", Issue::Empty),
        ]);
        assert_eq!(
            error.to_string(),
            "Invalid question: question must not be empty; options[3] must not be empty"
        );
        assert_eq!(error.violations().len(), 2);
    }

    #[test]
    fn terminal_errors_route_to_list() {
        let not_found = QuizError::NotFound {
            resource: "quiz 1".to_string(),
        };
        assert_eq!(not_found.route(), Some(Route::QuizList));
        assert_eq!(QuizError::request(Some(500), "boom").route(), None);
        assert_eq!(
            QuizError::from(SessionError::Expired).route(),
            Some(Route::Login)
        );
    }
}
