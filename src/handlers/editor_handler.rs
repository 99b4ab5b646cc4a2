use std::{fmt, sync::Arc};

use log::{info, warn};

use super::Route;
use crate::api::QuizApi;
use crate::control::RequestControl;
use crate::error::{QuizError, ValidationError};
use crate::helpers::parse_optional_int;
use crate::jwtoken::Session;
use crate::models::quiz::{MetadataUpdate, QuestionDraft, Quiz, QuizStatus};
use crate::validator::{validate, validate_metadata_update, ValidationMode};

/// Raw metadata inputs. `None` leaves the field as it is on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataInput {
    pub title: Option<String>,
    pub duration: Option<String>,
    pub reward: Option<String>,
    pub max_participants: Option<String>,
}

impl MetadataInput {
    pub fn coerce(&self) -> Result<MetadataUpdate, ValidationError> {
        let update = MetadataUpdate {
            title: self.title.clone(),
            duration: parse_optional_int("duration", self.duration.as_deref())?,
            reward: parse_optional_int("reward", self.reward.as_deref())?,
            max_participants: parse_optional_int(
                "maxParticipants",
                self.max_participants.as_deref(),
            )?,
        };
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }

        let violations = validate_metadata_update(&update);
        if !violations.is_empty() {
            return Err(ValidationError::InvalidQuiz(violations));
        }
        Ok(update)
    }
}

fn fetch_failure(error: QuizError) -> QuizError {
    match error {
        QuizError::Request { message, .. } => QuizError::Fetch { message },
        other => other,
    }
}

/// Edits one existing quiz. The local copy is only ever replaced by what the
/// server sends back, never patched in place.
pub struct QuizEditor {
    api: Arc<dyn QuizApi>,
    session: Session,
    control: RequestControl,
    id: String,
    quiz: Quiz,
    current_question: QuestionDraft,
    editing_question_index: Option<usize>,
}

impl fmt::Debug for QuizEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEditor")
            .field("id", &self.id)
            .field("quiz", &self.quiz)
            .field("current_question", &self.current_question)
            .field("editing_question_index", &self.editing_question_index)
            .finish_non_exhaustive()
    }
}

impl QuizEditor {
    /// Fetches the quiz. Any failure here ends the session: the caller gets no
    /// editor and should follow `QuizError::route`.
    pub async fn load(
        api: Arc<dyn QuizApi>,
        session: Session,
        id: &str,
    ) -> Result<QuizEditor, QuizError> {
        QuizEditor::load_with_control(api, session, id, RequestControl::new()).await
    }

    /// Like `load`, with a control the caller already holds so it can dispose
    /// the editor while the first fetch is still running.
    pub async fn load_with_control(
        api: Arc<dyn QuizApi>,
        session: Session,
        id: &str,
        control: RequestControl,
    ) -> Result<QuizEditor, QuizError> {
        if id.trim().is_empty() {
            return Err(QuizError::Fetch {
                message: "Quiz ID is missing".to_string(),
            });
        }

        let quiz = control
            .run(async { api.get_quiz(&session, id).await.map_err(fetch_failure) })
            .await
            .map_err(|error| {
                warn!("Error fetching quiz {}: {}", id, error);
                error
            })?;
        info!("Loaded quiz {} with {} questions", id, quiz.questions.len());

        Ok(QuizEditor {
            api,
            session,
            control,
            id: id.to_string(),
            quiz,
            current_question: QuestionDraft::default(),
            editing_question_index: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn control(&self) -> RequestControl {
        self.control.clone()
    }

    pub fn current_question(&self) -> &QuestionDraft {
        &self.current_question
    }

    pub fn editing_question_index(&self) -> Option<usize> {
        self.editing_question_index
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

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        let len = self.quiz.questions.len();
        if index >= len {
            return Err(ValidationError::QuestionIndexOutOfRange { index, len });
        }
        Ok(())
    }

    pub fn start_editing_question(&mut self, index: usize) -> Result<(), QuizError> {
        self.check_index(index)?;
        self.current_question = QuestionDraft::from_question(&self.quiz.questions[index]);
        self.editing_question_index = Some(index);
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.current_question.clear();
        self.editing_question_index = None;
    }

    fn replace_quiz(&mut self, quiz: Quiz) {
        self.quiz = quiz;
        if matches!(self.editing_question_index, Some(index) if index >= self.quiz.questions.len()) {
            self.cancel_editing();
        }
    }

    /// Sends only the metadata fields; the question list stays whatever the
    /// server has. On success the caller leaves the editor.
    pub async fn update_metadata(&mut self, input: MetadataInput) -> Result<Route, QuizError> {
        let update = input.coerce()?;

        self.control
            .run(self.api.update_quiz(&self.session, &self.id, &update))
            .await?;
        info!("Quiz details updated for {}", self.id);

        Ok(Route::QuizList)
    }

    /// Appends the buffer as a new question, or overwrites the question being
    /// edited.
    pub async fn save_question(&mut self) -> Result<(), QuizError> {
        let question = self.current_question.to_question();
        let violations = validate(&question, ValidationMode::Publish);
        if !violations.is_empty() {
            return Err(ValidationError::InvalidQuestion(violations).into());
        }

        let quiz = match self.editing_question_index {
            Some(index) => {
                self.control
                    .run(
                        self.api
                            .update_question(&self.session, &self.id, index, &question),
                    )
                    .await?
            }
            None => {
                self.control
                    .run(self.api.add_question(&self.session, &self.id, &question))
                    .await?
            }
        };

        self.quiz = quiz;
        self.cancel_editing();
        info!(
            "Question saved on {}, now {} questions",
            self.id,
            self.quiz.questions.len()
        );
        Ok(())
    }

    /// Deletes by position, then fetches the quiz again since every later
    /// position has shifted.
    pub async fn delete_question(&mut self, index: usize) -> Result<(), QuizError> {
        self.check_index(index)?;

        let api = &self.api;
        let session = &self.session;
        let id = self.id.as_str();
        let quiz = self
            .control
            .run(async {
                api.delete_question(session, id, index).await?;
                api.get_quiz(session, id).await.map_err(fetch_failure)
            })
            .await?;

        self.editing_question_index = match self.editing_question_index {
            Some(editing) if editing == index => {
                self.current_question.clear();
                None
            }
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };
        self.replace_quiz(quiz);
        info!("Deleted question {} from {}", index, self.id);
        Ok(())
    }

    /// Flips between active and inactive and returns the status the server
    /// reports afterwards.
    pub async fn toggle_status(&mut self) -> Result<QuizStatus, QuizError> {
        let target = self.quiz.status.flipped();

        let api = &self.api;
        let session = &self.session;
        let id = self.id.as_str();
        let quiz = self
            .control
            .run(async {
                api.update_status(session, id, target).await?;
                api.get_quiz(session, id).await.map_err(fetch_failure)
            })
            .await?;

        self.replace_quiz(quiz);
        info!("Quiz {} is now {}", self.id, self.quiz.status);
        Ok(self.quiz.status)
    }

    pub async fn refresh(&mut self) -> Result<(), QuizError> {
        let quiz = self
            .control
            .run(async {
                self.api
                    .get_quiz(&self.session, &self.id)
                    .await
                    .map_err(fetch_failure)
            })
            .await?;
        self.replace_quiz(quiz);
        Ok(())
    }
}
