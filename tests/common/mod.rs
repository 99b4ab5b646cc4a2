#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use quiz_admin::{
    api::QuizApi,
    error::QuizError,
    jwtoken::Session,
    models::{
        quiz::{MetadataUpdate, NewQuiz, Question, Quiz, QuizStatus, QuizSummary},
        result::{QuizLink, QuizRef, QuizResult},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListQuizzes,
    GetQuiz(String),
    CreateQuiz(NewQuiz),
    UpdateQuiz(String, MetadataUpdate),
    UpdateStatus(String, QuizStatus),
    DeleteQuiz(String),
    AddQuestion(String, Question),
    UpdateQuestion(String, usize, Question),
    DeleteQuestion(String, usize),
    ListResults,
}

/// In-memory stand-in for the quiz service with the same positional
/// question semantics.
#[derive(Default)]
pub struct MockQuizApi {
    quizzes: Mutex<HashMap<String, Quiz>>,
    results: Mutex<Vec<QuizResult>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<QuizError>>,
    gate: Mutex<Option<Arc<Notify>>>,
    next_id: Mutex<u32>,
}

impl MockQuizApi {
    pub fn new() -> Arc<MockQuizApi> {
        Arc::new(MockQuizApi::default())
    }

    pub fn insert(&self, quiz: Quiz) {
        let id = quiz.id.clone().expect("stored quiz needs an id");
        self.quizzes.lock().unwrap().insert(id, quiz);
    }

    pub fn stored(&self, id: &str) -> Option<Quiz> {
        self.quizzes.lock().unwrap().get(id).cloned()
    }

    pub fn push_result(&self, result: QuizResult) {
        self.results.lock().unwrap().push(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The next call fails with this error instead of touching the store.
    pub fn fail_next(&self, error: QuizError) {
        self.failures.lock().unwrap().push(error);
    }

    /// Every call waits on the returned notify before answering.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    /// Wakes the held calls and stops holding new ones.
    pub fn release(&self) {
        if let Some(gate) = self.gate.lock().unwrap().take() {
            gate.notify_waiters();
        }
    }

    async fn enter(&self, session: &Session, call: Call) -> Result<(), QuizError> {
        session.check()?;
        self.calls.lock().unwrap().push(call);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut failures = self.failures.lock().unwrap();
        if !failures.is_empty() {
            return Err(failures.remove(0));
        }
        Ok(())
    }

    fn with_quiz<T>(&self, id: &str, f: impl FnOnce(&mut Quiz) -> Result<T, QuizError>) -> Result<T, QuizError> {
        let mut quizzes = self.quizzes.lock().unwrap();
        match quizzes.get_mut(id) {
            Some(quiz) => f(quiz),
            None => Err(QuizError::NotFound {
                resource: format!("Quiz {}", id),
            }),
        }
    }
}

fn out_of_range() -> QuizError {
    QuizError::request(Some(400), "Invalid question index")
}

#[async_trait]
impl QuizApi for MockQuizApi {
    async fn list_quizzes(&self, session: &Session) -> Result<Vec<QuizSummary>, QuizError> {
        self.enter(session, Call::ListQuizzes).await?;
        let mut quizzes: Vec<QuizSummary> = self
            .quizzes
            .lock()
            .unwrap()
            .values()
            .map(|quiz| QuizSummary {
                id: quiz.id.clone().unwrap_or_default(),
                title: quiz.title.clone(),
                duration: quiz.duration,
                number_of_questions: quiz.number_of_questions,
                reward: quiz.reward,
                max_participants: quiz.max_participants,
                status: quiz.status,
                questions: quiz.questions.clone(),
            })
            .collect();
        quizzes.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(quizzes)
    }

    async fn get_quiz(&self, session: &Session, id: &str) -> Result<Quiz, QuizError> {
        self.enter(session, Call::GetQuiz(id.to_string())).await?;
        self.with_quiz(id, |quiz| Ok(quiz.clone()))
    }

    async fn create_quiz(&self, session: &Session, quiz: &NewQuiz) -> Result<Quiz, QuizError> {
        self.enter(session, Call::CreateQuiz(quiz.clone())).await?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("quiz-{}", next)
        };
        let created = Quiz {
            id: Some(id),
            title: quiz.title.clone(),
            duration: quiz.duration,
            number_of_questions: quiz.number_of_questions,
            reward: quiz.reward,
            max_participants: quiz.max_participants,
            status: QuizStatus::Active,
            questions: quiz.questions.clone(),
        };
        self.insert(created.clone());
        Ok(created)
    }

    async fn update_quiz(
        &self,
        session: &Session,
        id: &str,
        update: &MetadataUpdate,
    ) -> Result<(), QuizError> {
        self.enter(session, Call::UpdateQuiz(id.to_string(), update.clone()))
            .await?;
        self.with_quiz(id, |quiz| {
            if let Some(title) = &update.title {
                quiz.title = title.clone();
            }
            if let Some(duration) = update.duration {
                quiz.duration = duration;
            }
            if let Some(reward) = update.reward {
                quiz.reward = reward;
            }
            if let Some(max) = update.max_participants {
                quiz.max_participants = max;
            }
            Ok(())
        })
    }

    async fn update_status(
        &self,
        session: &Session,
        id: &str,
        status: QuizStatus,
    ) -> Result<(), QuizError> {
        self.enter(session, Call::UpdateStatus(id.to_string(), status))
            .await?;
        self.with_quiz(id, |quiz| {
            quiz.status = status;
            Ok(())
        })
    }

    async fn delete_quiz(&self, session: &Session, id: &str) -> Result<(), QuizError> {
        self.enter(session, Call::DeleteQuiz(id.to_string())).await?;
        match self.quizzes.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(QuizError::request(Some(404), "Quiz not found")),
        }
    }

    async fn add_question(
        &self,
        session: &Session,
        id: &str,
        question: &Question,
    ) -> Result<Quiz, QuizError> {
        self.enter(session, Call::AddQuestion(id.to_string(), question.clone()))
            .await?;
        self.with_quiz(id, |quiz| {
            quiz.questions.push(question.clone());
            Ok(quiz.clone())
        })
    }

    async fn update_question(
        &self,
        session: &Session,
        id: &str,
        index: usize,
        question: &Question,
    ) -> Result<Quiz, QuizError> {
        self.enter(
            session,
            Call::UpdateQuestion(id.to_string(), index, question.clone()),
        )
        .await?;
        self.with_quiz(id, |quiz| {
            let slot = quiz.questions.get_mut(index).ok_or_else(out_of_range)?;
            *slot = question.clone();
            Ok(quiz.clone())
        })
    }

    async fn delete_question(
        &self,
        session: &Session,
        id: &str,
        index: usize,
    ) -> Result<(), QuizError> {
        self.enter(session, Call::DeleteQuestion(id.to_string(), index))
            .await?;
        self.with_quiz(id, |quiz| {
            if index >= quiz.questions.len() {
                return Err(out_of_range());
            }
            quiz.questions.remove(index);
            Ok(())
        })
    }

    async fn list_results(&self, session: &Session) -> Result<Vec<QuizResult>, QuizError> {
        self.enter(session, Call::ListResults).await?;
        Ok(self.results.lock().unwrap().clone())
    }
}

pub fn session() -> Session {
    Session::issue("admin@example.com", "secret").unwrap()
}

pub fn question(text: &str) -> Question {
    Question {
        question: text.to_string(),
        options: ["a", "b", "c", "d"].iter().map(|o| format!("{} {}", text, o)).collect(),
        correct_answer: 0,
    }
}

pub fn quiz(id: &str, questions: &[&str]) -> Quiz {
    Quiz {
        id: Some(id.to_string()),
        title: format!("Quiz {}", id),
        duration: 15,
        number_of_questions: questions.len() as i32,
        reward: 100,
        max_participants: 50,
        status: QuizStatus::Active,
        questions: questions.iter().map(|text| question(text)).collect(),
    }
}

pub fn result(user: &str, quiz_title: &str, score: i32) -> QuizResult {
    QuizResult {
        id: format!("result-{}", user),
        user: user.to_string(),
        quiz_id: Some(QuizLink::Populated(QuizRef {
            id: Some("q1".to_string()),
            title: Some(quiz_title.to_string()),
        })),
        score,
        taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
    }
}

pub fn texts(quiz: &Quiz) -> Vec<&str> {
    quiz.questions.iter().map(|q| q.question.as_str()).collect()
}
