use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::QuizApi;
use crate::config::Config;
use crate::error::QuizError;
use crate::jwtoken::Session;
use crate::models::communication::{
    error_message, QuestionEnvelope, QuizEnvelope, QuizListResponse, StatusUpdate,
};
use crate::models::quiz::{MetadataUpdate, NewQuiz, Question, Quiz, QuizStatus, QuizSummary};
use crate::models::result::QuizResult;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// `QuizApi` over the service's JSON endpoints.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    base_url: String,
}

/// Turns a non-2xx answer into an error. A 404 only becomes `NotFound` when
/// the caller said which resource it was looking up.
pub fn status_error(
    status: u16,
    body: &str,
    not_found: Option<&str>,
    fallback: &str,
) -> QuizError {
    match not_found {
        Some(resource) if status == StatusCode::NOT_FOUND.as_u16() => QuizError::NotFound {
            resource: resource.to_string(),
        },
        _ => QuizError::request(
            Some(status),
            error_message(body).unwrap_or_else(|| fallback.to_string()),
        ),
    }
}

impl HttpQuizApi {
    pub fn new(config: &Config) -> Result<HttpQuizApi, QuizError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| QuizError::request(None, error.to_string()))?;

        Ok(HttpQuizApi {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(
        &self,
        session: &Session,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, QuizError> {
        session.check()?;

        let request_id = Uuid::new_v4().to_string();
        debug!("{} {} [{}]", method, path, request_id);

        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(session.token())
            .header(REQUEST_ID_HEADER, request_id))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        not_found: Option<&str>,
        fallback: &str,
    ) -> Result<Response, QuizError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                warn!("{}: {}", fallback, error);
                return Err(QuizError::request(None, fallback));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{}: status {} body {}", fallback, status, body);
        Err(status_error(status.as_u16(), &body, not_found, fallback))
    }

    async fn read<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, QuizError> {
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|error| {
            warn!("{}: unreadable response: {}", fallback, error);
            QuizError::request(Some(status), fallback)
        })
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn list_quizzes(&self, session: &Session) -> Result<Vec<QuizSummary>, QuizError> {
        let fallback = "Failed to fetch quizzes";
        let request = self.request(session, Method::GET, "/quiz")?;
        let response = self.send(request, None, fallback).await?;
        let list: QuizListResponse = Self::read(response, fallback).await?;
        Ok(list.quizzes)
    }

    async fn get_quiz(&self, session: &Session, id: &str) -> Result<Quiz, QuizError> {
        let fallback = "Failed to fetch quiz data. Please try again.";
        let resource = format!("Quiz {}", id);
        let request = self.request(session, Method::GET, &format!("/quiz/{}", id))?;
        let response = self.send(request, Some(&resource), fallback).await?;
        Self::read(response, fallback).await
    }

    async fn create_quiz(&self, session: &Session, quiz: &NewQuiz) -> Result<Quiz, QuizError> {
        let fallback = "Failed to create quiz";
        let request = self.request(session, Method::POST, "/quiz")?.json(quiz);
        let response = self.send(request, None, fallback).await?;
        let created: Quiz = Self::read(response, fallback).await?;
        info!("Quiz created: {:?}", created.id);
        Ok(created)
    }

    async fn update_quiz(
        &self,
        session: &Session,
        id: &str,
        update: &MetadataUpdate,
    ) -> Result<(), QuizError> {
        let request = self
            .request(session, Method::PUT, &format!("/quiz/{}", id))?
            .json(update);
        self.send(request, None, "Failed to update quiz details")
            .await?;
        Ok(())
    }

    async fn update_status(
        &self,
        session: &Session,
        id: &str,
        status: QuizStatus,
    ) -> Result<(), QuizError> {
        let request = self
            .request(session, Method::PATCH, &format!("/quiz/{}/status", id))?
            .json(&StatusUpdate { status });
        self.send(request, None, "Failed to update quiz status")
            .await?;
        Ok(())
    }

    async fn delete_quiz(&self, session: &Session, id: &str) -> Result<(), QuizError> {
        let request = self.request(session, Method::DELETE, &format!("/quiz/{}", id))?;
        self.send(request, None, "Failed to delete quiz").await?;
        Ok(())
    }

    async fn add_question(
        &self,
        session: &Session,
        id: &str,
        question: &Question,
    ) -> Result<Quiz, QuizError> {
        let fallback = "Failed to save question";
        let request = self
            .request(session, Method::POST, &format!("/quiz/{}/questions", id))?
            .json(&QuestionEnvelope { question });
        let response = self.send(request, None, fallback).await?;
        let envelope: QuizEnvelope = Self::read(response, fallback).await?;
        Ok(envelope.quiz)
    }

    async fn update_question(
        &self,
        session: &Session,
        id: &str,
        index: usize,
        question: &Question,
    ) -> Result<Quiz, QuizError> {
        let fallback = "Failed to save question";
        let request = self
            .request(
                session,
                Method::PUT,
                &format!("/quiz/{}/questions/{}", id, index),
            )?
            .json(question);
        let response = self.send(request, None, fallback).await?;
        let envelope: QuizEnvelope = Self::read(response, fallback).await?;
        Ok(envelope.quiz)
    }

    async fn delete_question(
        &self,
        session: &Session,
        id: &str,
        index: usize,
    ) -> Result<(), QuizError> {
        let request = self.request(
            session,
            Method::DELETE,
            &format!("/quiz/{}/questions/{}", id, index),
        )?;
        self.send(request, None, "Failed to delete question").await?;
        Ok(())
    }

    async fn list_results(&self, session: &Session) -> Result<Vec<QuizResult>, QuizError> {
        let fallback = "Failed to load quiz results. Please try again later.";
        let request = self.request(session, Method::GET, "/result")?;
        let response = self.send(request, None, fallback).await?;
        Self::read(response, fallback).await
    }
}
