use log::{info, warn};

use crate::api::QuizApi;
use crate::control::RequestControl;
use crate::error::QuizError;
use crate::helpers::matches_search;
use crate::jwtoken::Session;
use crate::models::quiz::QuizSummary;
use crate::models::result::QuizResult;

pub async fn fetch_quizzes(
    api: &dyn QuizApi,
    session: &Session,
) -> Result<Vec<QuizSummary>, QuizError> {
    let quizzes = api.list_quizzes(session).await.map_err(|error| {
        warn!("Error fetching quizzes: {}", error);
        error
    })?;
    info!("Fetched {} quizzes", quizzes.len());
    Ok(quizzes)
}

pub fn filter_quizzes<'a>(quizzes: &'a [QuizSummary], term: &str) -> Vec<&'a QuizSummary> {
    quizzes
        .iter()
        .filter(|quiz| matches_search(&quiz.title, term))
        .collect()
}

/// Flips one row's status and returns the refreshed list. The row stays
/// disabled until both requests settle.
pub async fn toggle_quiz_status(
    api: &dyn QuizApi,
    session: &Session,
    control: &RequestControl,
    quiz: &QuizSummary,
) -> Result<Vec<QuizSummary>, QuizError> {
    let target = quiz.status.flipped();
    control
        .run(async {
            api.update_status(session, &quiz.id, target).await?;
            info!("Quiz {} set to {}", quiz.id, target);
            fetch_quizzes(api, session).await
        })
        .await
}

pub async fn delete_quiz(
    api: &dyn QuizApi,
    session: &Session,
    control: &RequestControl,
    id: &str,
) -> Result<Vec<QuizSummary>, QuizError> {
    control
        .run(async {
            api.delete_quiz(session, id).await?;
            info!("Quiz {} deleted", id);
            fetch_quizzes(api, session).await
        })
        .await
}

pub async fn fetch_results(
    api: &dyn QuizApi,
    session: &Session,
) -> Result<Vec<QuizResult>, QuizError> {
    api.list_results(session).await
}

/// Matches on the participant id or on the quiz title.
pub fn filter_results<'a>(results: &'a [QuizResult], term: &str) -> Vec<&'a QuizResult> {
    results
        .iter()
        .filter(|result| {
            matches_search(&result.user, term)
                || result
                    .quiz_title()
                    .map_or(false, |title| matches_search(title, term))
        })
        .collect()
}

pub fn format_taken_at(result: &QuizResult) -> String {
    result.taken_at.format("%b %-d, %Y, %H:%M").to_string()
}
