//! Field rules shared by the quiz builder and the quiz editor.
//!
//! Everything here is pure: callers run it before issuing a mutating
//! request and render the returned violations next to the offending fields.

use crate::error::{Issue, Violation};
use crate::models::quiz::{MetadataUpdate, NewQuiz, Question, OPTION_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Only the question text is required.
    Draft,
    /// Text, all four options and a correct answer pointing at a filled option.
    Publish,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate(question: &Question, mode: ValidationMode) -> Vec<Violation> {
    let mut violations = Vec::new();

    if is_blank(&question.question) {
        violations.push(Violation::new("question", Issue::Empty));
    }

    if mode == ValidationMode::Draft {
        return violations;
    }

    if question.options.len() != OPTION_COUNT {
        violations.push(Violation::new("options", Issue::WrongLength));
    }
    for (index, option) in question.options.iter().enumerate() {
        if is_blank(option) {
            violations.push(Violation::new(format!("options[{}]", index), Issue::Empty));
        }
    }

    let answer = question.correct_answer;
    if !(0..OPTION_COUNT as i32).contains(&answer) {
        violations.push(Violation::new("correctAnswer", Issue::OutOfRange));
    } else {
        match question.options.get(answer as usize) {
            Some(option) if !is_blank(option) => (),
            _ => violations.push(Violation::new("correctAnswer", Issue::EmptyChoice)),
        }
    }

    violations
}

pub fn validate_metadata(quiz: &NewQuiz) -> Vec<Violation> {
    let mut violations = Vec::new();

    if is_blank(&quiz.title) {
        violations.push(Violation::new("title", Issue::Empty));
    }
    if quiz.duration <= 0 {
        violations.push(Violation::new("duration", Issue::NotPositive));
    }
    if quiz.number_of_questions <= 0 {
        violations.push(Violation::new("numberOfQuestions", Issue::NotPositive));
    }
    if quiz.reward < 0 {
        violations.push(Violation::new("reward", Issue::Negative));
    }
    if quiz.max_participants <= 0 {
        violations.push(Violation::new("maxParticipants", Issue::NotPositive));
    }

    violations
}

/// Same rules as `validate_metadata`, applied only to the fields being changed.
pub fn validate_metadata_update(update: &MetadataUpdate) -> Vec<Violation> {
    let mut violations = Vec::new();

    if matches!(&update.title, Some(title) if is_blank(title)) {
        violations.push(Violation::new("title", Issue::Empty));
    }
    if matches!(update.duration, Some(duration) if duration <= 0) {
        violations.push(Violation::new("duration", Issue::NotPositive));
    }
    if matches!(update.reward, Some(reward) if reward < 0) {
        violations.push(Violation::new("reward", Issue::Negative));
    }
    if matches!(update.max_participants, Some(max) if max <= 0) {
        violations.push(Violation::new("maxParticipants", Issue::NotPositive));
    }

    violations
}

/// Validates every question of a creation payload, prefixing field names
/// with the question's position.
pub fn validate_questions(questions: &[Question], mode: ValidationMode) -> Vec<Violation> {
    questions
        .iter()
        .enumerate()
        .flat_map(|(index, question)| {
            validate(question, mode).into_iter().map(move |violation| Violation {
                field: format!("questions[{}].{}", index, violation.field),
                issue: violation.issue,
            })
        })
        .collect()
}
