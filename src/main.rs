use std::{env, error::Error, fs, path::Path, process, sync::Arc};

use log::{info, warn};
use quiz_admin::{
    api::{HttpQuizApi, QuizApi},
    config::Config,
    control::RequestControl,
    handlers::{
        auth_handler::{current_session, login, logout},
        builder_handler::{QuizBuilder, QuizField},
        editor_handler::QuizEditor,
        list_handler::{
            delete_quiz, fetch_quizzes, fetch_results, filter_quizzes, filter_results,
            format_taken_at,
        },
        Route,
    },
    jwtoken::Session,
    loggers::file_logger::init_file_logger,
    models::quiz::{NewQuiz, Question, Quiz, QuizSummary},
};

type CliResult = Result<(), Box<dyn Error>>;

const USAGE: &str = "usage: quiz-admin <command>

commands:
  login <email> <password>
  logout
  list [search]
  show <quiz-id>
  create <quiz.json>
  toggle <quiz-id>
  delete <quiz-id>
  add-question <quiz-id> <question.json>
  delete-question <quiz-id> <index>
  results [search]";

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(2);
        }
    };
    if let Err(error) = init_file_logger(&config) {
        eprintln!("File logger disabled: {}", error);
    }
    info!("quiz-admin started");

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(error) = run(&config, &args).await {
        warn!("Command {:?} failed: {}", args.first(), error);
        eprintln!("{}", error);
        process::exit(1);
    }
}

async fn run(config: &Config, args: &[String]) -> CliResult {
    let command = args.first().map(String::as_str).unwrap_or("help");
    let arg = |index: usize| required_arg(args, index);

    match command {
        "login" => {
            let (session, route) = login(config, arg(1)?, arg(2)?)?;
            println!("Logged in until {}", session.expires_at()?);
            debug_route(route);
            return Ok(());
        }
        "logout" => {
            debug_route(logout(config)?);
            println!("Logged out");
            return Ok(());
        }
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            return Ok(());
        }
        _ => (),
    }

    let session = current_session(config)?;
    let api: Arc<dyn QuizApi> = Arc::new(HttpQuizApi::new(config)?);

    match command {
        "list" => {
            let quizzes = fetch_quizzes(api.as_ref(), &session).await?;
            let term = args.get(1).map(String::as_str).unwrap_or("");
            print_quizzes(&filter_quizzes(&quizzes, term));
        }
        "show" => {
            let editor = QuizEditor::load(api, session, arg(1)?).await?;
            print_quiz(editor.quiz());
        }
        "create" => {
            let quiz: NewQuiz = read_json(Path::new(arg(1)?))?;
            create(api, session, quiz).await?;
        }
        "toggle" => {
            let mut editor = QuizEditor::load(api, session, arg(1)?).await?;
            let status = editor.toggle_status().await?;
            println!("Quiz {} is now {}", editor.id(), status);
        }
        "delete" => {
            let control = RequestControl::new();
            let quizzes = delete_quiz(api.as_ref(), &session, &control, arg(1)?).await?;
            println!("Deleted, {} quizzes left", quizzes.len());
        }
        "add-question" => {
            let question: Question = read_json(Path::new(arg(2)?))?;
            let mut editor = QuizEditor::load(api, session, arg(1)?).await?;
            editor.set_question_text(question.question);
            for (index, option) in question.options.into_iter().enumerate() {
                editor.set_option(index, option);
            }
            editor.set_correct_answer(question.correct_answer);
            editor.save_question().await?;
            print_quiz(editor.quiz());
        }
        "delete-question" => {
            let index: usize = arg(2)?.parse()?;
            let mut editor = QuizEditor::load(api, session, arg(1)?).await?;
            editor.delete_question(index).await?;
            print_quiz(editor.quiz());
        }
        "results" => {
            let results = fetch_results(api.as_ref(), &session).await?;
            let term = args.get(1).map(String::as_str).unwrap_or("");
            let filtered = filter_results(&results, term);
            println!("Total Results: {}", results.len());
            if !term.is_empty() {
                println!("Filtered Results: {}", filtered.len());
            }
            for result in filtered {
                println!(
                    "{}\t{}\t{}\t{}",
                    result.user,
                    result.quiz_title().unwrap_or("Unknown Quiz"),
                    result.score,
                    format_taken_at(result)
                );
            }
        }
        other => return Err(format!("unknown command {:?}\n\n{}", other, USAGE).into()),
    }

    Ok(())
}

/// Replays a quiz file through the builder, the same steps the form takes.
async fn create(api: Arc<dyn QuizApi>, session: Session, quiz: NewQuiz) -> CliResult {
    let mut builder = QuizBuilder::new(api, session);
    builder.set_field(QuizField::Title, quiz.title);
    builder.set_field(QuizField::Duration, quiz.duration.to_string());
    builder.set_field(QuizField::NumberOfQuestions, quiz.number_of_questions.to_string());
    builder.set_field(QuizField::Reward, quiz.reward.to_string());
    builder.set_field(QuizField::MaxParticipants, quiz.max_participants.to_string());

    for question in quiz.questions {
        builder.set_question_text(question.question);
        for (index, option) in question.options.into_iter().enumerate() {
            builder.set_option(index, option);
        }
        builder.set_correct_answer(question.correct_answer);
        if !builder.add_question() {
            let (added, target) = builder.progress();
            println!("Skipping extra question ({}/{:?})", added, target);
        }
    }

    let submitted = builder.submit().await.map_err(|failure| failure.error)?;
    println!(
        "Quiz created: {}",
        submitted.quiz.id.as_deref().unwrap_or("(no id returned)")
    );
    debug_route(submitted.route);
    Ok(())
}

fn required_arg(args: &[String], index: usize) -> Result<&str, Box<dyn Error>> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument\n\n{}", USAGE).into())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn debug_route(route: Route) {
    log::debug!("Next screen: {:?}", route);
}

fn print_quizzes(quizzes: &[&QuizSummary]) {
    for quiz in quizzes {
        println!(
            "{}\t{}\t{} min\t{}/{} questions\t{} points\t{}",
            quiz.id,
            quiz.title,
            quiz.duration,
            quiz.questions_added(),
            quiz.number_of_questions,
            quiz.reward,
            quiz.status
        );
    }
}

fn print_quiz(quiz: &Quiz) {
    println!(
        "{} [{}] {} min, reward {}, max {} participants",
        quiz.title, quiz.status, quiz.duration, quiz.reward, quiz.max_participants
    );
    for (index, question) in quiz.questions.iter().enumerate() {
        println!("Question {}: {}", index + 1, question.question);
        for (option_index, option) in question.options.iter().enumerate() {
            let marker = if option_index as i32 == question.correct_answer {
                "*"
            } else {
                " "
            };
            println!("  {} {}", marker, option);
        }
    }
}
