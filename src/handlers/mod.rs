pub mod auth_handler;
pub mod builder_handler;
pub mod editor_handler;
pub mod list_handler;

/// Screens a handler can send the user to once it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    QuizList,
}
