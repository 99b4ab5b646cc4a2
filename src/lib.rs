pub mod api;
pub mod config;
pub mod control;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod jwtoken;
pub mod loggers;
pub mod models;
pub mod validator;
