use std::path::{Path, PathBuf};

use log::info;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

const PATTERN: &str = "{d(%H:%M:%S)(utc)} {l} - {m}{n}";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("cannot open log file: {0}")]
    File(#[from] std::io::Error),
    #[error("invalid logger config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let current_date = chrono::offset::Utc::now().date_naive().to_string();
    log_dir.join(format!("{}.log", current_date))
}

/// One file per UTC day under `log_dir`, root level from the app config.
pub fn init_file_logger(config: &crate::config::Config) -> Result<(), LoggerError> {
    let path = log_file_path(&config.log_dir);

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(&path)?;

    let log_config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(config.log_level))?;

    log4rs::init_config(log_config)?;
    info!("File logger initialized at {}", path.display());

    Ok(())
}
