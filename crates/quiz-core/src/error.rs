use thiserror::Error;

use crate::subject::Subject;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no valid {0} problem could be generated after {1} attempts")]
    Exhausted(Subject, u32),

    #[error("answer requested before the question was rendered")]
    NotRendered,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type QuizResult<T> = Result<T, QuizError>;
