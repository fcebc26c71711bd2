use crate::error::QuizResult;
use crate::user::{ScoreRecord, User};

pub trait UserStore {
    fn add_user(&self, user: &User) -> QuizResult<String>;
    fn find_by_username(&self, username: &str) -> QuizResult<Option<User>>;
    fn user_count(&self) -> QuizResult<usize>;
}

pub trait ScoreStore {
    fn record_score(&self, record: &ScoreRecord) -> QuizResult<()>;

    /// History for one user, newest date first, best score first within a
    /// date.
    fn scores_for_user(&self, user_id: &str) -> QuizResult<Vec<ScoreRecord>>;
}
