use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// A registered user. The password is stored as a hex digest, never in
/// the clear; hashing happens at the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, username: String, password_hash: String) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name,
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// One completed quiz: which subject, on what day, how many of the
/// questions were answered correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub subject: Subject,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(user_id: String, date: NaiveDate, subject: Subject, score: u32) -> Self {
        Self {
            user_id,
            date,
            subject,
            score,
        }
    }
}
