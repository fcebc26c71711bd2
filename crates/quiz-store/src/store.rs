use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use quiz_core::{QuizError, QuizResult, ScoreRecord, ScoreStore, Subject, User, UserStore};

use crate::schema::init_db;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(path: &Path) -> QuizResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| QuizError::Database(format!("cannot create db directory: {e}")))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| QuizError::Database(format!("cannot open database: {e}")))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| QuizError::Database(e.to_string()))?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> QuizResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| QuizError::Database(format!("cannot open in-memory db: {e}")))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| QuizError::Database(e.to_string()))?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let created_at_str: String = row.get(4)?;

    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        username: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

fn row_to_score(row: &rusqlite::Row) -> rusqlite::Result<ScoreRecord> {
    let date_str: String = row.get(1)?;
    let subject_str: String = row.get(2)?;

    Ok(ScoreRecord {
        user_id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive()),
        subject: subject_str.parse().unwrap_or(Subject::Surds),
        score: row.get(3)?,
    })
}

// ---------------------------------------------------------------------------
// UserStore impl
// ---------------------------------------------------------------------------

impl UserStore for SqliteStore {
    fn add_user(&self, user: &User) -> QuizResult<String> {
        self.conn
            .execute(
                "INSERT INTO users (id, name, username, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id,
                    user.name,
                    user.username,
                    user.password_hash,
                    user.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| QuizError::Database(e.to_string()))?;

        debug!(username = %user.username, "user registered");
        Ok(user.id.clone())
    }

    fn find_by_username(&self, username: &str) -> QuizResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, username, password_hash, created_at
                 FROM users WHERE username = ?1",
            )
            .map_err(|e| QuizError::Database(e.to_string()))?;

        let result = stmt
            .query_row(params![username], row_to_user)
            .optional()
            .map_err(|e| QuizError::Database(e.to_string()))?;

        Ok(result)
    }

    fn user_count(&self) -> QuizResult<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| {
                row.get::<_, usize>(0)
            })
            .map_err(|e| QuizError::Database(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ScoreStore impl
// ---------------------------------------------------------------------------

impl ScoreStore for SqliteStore {
    fn record_score(&self, record: &ScoreRecord) -> QuizResult<()> {
        self.conn
            .execute(
                "INSERT INTO scores (user_id, date, subject, score)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.user_id,
                    record.date.to_string(),
                    record.subject.to_string(),
                    record.score,
                ],
            )
            .map_err(|e| QuizError::Database(e.to_string()))?;

        debug!(user_id = %record.user_id, subject = %record.subject, score = record.score, "score recorded");
        Ok(())
    }

    fn scores_for_user(&self, user_id: &str) -> QuizResult<Vec<ScoreRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT user_id, date, subject, score FROM scores
                 WHERE user_id = ?1 ORDER BY date DESC, score DESC",
            )
            .map_err(|e| QuizError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], row_to_score)
            .map_err(|e| QuizError::Database(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| QuizError::Database(e.to_string()))?);
        }
        Ok(results)
    }
}
