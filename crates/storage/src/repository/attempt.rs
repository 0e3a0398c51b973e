use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use crate::dto::attempt::{AttemptResponse, format_race_time};
use crate::dto::leaderboard::{BestTimeEntry, CategoryLeaderboard, LeaderboardResponse};
use crate::error::{Result, StorageError};
use crate::models::{Attempt, Category, NewAttempt};

const ATTEMPT_COLUMNS: &str = "id, name, age, gender, discipline, category, run_name, date, \
     time_seconds, notes, created_at";

#[derive(FromRow)]
struct BestTimeRow {
    rank: i64,
    name: String,
    category: Category,
    run_name: String,
    best_time: f64,
}

impl From<BestTimeRow> for BestTimeEntry {
    fn from(row: BestTimeRow) -> Self {
        Self {
            rank: row.rank,
            name: row.name,
            category: row.category,
            run_name: row.run_name,
            formatted_time: format_race_time(row.best_time),
            best_time: row.best_time,
        }
    }
}

pub struct AttemptRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AttemptRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new attempt, stamping it with the current UTC time
    pub async fn insert(&self, attempt: &NewAttempt) -> Result<Attempt> {
        let sql = format!(
            r#"
            INSERT INTO attempts (
                name, age, gender, discipline, category, run_name, date,
                time_seconds, notes, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {ATTEMPT_COLUMNS}
            "#
        );

        let stored = sqlx::query_as::<_, Attempt>(&sql)
            .bind(attempt.name())
            .bind(attempt.age())
            .bind(attempt.gender())
            .bind(attempt.discipline())
            .bind(attempt.category())
            .bind(attempt.run_name())
            .bind(attempt.date())
            .bind(attempt.time_seconds())
            .bind(attempt.notes())
            .bind(Utc::now())
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).classify())?;

        tracing::debug!(
            id = stored.id,
            category = %stored.category,
            "Stored attempt for {}",
            stored.name
        );

        Ok(stored)
    }

    /// Best time per (name, run) within a category, fastest first.
    ///
    /// Equal best times are ordered by name, then run name.
    pub async fn best_times_by_category(&self, category: Category) -> Result<Vec<BestTimeEntry>> {
        let rows: Vec<BestTimeRow> = sqlx::query_as(
            r#"
            SELECT ROW_NUMBER() OVER (
                       ORDER BY MIN(time_seconds) ASC, name ASC, run_name ASC
                   ) AS rank,
                   name,
                   category,
                   run_name,
                   MIN(time_seconds) AS best_time
            FROM attempts
            WHERE category = ?
            GROUP BY name, category, run_name
            ORDER BY best_time ASC, name ASC, run_name ASC
            "#,
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(BestTimeEntry::from).collect())
    }

    /// Every attempt, oldest race day first and fastest first within a day
    pub async fn all_attempts(&self) -> Result<Vec<Attempt>> {
        let sql = format!(
            "SELECT {ATTEMPT_COLUMNS} FROM attempts ORDER BY date ASC, time_seconds ASC, id ASC"
        );

        let attempts = sqlx::query_as::<_, Attempt>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(attempts)
    }

    /// Rankings for all eight categories in display order, plus the attempt log
    pub async fn leaderboard(&self) -> Result<LeaderboardResponse> {
        let mut categories = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let entries = self.best_times_by_category(category).await?;
            categories.push(CategoryLeaderboard {
                category: category.into(),
                entries,
            });
        }

        let attempts = self
            .all_attempts()
            .await?
            .into_iter()
            .map(AttemptResponse::from)
            .collect();

        Ok(LeaderboardResponse {
            categories,
            attempts,
        })
    }
}
