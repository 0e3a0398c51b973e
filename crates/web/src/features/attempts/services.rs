use sqlx::SqlitePool;
use storage::{
    error::Result,
    models::{Attempt, NewAttempt},
    repository::attempt::AttemptRepository,
};

/// Store a validated attempt
pub async fn submit_attempt(pool: &SqlitePool, attempt: &NewAttempt) -> Result<Attempt> {
    let repo = AttemptRepository::new(pool);
    repo.insert(attempt).await
}

/// List every attempt in chronological order
pub async fn list_attempts(pool: &SqlitePool) -> Result<Vec<Attempt>> {
    let repo = AttemptRepository::new(pool);
    repo.all_attempts().await
}
