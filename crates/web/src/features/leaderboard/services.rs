use sqlx::SqlitePool;
use storage::{
    dto::leaderboard::{CategoryLeaderboard, LeaderboardResponse},
    error::Result,
    models::Category,
    repository::attempt::AttemptRepository,
};

/// Get every category ranking plus the attempt log
pub async fn get_leaderboard(pool: &SqlitePool) -> Result<LeaderboardResponse> {
    let repo = AttemptRepository::new(pool);
    repo.leaderboard().await
}

/// Get the best-times ranking of a single category
pub async fn get_category_ranking(
    pool: &SqlitePool,
    category: Category,
) -> Result<CategoryLeaderboard> {
    let repo = AttemptRepository::new(pool);
    let entries = repo.best_times_by_category(category).await?;

    Ok(CategoryLeaderboard {
        category: category.into(),
        entries,
    })
}
