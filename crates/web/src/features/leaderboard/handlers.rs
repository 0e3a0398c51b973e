use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    dto::leaderboard::{CategoryInfo, CategoryLeaderboard, LeaderboardResponse},
    models::{Category, UnknownCategory},
};

use crate::error::{WebError, WebResult};

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Best times for every category and the full attempt log", body = LeaderboardResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(db): State<Database>) -> WebResult<Json<LeaderboardResponse>> {
    let leaderboard = services::get_leaderboard(db.pool()).await?;

    Ok(Json(leaderboard))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/{category}",
    params(
        ("category" = String, Path, description = "Category slug (e.g. men-17-49) or label")
    ),
    responses(
        (status = 200, description = "Best times within the category", body = CategoryLeaderboard),
        (status = 404, description = "Unknown category")
    ),
    tag = "leaderboard"
)]
pub async fn get_category_ranking(
    State(db): State<Database>,
    Path(category): Path<String>,
) -> WebResult<Json<CategoryLeaderboard>> {
    let category: Category = category
        .parse()
        .map_err(|e: UnknownCategory| WebError::NotFound(e.to_string()))?;

    let ranking = services::get_category_ranking(db.pool(), category).await?;

    Ok(Json(ranking))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "The eight race categories in display order", body = Vec<CategoryInfo>)
    ),
    tag = "leaderboard"
)]
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(Category::ALL.into_iter().map(CategoryInfo::from).collect())
}
