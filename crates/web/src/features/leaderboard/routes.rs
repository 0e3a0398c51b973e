use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_category_ranking, get_leaderboard};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/:category", get(get_category_ranking))
}
