use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{list_attempts, submit_attempt};

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(list_attempts).post(submit_attempt))
}
