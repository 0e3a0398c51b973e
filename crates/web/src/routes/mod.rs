use axum::{Router, response::Redirect, routing::get};
use storage::Database;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{attempts, leaderboard};

pub fn router(db: Database) -> Router {
    let api = Router::new()
        .nest("/attempts", attempts::routes::routes())
        .nest("/leaderboard", leaderboard::routes::routes())
        .route("/categories", get(leaderboard::handlers::list_categories));

    Router::new()
        .route("/", get(|| async { Redirect::to("/api/leaderboard") }))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}
