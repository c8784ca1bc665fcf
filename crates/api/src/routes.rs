//! API Routes

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Routes under `/api/users`
fn user_routes() -> Router<AppState> {
    Router::new()
        // Lookups
        .route("/companies", get(handlers::list_companies))
        .route("/business-units", get(handlers::list_business_units))
        .route("/bu/class", get(handlers::business_units_for_class))
        .route("/bu/for-class", get(handlers::business_unit_for_class))
        .route("/classes", get(handlers::list_director_classes))
        .route("/classes/all", get(handlers::list_registered_classes))
        .route("/ntaccounts", get(handlers::list_directory_accounts))
        .route("/nt-accounts", get(handlers::list_directory_accounts))

        // Director search
        .route("/search/param", get(handlers::search_directors))
        .route("/search/all", get(handlers::list_all_directors))
        .route("/search/company", get(handlers::list_directors_for_company))

        // Writes
        .route("/add-director", post(handlers::add_director))
        .route("/update-nt", put(handlers::update_director_account))
        .route("/delete/bu", delete(handlers::delete_class_mapping))
        .route("/delete/row", delete(handlers::delete_director_association))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/users", user_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
