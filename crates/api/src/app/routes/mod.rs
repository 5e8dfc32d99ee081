use axum::{Router, routing::get};

pub mod catalog;
pub mod items;
pub mod reports;
pub mod system;

/// Router for every catalog endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/specialties", get(catalog::list_specialties))
        .route("/suppliers", get(catalog::list_suppliers))
        .nest("/items", items::router())
        .nest("/reports", reports::router())
}
