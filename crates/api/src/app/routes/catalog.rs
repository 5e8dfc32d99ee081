use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.read(|c| {
        c.categories()
            .into_iter()
            .map(|category| {
                serde_json::json!({
                    "category": category,
                    "items": c.by_category(category).len(),
                })
            })
            .collect::<Vec<_>>()
    }) {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_specialties(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.read(|c| {
        c.specialty_counts()
            .into_iter()
            .map(|(specialty, items)| {
                serde_json::json!({
                    "specialty": specialty.as_str(),
                    "items": items,
                })
            })
            .collect::<Vec<_>>()
    }) {
        Ok(specialties) => Json(specialties).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.read(|c| {
        c.suppliers()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
    }) {
        Ok(suppliers) => Json(suppliers).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
