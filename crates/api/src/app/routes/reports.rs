use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/low-stock", get(low_stock))
        .route("/valuation", get(valuation))
}

/// Items at or under their reorder point, with the quantity needed to reach par.
pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.read(|c| dto::items_to_json(&c.low_stock(), c.currency())) {
        Ok(body) => Json(body).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn valuation(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.read(|c| dto::valuation_to_json(&c.valuation())) {
        Ok(body) => Json(body).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
