use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};

use medcat_core::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items))
        .route("/:id", get(get_item))
        .route("/:id/adjust", post(adjust_stock))
}

fn parse_item_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListItemsParams>,
) -> axum::response::Response {
    let query = match params.to_query() {
        Ok(q) => q,
        Err(resp) => return resp,
    };

    match services.read(|c| dto::items_to_json(&c.query(&query), c.currency())) {
        Ok(body) => Json(body).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let found = match services.read(|c| c.get(id).map(|item| dto::item_to_json(item, c.currency()))) {
        Ok(found) => found,
        Err(e) => return errors::service_error_to_response(e),
    };

    match found {
        Some(body) => Json(body).into_response(),
        None => errors::domain_error_to_response(medcat_core::DomainError::not_found()),
    }
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AdjustStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let result = services.write(|c| {
        let currency = c.currency();
        c.adjust_stock(id, body.delta)
            .map(|item| dto::item_to_json(item, currency))
    });

    match result {
        Ok(Ok(body)) => Json(body).into_response(),
        Ok(Err(e)) => errors::domain_error_to_response(e),
        Err(e) => errors::service_error_to_response(e),
    }
}
