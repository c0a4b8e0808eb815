use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;

use crate::domain::Snapshot;
use crate::web::{render, WebState};

pub async fn index(State(state): State<WebState>) -> Html<String> {
    Html(render::index_page(&state.cache.read()))
}

pub async fn stories(State(state): State<WebState>) -> Json<Arc<Snapshot>> {
    Json(state.cache.read())
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
