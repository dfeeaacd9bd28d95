use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use caretherapy_core_content_contracts::{ContentReadPostError, ContentService};
use caretherapy_models::content::PostSlug;

use super::{error, internal_server_error};
use crate::models::content::{ApiPost, ApiPostMetadata};

pub fn router(service: Arc<impl ContentService>) -> Router<()> {
    Router::new()
        .route("/posts", routing::get(list_posts))
        .route("/posts/:slug", routing::get(read_post))
        .with_state(service)
}

async fn list_posts(service: State<Arc<impl ContentService>>) -> Response {
    match service.list_posts().await {
        Ok(posts) => Json(
            posts
                .into_iter()
                .map(ApiPostMetadata::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn read_post(service: State<Arc<impl ContentService>>, Path(slug): Path<String>) -> Response {
    let Ok(slug) = PostSlug::try_new(slug) else {
        return error(StatusCode::NOT_FOUND, "Post not found");
    };

    match service.read_post(&slug).await {
        Ok(post) => Json(ApiPost::from(post)).into_response(),
        Err(ContentReadPostError::NotFound) => error(StatusCode::NOT_FOUND, "Post not found"),
        Err(ContentReadPostError::Other(err)) => internal_server_error(err),
    }
}
