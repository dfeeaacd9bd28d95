use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use caretherapy_core_contact_contracts::{ContactService, ContactSubmitError};
use caretherapy_models::contact::ClientKey;

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactRequest, ApiContactResponse, ApiValidationError};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactService>>,
    client: Extension<ClientKey>,
    Json(request): Json<ApiContactRequest>,
) -> Response {
    match service.submit(request.into(), client.0.clone()).await {
        Ok(submission) => Json(ApiContactResponse::from(submission)).into_response(),
        Err(ContactSubmitError::Validation(details)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiValidationError::new(details)),
        )
            .into_response(),
        Err(ContactSubmitError::RateLimited) => error(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Please try again later.",
        ),
        Err(ContactSubmitError::VerificationFailed) => error(
            StatusCode::BAD_REQUEST,
            "Security verification failed. Please try again.",
        ),
        Err(ContactSubmitError::NotConfigured) => {
            tracing::error!("contact form submission rejected, missing configuration");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}
