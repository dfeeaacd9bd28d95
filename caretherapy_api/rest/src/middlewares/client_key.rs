//! Derive the rate limit key from the forwarded address of the client

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    Router,
};
use caretherapy_models::contact::ClientKey;

pub fn add<S: Clone + Send + Sync + 'static>(
    forwarded_ip_header: Arc<str>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    |router| {
        router.layer(from_fn(move |mut request: Request, next: Next| {
            let client_key = client_key(&request, &forwarded_ip_header);
            request.extensions_mut().insert(client_key);
            next.run(request)
        }))
    }
}

/// Takes the first element of the comma separated forwarded header. A
/// missing or empty header yields the shared `"unknown"` key.
fn client_key(request: &Request, forwarded_ip_header: &str) -> ClientKey {
    request
        .headers()
        .get(forwarded_ip_header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ClientKey::new)
        .unwrap_or_else(ClientKey::unknown)
}
