use serde::Serialize;

pub mod contact;
pub mod content;

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
}
