use axum::{extract::Form, routing, Json, Router};
use caretherapy_extern_contracts::recaptcha::{RecaptchaApiService, RecaptchaSiteverifyResponse};
use caretherapy_extern_impl::recaptcha::{RecaptchaApiServiceConfig, RecaptchaApiServiceImpl};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const SECRET: &str = "test-secret";

#[tokio::test]
async fn success_score() {
    let sut = make_sut().await;
    let result = sut.siteverify("success-0.7", SECRET).await.unwrap();
    assert_eq!(
        result,
        RecaptchaSiteverifyResponse {
            success: true,
            score: Some(0.7),
            error_codes: vec![],
        }
    );
}

#[tokio::test]
async fn success_no_score() {
    let sut = make_sut().await;
    let result = sut.siteverify("success", SECRET).await.unwrap();
    assert_eq!(
        result,
        RecaptchaSiteverifyResponse {
            success: true,
            score: None,
            error_codes: vec![],
        }
    );
}

#[tokio::test]
async fn failure() {
    let sut = make_sut().await;
    let result = sut.siteverify("failure", SECRET).await.unwrap();
    assert_eq!(
        result,
        RecaptchaSiteverifyResponse {
            success: false,
            score: None,
            error_codes: vec!["invalid-input-response".into()],
        }
    );
}

#[tokio::test]
async fn transport_error() {
    // Nothing is listening on the overridden endpoint.
    let config =
        RecaptchaApiServiceConfig::new(Some("http://127.0.0.1:9/siteverify".parse().unwrap()));
    let sut = RecaptchaApiServiceImpl::new(config);
    sut.siteverify("success", SECRET).await.unwrap_err();
}

/// Starts a local stand-in for the siteverify endpoint and returns a client
/// pointed at it.
async fn make_sut() -> RecaptchaApiServiceImpl {
    let router = Router::new().route("/siteverify", routing::post(siteverify));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let endpoint = format!("http://{addr}/siteverify").parse().unwrap();
    RecaptchaApiServiceImpl::new(RecaptchaApiServiceConfig::new(Some(endpoint)))
}

#[derive(Deserialize)]
struct SiteverifyForm {
    response: String,
    secret: String,
}

async fn siteverify(Form(form): Form<SiteverifyForm>) -> Json<Value> {
    assert_eq!(form.secret, SECRET);
    Json(match form.response.as_str() {
        "success-0.7" => json!({ "success": true, "score": 0.7 }),
        "success" => json!({ "success": true }),
        _ => json!({ "success": false, "error-codes": ["invalid-input-response"] }),
    })
}
