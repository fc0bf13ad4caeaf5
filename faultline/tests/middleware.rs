use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::response::Response;
use axum::routing::get;
use faultline::config::{ErrorPagesConfig, FaultlineConfig};
use faultline::html::Html;
use faultline::json::Json;
use faultline::middleware::ErrorTranslationLayer;
use faultline::render::{RenderError, ViewRenderer};
use faultline::{
    ApiError, Error, ErrorModel, StatusCode, StatusDescriptor, ViewError,
    impl_into_faultline_error,
};
use http::Request;
use http::header::{CONTENT_TYPE, LOCATION};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Debug, thiserror::Error)]
#[error("invoice {0} is not yours")]
struct ForeignInvoice(u64);
impl_into_faultline_error!(ForeignInvoice, FORBIDDEN);

async fn missing_field() -> faultline::Result<Json<Value>> {
    Err(ApiError::new(StatusDescriptor::BAD_REQUEST)
        .with_message("missing field")
        .into())
}

async fn user(Path(id): Path<u64>) -> faultline::Result<Json<Value>> {
    if id == 7 {
        return Ok(Json(json!({"id": 7, "name": "Ferris"})));
    }

    Err(ApiError::new(StatusDescriptor::SERVER_ERROR)
        .with_data(json!({"id": id}))
        .into())
}

async fn missing_page() -> faultline::Result<Html> {
    Err(ViewError::new(StatusCode::NOT_FOUND).with_message("").into())
}

async fn admin() -> faultline::Result<Html> {
    Err(ViewError::new(StatusCode::FORBIDDEN)
        .with_message("forbidden")
        .into())
}

async fn invoice() -> faultline::Result<Html> {
    Err(ForeignInvoice(42).into())
}

async fn broken() -> faultline::Result<Html> {
    Err(Error::new(std::io::Error::other("disk full")))
}

async fn home() -> faultline::Result<Html> {
    Ok(Html::new("<h1>Welcome</h1>"))
}

fn config() -> FaultlineConfig {
    FaultlineConfig::builder()
        .error_pages(ErrorPagesConfig::from_iter([(
            StatusCode::NOT_FOUND,
            "/custom-404",
        )]))
        .build()
}

fn layer() -> ErrorTranslationLayer {
    ErrorTranslationLayer::from_config(&config())
}

fn app(layer: ErrorTranslationLayer) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/missing-field", get(missing_field))
        .route("/api/users/{id}", get(user))
        .route("/missing", get(missing_page))
        .route("/admin", get(admin))
        .route("/invoice", get(invoice))
        .route("/broken", get(broken))
        .layer(layer)
}

async fn get_response(layer: ErrorTranslationLayer, uri: &str) -> Response {
    app(layer)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn api_error_becomes_json_result() {
    let response = get_response(layer(), "/api/missing-field").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        body_json(response).await,
        json!({
            "status": {"code": 400, "label": "BadRequest"},
            "data": null,
            "message": "missing field",
        })
    );
}

#[tokio::test]
async fn api_error_without_message_passes_data_through() {
    let response = get_response(layer(), "/api/users/3").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": {"code": 500, "label": "ServerError"},
            "data": {"id": 3},
            "message": "",
        })
    );
}

#[tokio::test]
async fn successful_response_is_untouched() {
    let response = get_response(layer(), "/api/users/7").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"id": 7, "name": "Ferris"}));

    let response = get_response(layer(), "/").await;
    assert_eq!(body_string(response).await, "<h1>Welcome</h1>");
}

#[tokio::test]
async fn view_error_redirects_to_custom_page() {
    let response = get_response(layer(), "/missing").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/custom-404");
}

#[tokio::test]
async fn view_error_renders_default_page() {
    let response = get_response(layer(), "/admin").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let body = body_string(response).await;
    assert!(body.contains("403"));
    assert!(body.contains("forbidden"));
    assert!(body.contains("ViewError"));
}

#[tokio::test]
async fn view_error_without_registry_renders_default_page() {
    let layer = ErrorTranslationLayer::from_config(&FaultlineConfig::default());

    let response = get_response(layer, "/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("No message available"));
}

#[tokio::test]
async fn domain_error_reports_its_own_type() {
    let response = get_response(layer(), "/invoice").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_string(response).await;
    assert!(body.contains("ForeignInvoice"));
    assert!(body.contains("invoice 42 is not yours"));
}

#[tokio::test]
async fn unclassified_error_keeps_default_response() {
    let response = get_response(layer(), "/broken").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(CONTENT_TYPE).is_none());
    assert_eq!(body_string(response).await, "");
}

#[derive(Debug)]
struct ModelRenderer;

impl ViewRenderer for ModelRenderer {
    fn render(&self, view_name: &str, model: &ErrorModel) -> Result<Html, RenderError> {
        let mut model = model.to_map();
        model.remove("timestamp");
        Ok(Html::new(format!("{view_name} {}", Value::Object(model))))
    }
}

#[tokio::test]
async fn custom_renderer_receives_model() {
    let layer = layer().with_renderer(ModelRenderer);

    let response = get_response(layer, "/admin").await;

    let body = body_string(response).await;
    let (view_name, model) = body.split_once(' ').unwrap();
    let model: Value = serde_json::from_str(model).unwrap();
    assert_eq!(view_name, "error");
    assert_eq!(model["status"], json!(403));
    assert_eq!(model["message"], json!("forbidden"));
    assert!(model["exception"].as_str().unwrap().ends_with("ViewError"));
}
