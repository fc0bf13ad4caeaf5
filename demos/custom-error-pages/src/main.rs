use axum::Router;
use axum::extract::Path;
use axum::routing::get;
use faultline::config::FaultlineConfig;
use faultline::html::Html;
use faultline::json::Json;
use faultline::middleware::ErrorTranslationLayer;
use faultline::{
    ApiError, Error, StatusCode, StatusDescriptor, ViewError, impl_into_faultline_error,
};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("article `{0}` is still a draft")]
struct DraftArticle(String);
impl_into_faultline_error!(DraftArticle, NOT_FOUND);

async fn index() -> Html {
    Html::new(
        r#"<ul>
<li><a href="/api/users/1">existing user</a></li>
<li><a href="/api/users/2">missing user (JSON error)</a></li>
<li><a href="/admin">forbidden page (default error page)</a></li>
<li><a href="/articles/draft">draft article (redirect to custom 404)</a></li>
<li><a href="/broken">unhandled error</a></li>
</ul>"#,
    )
}

async fn user(Path(id): Path<u32>) -> faultline::Result<Json<Value>> {
    if id == 1 {
        return Ok(Json(json!({"id": 1, "name": "Ferris"})));
    }

    Err(ApiError::new(StatusDescriptor::NOT_FOUND)
        .with_message(format!("user {id} does not exist"))
        .with_data(json!({"id": id}))
        .into())
}

async fn admin() -> faultline::Result<Html> {
    Err(ViewError::new(StatusCode::FORBIDDEN)
        .with_message("administrators only")
        .into())
}

async fn article(Path(slug): Path<String>) -> faultline::Result<Html> {
    Err(DraftArticle(slug).into())
}

async fn broken() -> faultline::Result<Html> {
    Err(Error::new(std::io::Error::other("database file is locked")))
}

async fn custom_not_found() -> Html {
    Html::new("<h1>Nothing to see here</h1><p>This is a custom 404 page.</p>")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var_os("FAULTLINE_CONFIG") {
        Some(path) => FaultlineConfig::from_file(path)?,
        None => FaultlineConfig::from_toml(include_str!("../faultline.toml"))?,
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/api/users/{id}", get(user))
        .route("/admin", get(admin))
        .route("/articles/{slug}", get(article))
        .route("/broken", get(broken))
        .route("/custom-404", get(custom_not_found))
        .layer(ErrorTranslationLayer::from_config(&config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
