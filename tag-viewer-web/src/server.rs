//! Servidor Axum: recebe registros JSON e devolve anotações ou HTML renderizado.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tag_viewer_core::{sentences_to_annotated_texts, AnnotatedText, Record, ViewerConfig, ViewerError};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::render::{render_annotated, render_page};

/// Estado compartilhado da aplicação
pub struct AppState {
    pub config: ViewerConfig,
}

/// Erros devolvidos pelas rotas como `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Registro rejeitado pelo pipeline (desalinhamento, BIO inconsistente).
    Invalid(ViewerError),
    /// Falha ao gerar o HTML.
    Render(askama::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Invalid(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ApiError::Render(err) => {
                error!("falha ao renderizar: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ViewerError> for ApiError {
    fn from(err: ViewerError) -> Self {
        ApiError::Invalid(err)
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        ApiError::Render(err)
    }
}

const INDEX_FORM: &str = r#"<form id="viewer">
<textarea name="record">{"sentences":[{"content":["Alice","met","Bob"],"ner":["B-PER","O","B-PER"]}]}</textarea>
<button type="submit">Renderizar</button>
</form>
<div id="output"></div>
<script>
document.getElementById("viewer").addEventListener("submit", async (ev) => {
  ev.preventDefault();
  const body = ev.target.record.value;
  const res = await fetch("/render", { method: "POST", headers: { "Content-Type": "application/json" }, body });
  document.getElementById("output").innerHTML = await res.text();
});
</script>"#;

/// Monta o roteador com CORS e tracing de requisições.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/annotate", post(annotate_handler))
        .route("/render", post(render_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Liga o servidor em `addr` e atende até ser encerrado.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("servidor tag-viewer em http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Página com um formulário que envia o JSON para `/render`
async fn index_handler() -> Result<Html<String>, ApiError> {
    Ok(Html(render_page("tag-viewer", INDEX_FORM)?))
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Registro JSON → lista de textos anotados
async fn annotate_handler(
    State(state): State<Arc<AppState>>,
    Json(record): Json<Record>,
) -> Result<Json<Vec<AnnotatedText>>, ApiError> {
    let texts = sentences_to_annotated_texts(&record, &state.config)?;
    Ok(Json(texts))
}

/// Registro JSON → fragmento HTML
async fn render_handler(
    State(state): State<Arc<AppState>>,
    Json(record): Json<Record>,
) -> Result<Html<String>, ApiError> {
    let texts = sentences_to_annotated_texts(&record, &state.config)?;
    info!(sentences = texts.len(), "registro renderizado");
    Ok(Html(render_annotated(&texts)?))
}
