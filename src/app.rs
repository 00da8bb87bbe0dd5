use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

use crate::catalog::catalog_view;
use crate::config::Config;
use crate::display::decode;
use crate::downloader::{INVOICE_FILENAME, XLSX_CONTENT_TYPE, invoice_to_xlsx};
use crate::error::{AppError, JsonError, UploadResponse};
use crate::invoice::InvoiceRequest;
use crate::loader::{is_spreadsheet_filename, parse_rate_list};
use crate::rates::{RateStore, RateTable};

/// Multipart field that carries the rate spreadsheet.
const RATE_FILE_FIELD: &str = "rate_file";

#[derive(Default)]
pub struct AppState {
    pub rates: RateStore,
}

#[derive(Deserialize)]
struct RateQuery {
    #[serde(default)]
    item: String,
}

#[derive(Serialize)]
struct RateSuggestion {
    item: String,
    english: String,
    rate: Option<f64>,
}

#[derive(Serialize)]
struct RatesSummary {
    loaded: bool,
    count: usize,
    rates: RateTable,
}

/// Build the application router around shared state
///
/// # Arguments
/// * `state` - Shared state holding the current rate table
/// * `body_limit` - Largest accepted request body, in bytes
pub fn router(state: Arc<AppState>, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/upload_rate", post(upload_rate))
        .route("/generate", post(generate_invoice))
        .route("/api/catalog", get(get_catalog))
        .route("/api/rates", get(get_rates))
        .route("/api/rate", get(get_rate))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::default());
    let app = router(state, config.body_limit());

    let addr = config.addr()?;
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(&state.rates.snapshot()))
}

/// Fill the page template with the catalog and the current rates.
pub fn render_index(rates: &RateTable) -> String {
    let mut template = include_str!("./static/index.html").to_string();

    let (status_class, status_text) = if rates.is_empty() {
        ("error", "No rate list loaded".to_string())
    } else {
        ("success", format!("✓ Rate list loaded: {} items", rates.len()))
    };
    template = template
        .replace("{{RATE_STATUS_CLASS}}", status_class)
        .replace("{{RATE_STATUS}}", &status_text);

    let catalog_json = script_json(&catalog_view());
    let rates_json = script_json(rates);
    template.replace(
        "</head>",
        &format!(
            "    <script>const CATALOG = {};\n    const RATE_LIST = {};</script>\n</head>",
            catalog_json, rates_json
        ),
    )
}

// JSON that is safe to drop inside a <script> element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

async fn upload_rate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, JsonError> {
    match receive_rate_list(&state, multipart).await {
        Ok(count) => Ok(Json(UploadResponse {
            success: true,
            count: Some(count),
            error: None,
        })),
        Err(e) => {
            log::warn!("Rate list upload rejected: {}", e);
            Err(JsonError(e))
        }
    }
}

// The table is only swapped after the whole file parsed.
async fn receive_rate_list(state: &AppState, mut multipart: Multipart) -> Result<usize, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RATE_FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::EmptyFilename);
        }
        if !is_spreadsheet_filename(&filename) {
            return Err(AppError::InvalidFileType);
        }

        let data = field.bytes().await?;
        let table = parse_rate_list(&data)?;
        let count = state.rates.replace(table);
        log::info!("Loaded rate list {} with {} items", filename, count);
        return Ok(count);
    }

    Err(AppError::MissingFile)
}

async fn generate_invoice(Json(request): Json<InvoiceRequest>) -> Result<Response, AppError> {
    let invoice = request.validate().inspect_err(|e| {
        log::warn!("Invoice request rejected: {}", e);
    })?;

    let now = chrono::Local::now().naive_local();
    let buffer = invoice_to_xlsx(&invoice, now).inspect_err(|e| {
        log::error!("Failed to render invoice for {}: {}", invoice.customer_name, e);
    })?;

    log::info!(
        "Generated invoice for {} with {} items",
        invoice.customer_name,
        invoice.items.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", INVOICE_FILENAME);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(buffer),
    )
        .into_response())
}

async fn get_catalog() -> impl IntoResponse {
    Json(catalog_view())
}

async fn get_rates(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rates = state.rates.snapshot();
    Json(RatesSummary {
        loaded: !rates.is_empty(),
        count: rates.len(),
        rates: RateTable::clone(&rates),
    })
}

async fn get_rate(
    Query(params): Query<RateQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rates = state.rates.snapshot();
    Json(RateSuggestion {
        english: decode(&params.item).english,
        rate: rates.match_rate(&params.item),
        item: params.item,
    })
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
