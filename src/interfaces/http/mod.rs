mod multipart;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::error::InternalError;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::use_cases::chi_square::ChiSquareUseCase;
use crate::domain::config::AppConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::stats::PearsonChiSquare;

pub use multipart::{read_upload, UploadedFile, UPLOAD_FIELD};

const LOG_CAPACITY: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub chi_square: Arc<ChiSquareUseCase>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChiSquareRequest {
    pub observed_data: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[post("/chi-square")]
async fn chi_square(
    data: web::Data<HttpState>,
    req: web::Json<ChiSquareRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    let observed = req.into_inner().observed_data;
    debug!(%request_id, rows = observed.len(), "Chi-square requested");

    let use_case = data.chi_square.clone();
    let outcome = web::block(move || use_case.analyze_matrix(&observed))
        .await
        .unwrap_or_else(|e| Err(AppError::Internal(e.to_string())));

    match outcome {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) if e.is_client_error() => {
            add_log(
                &data.logs,
                "WARN",
                "ChiSquare",
                &format!("Chi-square rejected (request_id={}): {}", request_id, e),
            );
            HttpResponse::BadRequest().json(ErrorDetail::new(e.to_string()))
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "ChiSquare",
                &format!("Chi-square failed (request_id={}): {}", request_id, e),
            );
            HttpResponse::InternalServerError().json(ErrorDetail::new(e.to_string()))
        }
    }
}

#[post("/upload")]
async fn upload(data: web::Data<HttpState>, payload: Multipart) -> impl Responder {
    let request_id = Uuid::new_v4();

    let file = match read_upload(payload, data.max_upload_bytes).await {
        Ok(file) => file,
        Err(e) => return upload_error_response(&data.logs, request_id, None, e),
    };
    info!(
        %request_id,
        filename = %file.filename,
        size = file.bytes.len(),
        "Upload received"
    );

    let filename = file.filename.clone();
    let use_case = data.chi_square.clone();
    let outcome = web::block(move || use_case.analyze_upload(&file.filename, &file.bytes))
        .await
        .unwrap_or_else(|e| Err(AppError::Internal(e.to_string())));

    match outcome {
        Ok(analysis) => {
            add_log(
                &data.logs,
                "INFO",
                "Upload",
                &format!(
                    "Upload analysed (request_id={} file={}): p={:.4}, dropped {} rows and {} columns, zero-filled {} cells",
                    request_id,
                    filename,
                    analysis.result.p_value,
                    analysis.cleaning.dropped_rows,
                    analysis.cleaning.dropped_columns,
                    analysis.cleaning.zero_filled_cells
                ),
            );
            HttpResponse::Ok().json(analysis.result)
        }
        Err(e) => upload_error_response(&data.logs, request_id, Some(&filename), e),
    }
}

fn upload_error_response(
    logs: &Mutex<Vec<LogEntry>>,
    request_id: Uuid,
    filename: Option<&str>,
    err: AppError,
) -> HttpResponse {
    let filename = filename.unwrap_or("-");
    match err {
        AppError::UnsupportedFormat | AppError::TooSmall | AppError::NegativeValue => {
            add_log(
                logs,
                "WARN",
                "Upload",
                &format!("Upload rejected (request_id={} file={}): {}", request_id, filename, err),
            );
            HttpResponse::BadRequest().json(ErrorDetail::new(err.to_string()))
        }
        AppError::MissingFile | AppError::InvalidRequest(_) => {
            HttpResponse::UnprocessableEntity().json(ErrorDetail::new(err.to_string()))
        }
        AppError::PayloadTooLarge(_) => {
            HttpResponse::PayloadTooLarge().json(ErrorDetail::new(err.to_string()))
        }
        other => {
            add_log(
                logs,
                "ERROR",
                "Upload",
                &format!("Error interno (request_id={} file={}): {}", request_id, filename, other),
            );
            HttpResponse::InternalServerError().json(ErrorDetail::new(format!(
                "Error al procesar archivo: {}",
                other
            )))
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().map(|logs| logs.clone()).unwrap_or_default();
    HttpResponse::Ok().json(logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => error!(source, "{}", message),
        "WARN" => warn!(source, "{}", message),
        _ => info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    // A poisoned buffer only loses operator history; keep serving.
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > LOG_CAPACITY {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Malformed JSON bodies answer 422 with a `detail` message
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = ErrorDetail::new(err.to_string());
        InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(detail)).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chi_square)
        .service(upload)
        .service(get_logs)
        .service(health);
}

pub fn build_state(config: &AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> web::Data<HttpState> {
    let test = PearsonChiSquare::new(config.analysis.yates_correction);
    web::Data::new(HttpState {
        chi_square: Arc::new(ChiSquareUseCase::new(Arc::new(test))),
        logs,
        max_upload_bytes: config.server.max_upload_bytes,
    })
}

pub fn start_server(config: &AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> Result<Server> {
    let state = build_state(config, logs);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser front-ends upload directly

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(json_config())
            .configure(configure)
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    Ok(server)
}
