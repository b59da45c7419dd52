use crate::config::ApiConfig;
use crate::extractor;
use crate::pipeline;
use crate::summarizer::SummaryProvider;
use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{web, App, Error, HttpResponse, HttpServer};
use chrono::Utc;
use futures_util::stream::StreamExt;
use serde_json::json;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};
use uuid::Uuid;

// Global summarizer handle, installed once at startup
static PROVIDER: OnceLock<Arc<dyn SummaryProvider>> = OnceLock::new();

pub fn set_provider_handle(handle: Arc<dyn SummaryProvider>) {
    let _ = PROVIDER.set(handle);
}

/// Generate a short request ID for correlation
fn generate_request_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Removes the uploaded file when the request scope ends. Held from the
/// moment the file is created through the whole save-extract-summarize
/// sequence, so the upload is cleaned up on every exit path, not only on
/// success.
struct UploadGuard {
    path: PathBuf,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), "Failed to remove uploaded file: {}", e);
        }
    }
}

#[derive(serde::Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

/// Name of the downloadable text file for a given uploaded document.
pub fn summary_filename(original: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    format!("summary_{}.txt", stem)
}

async fn root_handler() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("✅ Backend is running (Actix Web)\n\nTry /health or /ready\n"))
}

pub async fn health_check() -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    if let Some(provider) = PROVIDER.get() {
        Ok(HttpResponse::Ok().json(json!({
            "status": "healthy",
            "model": provider.model_name(),
            "request_id": request_id
        })))
    } else {
        error!(
            "[{}] Health check failed: Summarizer not initialized",
            request_id
        );
        Ok(HttpResponse::ServiceUnavailable().json(json!({
            "status": "unhealthy",
            "error": "Summarizer not initialized",
            "request_id": request_id
        })))
    }
}

async fn ready_check(config: web::Data<ApiConfig>) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    let dirs_ok = fs::create_dir_all(&config.upload_dir)
        .and_then(|_| fs::create_dir_all(&config.summary_dir));
    match dirs_ok {
        Ok(()) if PROVIDER.get().is_some() => Ok(HttpResponse::Ok().json(json!({
            "status": "ready",
            "timestamp": Utc::now().to_rfc3339(),
            "request_id": request_id
        }))),
        Ok(()) => Ok(HttpResponse::ServiceUnavailable().json(json!({
            "status": "not ready",
            "error": "Summarizer not initialized",
            "timestamp": Utc::now().to_rfc3339(),
            "request_id": request_id
        }))),
        Err(e) => Ok(HttpResponse::ServiceUnavailable().json(json!({
            "status": "not ready",
            "error": format!("Storage dirs unavailable: {}", e),
            "timestamp": Utc::now().to_rfc3339(),
            "request_id": request_id
        }))),
    }
}

async fn upload_and_summarize(
    config: web::Data<ApiConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    fs::create_dir_all(&config.upload_dir).ok();
    fs::create_dir_all(&config.summary_dir).ok();

    // The upload form sends exactly one file field
    let mut saved: Option<(String, PathBuf, UploadGuard)> = None;
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let filename = match field
            .content_disposition()
            .as_ref()
            .and_then(|cd| cd.get_filename())
        {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "status": "error",
                    "message": "No selected file",
                    "request_id": request_id
                })));
            }
        };

        // The stored path embeds the client filename; names carrying path
        // separators must not escape the upload dir
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Invalid filename",
                "request_id": request_id
            })));
        }

        let ext = Path::new(&filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        if !ext.eq_ignore_ascii_case("pdf") {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Only .pdf allowed",
                "request_id": request_id
            })));
        }

        // Request-unique name so concurrent uploads never collide
        let stored_name = format!("{}_{}", request_id, filename);
        let filepath = PathBuf::from(&config.upload_dir).join(&stored_name);
        let create_path = filepath.clone();
        let mut f = web::block(move || File::create(&create_path)).await??;
        // Guard from the moment the file exists, so a truncated stream or a
        // failed write during the save loop still gets cleaned up
        let guard = UploadGuard {
            path: filepath.clone(),
        };
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            f = web::block(move || f.write_all(&data).map(|_| f)).await??;
        }

        saved = Some((filename, filepath, guard));
        break;
    }

    let Some((filename, filepath, _guard)) = saved else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "No file part",
            "request_id": request_id
        })));
    };

    info!("[{}] Processing upload {}", request_id, filename);

    let extract_path = filepath.clone();
    let text = match web::block(move || extractor::extract_text(&extract_path)).await? {
        Ok(text) => text,
        Err(e) => {
            warn!("[{}] Extraction failed for {}: {}", request_id, filename, e);
            return Ok(HttpResponse::UnprocessableEntity().json(json!({
                "status": "error",
                "message": e.to_string(),
                "request_id": request_id
            })));
        }
    };

    let Some(provider) = PROVIDER.get() else {
        return Ok(HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "Summarizer not initialized",
            "request_id": request_id
        })));
    };

    let summary =
        match pipeline::summarize_document(&text, provider.as_ref(), &config.summary_options())
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                error!("[{}] Summarization failed for {}: {}", request_id, filename, e);
                return Ok(HttpResponse::BadGateway().json(json!({
                    "status": "error",
                    "message": e.to_string(),
                    "request_id": request_id
                })));
            }
        };

    let out_name = summary_filename(&filename);
    let out_path = PathBuf::from(&config.summary_dir).join(&out_name);
    let contents = summary.clone();
    web::block(move || fs::write(&out_path, contents)).await??;

    info!(
        "[{}] Summary written: {} ({} chars)",
        request_id,
        out_name,
        summary.len()
    );

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "summary": summary,
        "summary_filename": out_name,
        "request_id": request_id
    })))
}

pub async fn summarize_text(
    config: web::Data<ApiConfig>,
    request: web::Json<SummarizeRequest>,
) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    if request.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Text must not be empty",
            "request_id": request_id
        })));
    }

    let Some(provider) = PROVIDER.get() else {
        return Ok(HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "Summarizer not initialized",
            "request_id": request_id
        })));
    };

    match pipeline::summarize_document(&request.text, provider.as_ref(), &config.summary_options())
        .await
    {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "summary": summary,
            "request_id": request_id
        }))),
        Err(e) => {
            error!("[{}] Summarization failed: {}", request_id, e);
            Ok(HttpResponse::BadGateway().json(json!({
                "status": "error",
                "message": e.to_string(),
                "request_id": request_id
            })))
        }
    }
}

pub async fn list_summaries(config: web::Data<ApiConfig>) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(&config.summary_dir) {
        for entry in entries.flatten() {
            if entry.path().is_file() {
                if let Some(filename) = entry.file_name().to_str() {
                    files.push(filename.to_string());
                }
            }
        }
    }
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "summaries": files,
        "count": files.len(),
        "request_id": request_id
    })))
}

pub async fn download_summary(
    config: web::Data<ApiConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let request_id = generate_request_id();
    let filename = path.into_inner();
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Ok(HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid filename",
            "request_id": request_id
        })));
    }

    let filepath = PathBuf::from(&config.summary_dir).join(&filename);
    match web::block(move || fs::read(&filepath)).await? {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            ))
            .body(bytes)),
        Err(_) => Ok(HttpResponse::NotFound().json(json!({
            "status": "error",
            "message": "File not found",
            "request_id": request_id
        }))),
    }
}

/// Route table, shared between the server and the integration tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root_handler))
        .route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(ready_check))
        .route("/upload", web::post().to(upload_and_summarize))
        .route("/summarize", web::post().to(summarize_text))
        .route("/summaries", web::get().to(list_summaries))
        .route("/download/{filename}", web::get().to(download_summary));
}

pub fn start_api_server(
    config: &ApiConfig,
) -> impl std::future::Future<Output = std::io::Result<()>> {
    let bind_addr = config.bind_addr();
    let config = config.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(config.clone()))
            .wrap(cors)
            .configure(routes)
    })
    .bind(bind_addr.clone())
    .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", bind_addr, e))
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_filename_strips_extension() {
        assert_eq!(summary_filename("report.pdf"), "summary_report.txt");
        assert_eq!(summary_filename("notes"), "summary_notes.txt");
    }

    #[test]
    fn summary_filename_falls_back_for_odd_names() {
        assert_eq!(summary_filename(""), "summary_document.txt");
    }

    #[test]
    fn request_ids_are_short_and_unique() {
        let a = generate_request_id();
        let b = generate_request_id();
        assert_eq!(a.len(), 8);
        assert_ne!(a, b);
    }
}
