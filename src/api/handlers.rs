use crate::error::Error;
use crate::models::{CompareRequest, DocumentInput, Extraction, FieldSummary, ReportDocument};
use crate::service::{report, ComparisonService};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// 对比响应体
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub success: bool,
    pub message: String,
    pub report: Option<ReportDocument>,
}

/// 单文档抽取响应体
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub message: String,
    pub extraction: Option<Extraction>,
}

/// 字段注册表
#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub version: String,
    pub fields: Vec<FieldSummary>,
}

fn status_of(e: &Error) -> StatusCode {
    if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// 抽取与对比都是纯 CPU 计算，放到阻塞线程池执行
async fn run_blocking<T, F>(task: &'static str, f: F) -> Result<T, (StatusCode, String)>
where
    T: Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::error!("{} failed: {}", task, e);
            Err((status_of(&e), format!("Error: {}", e)))
        }
        Err(e) => {
            tracing::error!("{} task panicked: {}", task, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)))
        }
    }
}

async fn run_compare(
    service: Arc<ComparisonService>,
    req: CompareRequest,
) -> Result<ReportDocument, (StatusCode, String)> {
    run_blocking("compare", move || service.compare(req)).await
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 列出字段注册表
pub async fn list_fields(State(service): State<Arc<ComparisonService>>) -> Json<FieldsResponse> {
    let registry = service.registry();
    Json(FieldsResponse {
        version: registry.version().to_string(),
        fields: registry.summaries(),
    })
}

/// 单文档抽取接口
pub async fn extract(
    State(service): State<Arc<ComparisonService>>,
    Json(doc): Json<DocumentInput>,
) -> Response {
    match run_blocking("extract", move || service.extract_document(&doc)).await {
        Ok(extraction) => {
            let response = ExtractResponse {
                success: true,
                message: format!(
                    "Extracted {}/{} fields, {} diagnostics",
                    extraction.specification.present_count(),
                    extraction.specification.len(),
                    extraction.diagnostics.len()
                ),
                extraction: Some(extraction),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err((status, message)) => {
            let response = ExtractResponse {
                success: false,
                message,
                extraction: None,
            };
            (status, Json(response)).into_response()
        }
    }
}

/// 对比接口：返回完整报告文档
pub async fn compare(
    State(service): State<Arc<ComparisonService>>,
    Json(req): Json<CompareRequest>,
) -> Response {
    match run_compare(service, req).await {
        Ok(report) => {
            let response = CompareResponse {
                success: true,
                message: format!(
                    "Compared {} fields, {} diagnostics",
                    report.comparison.len(),
                    report.diagnostics.len()
                ),
                report: Some(report),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err((status, message)) => {
            let response = CompareResponse {
                success: false,
                message,
                report: None,
            };
            (status, Json(response)).into_response()
        }
    }
}

/// 对比接口：返回 CSV 对比表
pub async fn compare_csv(
    State(service): State<Arc<ComparisonService>>,
    Json(req): Json<CompareRequest>,
) -> Response {
    let report = match run_compare(service, req).await {
        Ok(report) => report,
        Err((status, message)) => return (status, message).into_response(),
    };

    let mut buf = Vec::new();
    match report::write_comparison_csv(&report, &mut buf) {
        Ok(()) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            buf,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response(),
    }
}
