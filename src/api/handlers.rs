//! API request handlers
//!
//! Handlers for the analyze/confirm/download wizard plus the usual
//! health and version endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::excel;
use crate::pipeline;

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Linkfill API Server".to_string(),
        version: state.version.clone(),
        description: "Merge short links into messaging templates and export per-group Excel files"
            .to_string(),
        endpoints: vec![
            EndpointInfo {
                path: "/health".to_string(),
                method: "GET".to_string(),
                description: "Health check endpoint".to_string(),
            },
            EndpointInfo {
                path: "/version".to_string(),
                method: "GET".to_string(),
                description: "Get server version".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/analyze".to_string(),
                method: "POST".to_string(),
                description: "Upload source + template spreadsheets, get a group preview"
                    .to_string(),
            },
            EndpointInfo {
                path: "/api/v1/confirm".to_string(),
                method: "POST".to_string(),
                description: "Confirm per-group output file names".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/download/{session_id}/{group_id}".to_string(),
                method: "GET".to_string(),
                description: "Download one group's .xlsx file".to_string(),
            },
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "analyze".to_string(),
            "confirm".to_string(),
            "download".to_string(),
        ],
    }))
}

/// One group in the analyze preview
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct GroupInfo {
    pub group_id: String,
    pub row_count: usize,
    pub default_name: String,
}

/// One resolved column role
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ColumnInfo {
    pub role: String,
    pub column: Option<String>,
}

/// Analyze response
#[derive(Serialize, Deserialize, Debug)]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub link_count: usize,
    pub max_content_length: usize,
    pub groups: Vec<GroupInfo>,
    pub columns: Vec<ColumnInfo>,
    pub warnings: Vec<String>,
}

/// POST /api/v1/analyze - Upload both spreadsheets and run the transform.
///
/// Multipart parts: `source` (short-link export) and `template` (copy
/// template), both .xlsx bytes. On success the result is parked in a
/// session for the confirm/download steps.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Json<ApiResponse<AnalyzeResponse>> {
    let mut source: Option<Vec<u8>> = None;
    let mut template: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        return Json(ApiResponse::err(format!("Failed to read upload: {}", e)))
                    }
                };
                match name.as_str() {
                    "source" => source = Some(bytes),
                    "template" => template = Some(bytes),
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => return Json(ApiResponse::err(format!("Invalid multipart body: {}", e))),
        }
    }

    let Some(source) = source else {
        return Json(ApiResponse::err("Missing upload part: source"));
    };
    let Some(template) = template else {
        return Json(ApiResponse::err("Missing upload part: template"));
    };

    match pipeline::analyze_bytes(&source, &template) {
        Ok(analysis) => {
            let link_count = analysis.link_count;
            let max_content_length = analysis.max_content_length;
            let warnings = analysis.warnings.clone();
            let columns = analysis
                .columns
                .iter()
                .map(|(role, column)| ColumnInfo {
                    role: role.to_string(),
                    column: column.clone(),
                })
                .collect();
            let session_id = state.sessions.create(analysis);
            let groups = state
                .sessions
                .summaries(&session_id)
                .unwrap_or_default()
                .into_iter()
                .map(|s| GroupInfo {
                    group_id: s.group_id,
                    row_count: s.row_count,
                    default_name: s.default_name,
                })
                .collect();

            Json(ApiResponse::ok(AnalyzeResponse {
                session_id: session_id.to_string(),
                link_count,
                max_content_length,
                groups,
                columns,
                warnings,
            }))
        }
        Err(e) => Json(ApiResponse::err(e.to_string())),
    }
}

/// Confirm request
#[derive(Deserialize)]
pub struct ConfirmRequest {
    pub session_id: String,
    /// Group id → output file name override
    #[serde(default)]
    pub names: HashMap<String, String>,
}

/// One confirmed output file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct FileInfo {
    pub group_id: String,
    pub file_name: String,
}

/// Confirm response
#[derive(Serialize, Deserialize, Debug)]
pub struct ConfirmResponse {
    pub session_id: String,
    pub files: Vec<FileInfo>,
}

/// POST /api/v1/confirm - Apply per-group filename overrides.
///
/// Overrides get `.xlsx` appended when missing; groups without an override
/// keep their default name.
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmRequest>,
) -> Json<ApiResponse<ConfirmResponse>> {
    let Ok(session_id) = Uuid::parse_str(&req.session_id) else {
        return Json(ApiResponse::err(format!(
            "Invalid session id: {}",
            req.session_id
        )));
    };

    match state.sessions.confirm(&session_id, &req.names) {
        Some(confirmed) => Json(ApiResponse::ok(ConfirmResponse {
            session_id: req.session_id,
            files: confirmed
                .into_iter()
                .map(|(group_id, file_name)| FileInfo {
                    group_id,
                    file_name,
                })
                .collect(),
        })),
        None => Json(ApiResponse::err("Unknown or expired session")),
    }
}

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/v1/download/{session_id}/{group_id} - Deliver one group's file
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path((session_id, group_id)): Path<(String, String)>,
) -> Response {
    let Ok(session_id) = Uuid::parse_str(&session_id) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid session id: {}", session_id),
        );
    };

    let Some((file_name, sheet)) = state.sessions.artifact(&session_id, &group_id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Unknown session or group: {}", group_id),
        );
    };

    match excel::write_sheet_to_buffer(&sheet) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}
