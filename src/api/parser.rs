// src/api/parser.rs
//! Turns raw HTTP bodies into JSON values or typed API errors.
//!
//! A successful status is parsed as the expected shape; anything else is
//! read as Notion's error envelope, falling back to the bare HTTP status
//! when the body is not one.

use super::client::ApiResponse;
use super::types::PaginatedResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// The error object Notion returns with every non-2xx response.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    status: u16,
    code: String,
    message: String,
    #[serde(default)]
    request_id: Option<String>,
}

/// Parses a response body as `T`, or as an API error on a failed status.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

/// Parses one batch of a cursor-paginated listing.
pub fn parse_paginated(result: ApiResponse<String>) -> Result<PaginatedResponse<Value>, AppError> {
    parse_api_response(result)
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(error) = serde_json::from_str::<NotionErrorBody>(body) {
        log::debug!("Notion error from {}: {} {}", url, error.code, error.message);
        return AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status: error.status,
            request_id: error.request_id,
        };
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status: status.as_u16(),
        request_id: None,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
