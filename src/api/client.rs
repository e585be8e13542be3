// src/api/client.rs
//! Thin HTTP client wrapper for the Notion API.
//!
//! Handles authentication headers, request timeouts and request logging.
//! Response bodies are handed to the parser untouched.

use super::parser::{parse_api_response, parse_paginated};
use super::types::{DatabaseQuery, PaginatedResponse, RawBlock, RawPage};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Points the client at another server speaking the Notion API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `endpoint` (a path relative to the API root).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        log::trace!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }

    /// Makes a GET request to `endpoint` with `params` URL-encoded into the query string.
    pub async fn get_with_params(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let request = self.client.get(url).query(params).build()?;
        log::debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        log::trace!("GET {} -> {}", endpoint, response.status());
        Ok(response)
    }

    /// Makes a POST request with a JSON body to `endpoint`.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        if endpoint.ends_with("/query") {
            log::info!("🔍 Querying database: {}", url);
            log::debug!(
                "   Query body: {}",
                serde_json::to_string_pretty(body)
                    .unwrap_or_else(|_| "Failed to serialize".to_string())
            );
        } else {
            log::debug!("POST {}", url);
        }

        let response = self.client.post(url).json(body).send().await?;
        log::trace!("POST {} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn query_database(
        &self,
        database: &NotionId,
        query: &DatabaseQuery,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<RawPage>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let body = query.request_body(NOTION_API_PAGE_SIZE, cursor);
        let response = self.post(&endpoint, &body).await?;
        parse_paginated(extract_response_text(response).await?)
    }

    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<RawBlock>, AppError> {
        let endpoint = format!("blocks/{}/children", block_id);
        let page_size = NOTION_API_PAGE_SIZE.to_string();
        let mut params = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = cursor {
            params.push(("start_cursor", cursor));
        }
        let response = self.get_with_params(&endpoint, &params).await?;
        parse_paginated(extract_response_text(response).await?)
    }

    async fn retrieve_page(&self, id: &NotionId) -> Result<RawPage, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        let response = self.get(&endpoint).await?;
        parse_api_response(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with its status and URL.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
