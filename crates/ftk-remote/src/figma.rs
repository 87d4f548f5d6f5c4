//! Figma REST implementation of [`DocumentClient`]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use ftk_core::{Document, ExportParams};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::{DocumentClient, RemoteError, Result};

/// Body of `GET /v1/images/:key`.
#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    images: HashMap<String, Option<String>>,
}

/// Error body shared by the file and image endpoints.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct FigmaClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl FigmaClient {
    pub fn new(
        token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::user_agent())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.api_base, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Map a non-success response to the matching error.
fn status_error(status: StatusCode, body: &str, file_id: &str) -> RemoteError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => RemoteError::NotFound(file_id.to_string()),
        _ => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .ok()
                .and_then(|e| e.err.or(e.message))
                .unwrap_or_else(|| body.chars().take(200).collect());
            RemoteError::Status {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl DocumentClient for FigmaClient {
    async fn fetch_document(&self, file_id: &str) -> Result<Document> {
        let (status, body) = self.get(&format!("/v1/files/{}", file_id), &[]).await?;
        if !status.is_success() {
            return Err(status_error(status, &body, file_id));
        }

        let document: Document = serde_json::from_str(&body)?;
        debug!("Loaded document '{}' ({})", document.name, file_id);
        Ok(document)
    }

    async fn resolve_export_urls(
        &self,
        file_id: &str,
        ids: &[String],
        params: &ExportParams,
    ) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query = vec![("ids", ids.join(","))];
        query.extend(params.query_pairs());

        let (status, body) = self
            .get(&format!("/v1/images/{}", file_id), &query)
            .await?;
        parse_images(status, &body, file_id)
    }
}

fn parse_images(status: StatusCode, body: &str, file_id: &str) -> Result<HashMap<String, String>> {
    if matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
    ) {
        return Err(status_error(status, body, file_id));
    }

    // Render failures come back as 400/500 with an `err` body
    let response: ImagesResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !status.is_success() => return Err(status_error(status, body, file_id)),
        Err(e) => return Err(e.into()),
    };

    if let Some(err) = response.err {
        return Err(RemoteError::Export(err));
    }
    if !status.is_success() {
        return Err(status_error(status, body, file_id));
    }

    let resolved: HashMap<String, String> = response
        .images
        .into_iter()
        .filter_map(|(id, url)| url.map(|url| (id, url)))
        .collect();
    debug!("Resolved {} export urls for {}", resolved.len(), file_id);
    Ok(resolved)
}
