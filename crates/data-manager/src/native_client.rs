//! Native HTTP transport backed by reqwest

use async_trait::async_trait;
use shift_board_shared::{ShiftBoardError, ShiftBoardResult};

use crate::transport::{CacheMode, HttpGet, HttpResponse, HttpTransport};

/// HTTP transport for native builds (CLI, tests against a live store)
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn network_error(err: reqwest::Error) -> ShiftBoardError {
    ShiftBoardError::Network {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpGet) -> ShiftBoardResult<HttpResponse> {
        let mut builder = self.client.get(request.url.clone());
        if request.cache == CacheMode::NoStore {
            builder = builder
                .header(reqwest::header::CACHE_CONTROL, "no-store")
                .header(reqwest::header::PRAGMA, "no-cache");
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;

        log::debug!("GET {} -> {} ({} bytes)", request.url, status, body.len());

        Ok(HttpResponse::new(status, body))
    }
}
