//! HTTP transport seam shared by the roster loader and the request client

use async_trait::async_trait;
use shift_board_shared::ShiftBoardResult;
use url::Url;

/// Cache behavior requested from the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    Default,
    /// Bypass every cache layer
    NoStore,
}

/// A single GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGet {
    pub url: Url,
    pub cache: CacheMode,
}

impl HttpGet {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            cache: CacheMode::Default,
        }
    }

    pub fn no_store(mut self) -> Self {
        self.cache = CacheMode::NoStore;
        self
    }
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests. Futures need not be `Send`: the browser runs everything
/// on one thread. No timeout is applied.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Fails only when no response arrived at all; non-2xx responses are returned
    async fn get(&self, request: HttpGet) -> ShiftBoardResult<HttpResponse>;
}

#[async_trait(?Send)]
impl<T: HttpTransport + ?Sized> HttpTransport for std::rc::Rc<T> {
    async fn get(&self, request: HttpGet) -> ShiftBoardResult<HttpResponse> {
        (**self).get(request).await
    }
}
