use async_trait::async_trait;
use shift_board_shared::{ShiftBoardError, ShiftBoardResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use crate::transport::{CacheMode, HttpGet, HttpResponse, HttpTransport};

/// HTTP transport using the browser's fetch API
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }

    async fn fetch_text(&self, request: &HttpGet) -> Result<HttpResponse, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        if request.cache == CacheMode::NoStore {
            opts.set_cache(RequestCache::NoStore);
        }

        let js_request = Request::new_with_str_and_init(request.url.as_str(), &opts)?;

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&js_request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let text = JsFuture::from(resp.text()?).await?;
        let body = text.as_string().unwrap_or_default();

        Ok(HttpResponse::new(resp.status(), body))
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn get(&self, request: HttpGet) -> ShiftBoardResult<HttpResponse> {
        self.fetch_text(&request)
            .await
            .map_err(|e| ShiftBoardError::Network {
                message: format!("{} (URL: {})", ShiftBoardError::from(e), request.url),
                status: None,
            })
    }
}
