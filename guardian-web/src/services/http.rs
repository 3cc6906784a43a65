//! `fetch` transport built on gloo-net.

use async_trait::async_trait;
use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use lib_core::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

#[derive(Debug, Clone, Copy)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    fn builder(request: &HttpRequest) -> RequestBuilder {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Patch => Request::patch(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        match &request.bearer {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn fetch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = Self::builder(&request);
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let response = prepared.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(HttpResponse::new(status, body))
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        let fetch = Self::fetch(request);
        let timeout = TimeoutFuture::new(self.timeout_ms);
        pin_mut!(fetch);

        match select(fetch, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                log::warn!("[API] {} timed out after {} ms", url, self.timeout_ms);
                Err(TransportError(format!("timed out after {} ms", self.timeout_ms)))
            }
        }
    }
}
