use std::sync::OnceLock;

use anyhow::{Result, anyhow, bail};
use futures::future::BoxFuture;
use gpui::http_client::{self, AsyncBody, HttpClient, Url, http};
use http::HeaderValue;
use tokio::runtime::{Handle, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime_handle() -> Result<Handle> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime.handle().clone());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("reqwest-client")
        .enable_all()
        .build()?;
    // Another thread may have won the race, its runtime is kept and ours dropped.
    Ok(RUNTIME.get_or_init(|| runtime).handle().clone())
}

pub struct ReqwestClient {
    client: reqwest::Client,
    user_agent: Option<HeaderValue>,
    handle: Handle,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            user_agent: None,
            handle: runtime_handle()?,
        })
    }

    /// Create a client sending `agent` as the `User-Agent` header.
    pub fn user_agent(agent: &str) -> Result<Self> {
        let user_agent = HeaderValue::from_str(agent)?;
        let client = reqwest::Client::builder().user_agent(agent).build()?;

        Ok(Self {
            client,
            user_agent: Some(user_agent),
            handle: runtime_handle()?,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn proxy(&self) -> Option<&Url> {
        None
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn user_agent(&self) -> Option<&HeaderValue> {
        self.user_agent.as_ref()
    }

    fn send(
        &self,
        req: http::Request<AsyncBody>,
    ) -> BoxFuture<'static, Result<http_client::Response<AsyncBody>>> {
        let client = self.client.clone();
        let handle = self.handle.clone();

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
                .map_err(|e| anyhow!("Invalid method: {}", e))?;
            let url = parts.uri.to_string();
            let mut request_builder = client.request(method, &url);

            for (name, value) in parts.headers.iter() {
                request_builder = request_builder.header(name.as_str(), value.as_bytes());
            }

            match body.0 {
                http_client::Inner::Empty => {}
                http_client::Inner::Bytes(cursor) => {
                    request_builder = request_builder.body(cursor.into_inner().to_vec());
                }
                http_client::Inner::AsyncReader(_) => {
                    bail!("AsyncReader body is not supported");
                }
            }

            tracing::trace!("{} {}", parts.method, url);
            let (status, headers, bytes) = handle
                .spawn(async move {
                    let response = request_builder.send().await?;
                    let status = response.status();
                    let headers = response.headers().clone();
                    let bytes = response.bytes().await?;
                    anyhow::Ok((status, headers, bytes))
                })
                .await??;

            let mut builder = http::Response::builder().status(status.as_u16());
            for (name, value) in headers.iter() {
                builder = builder.header(name.as_str(), value.as_bytes());
            }

            builder
                .body(AsyncBody::from(bytes))
                .map_err(|e| anyhow!("{}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent() {
        let client = ReqwestClient::user_agent("color-picker").unwrap();
        assert_eq!(
            client.user_agent().and_then(|agent| agent.to_str().ok()),
            Some("color-picker")
        );
        assert!(client.proxy().is_none());

        let client = ReqwestClient::new().unwrap();
        assert!(client.user_agent().is_none());
    }

    #[test]
    fn test_invalid_user_agent() {
        assert!(ReqwestClient::user_agent("bad\nagent").is_err());
    }
}
