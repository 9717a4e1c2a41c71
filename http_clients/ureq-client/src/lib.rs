use anyhow::Result;
use async_trait::async_trait;
use drawer_core::net::{HttpClient, HttpRequest, HttpResponse};
use ureq::Agent;

/// HTTP client implementation using `ureq` for synchronous HTTP requests.
/// Since `ureq` is blocking, all requests are wrapped in `tokio::task::spawn_blocking`.
#[derive(Debug, Clone)]
pub struct UreqHttpClient {
    agent: Agent,
}

impl UreqHttpClient {
    pub fn new() -> Self {
        // Status codes are reported to the caller instead of surfacing as errors.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for UreqHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let agent = self.agent.clone();
        // Since ureq is blocking, we must use spawn_blocking
        tokio::task::spawn_blocking(move || {
            let response = match request.method.as_str() {
                "DELETE" => agent.delete(&request.url).call()?,
                method => {
                    return Err(anyhow::anyhow!("Unsupported HTTP method: {}", method));
                }
            };

            let status_code = response.status().as_u16();
            let body = response.into_body().read_to_vec()?;

            Ok(HttpResponse { status_code, body })
        })
        .await?
    }
}
