use anyhow::Result;
use async_trait::async_trait;

/// A simple structure to represent an HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
}

impl HttpRequest {
    fn with_method(method: &str, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.to_string(),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::with_method("DELETE", url)
    }
}

/// A simple structure for the HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates an HTTP response with an empty body and the given status code.
    pub fn empty(status_code: u16) -> Self {
        Self {
            status_code,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Trait for executing HTTP requests in a runtime-agnostic way
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes a given HTTP request and returns the response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_request_keeps_url() {
        let request = HttpRequest::delete("http://localhost/api/conversations/1");
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.url, "http://localhost/api/conversations/1");
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::empty(200).is_success());
        assert!(HttpResponse::empty(204).is_success());
        assert!(!HttpResponse::empty(199).is_success());
        assert!(!HttpResponse::empty(404).is_success());
        assert!(!HttpResponse::empty(500).is_success());
    }
}
