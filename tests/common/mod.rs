#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use profile_drawer::PanelHost;
use profile_drawer::net::{HttpClient, HttpRequest, HttpResponse};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub enum Reply {
    Status(u16),
    TransportError(&'static str),
}

/// Mock HTTP client that records requests and can hold them open until
/// released.
pub struct MockHttpClient {
    reply: Reply,
    gated: bool,
    requests: Mutex<Vec<HttpRequest>>,
    pub started: Notify,
    pub release: Notify,
}

impl MockHttpClient {
    pub fn replying(reply: Reply) -> Self {
        Self {
            reply,
            gated: false,
            requests: Mutex::new(Vec::new()),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Requests wait for `release` before replying.
    pub fn gated(reply: Reply) -> Self {
        Self {
            gated: true,
            ..Self::replying(reply)
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.started.notify_one();
        if self.gated {
            self.release.notified().await;
        }
        match self.reply {
            Reply::Status(code) => Ok(HttpResponse::empty(code)),
            Reply::TransportError(message) => Err(anyhow::anyhow!(message)),
        }
    }
}

/// Host that counts every signal it receives.
#[derive(Default)]
pub struct RecordingHost {
    pub closes: AtomicUsize,
    pub refreshes: AtomicUsize,
    pub navigations: Mutex<Vec<String>>,
    pub notifications: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl PanelHost for RecordingHost {
    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }

    fn refresh_listing(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }

    fn notify_error(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}
