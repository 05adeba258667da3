//! Scripted transport for in-module tests: replays canned responses and
//! records every request it saw.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queues a response with the given status and body.
    pub(crate) fn reply(&self, status: u16, body: &str) {
        self.script.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
    }

    /// Queues a transport-level failure.
    pub(crate) fn fail_network(&self, detail: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(detail.to_string())));
    }

    /// Every request executed so far, in order.
    pub(crate) fn seen(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(req.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {:?} {}", req.method, req.url))
    }
}
