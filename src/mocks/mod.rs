//! Mock transport for exercising adapters without a network.
//!
//! Queue canned responses, point an adapter at the mock with
//! `with_transport`, and inspect the recorded requests afterwards.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::MailerResult;
use crate::transport::HttpTransport;
use crate::types::Response;

/// A recorded request for verification.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body bytes.
    pub body: Vec<u8>,
}

/// Mock transport that replays queued responses and records requests.
#[derive(Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Response>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Creates a new mock transport with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a full normalized response.
    pub fn enqueue(&self, response: Response) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queues a response with the given status and body and no headers.
    pub fn enqueue_status(&self, status_code: u16, body: &str) {
        self.enqueue(Response {
            status_code,
            body: body.to_string(),
            headers: HashMap::new(),
        });
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the most recent recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> MailerResult<Response> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });

        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or_else(|| Response {
            status_code: 500,
            body: "no mock response configured".to_string(),
            headers: HashMap::new(),
        }))
    }
}
