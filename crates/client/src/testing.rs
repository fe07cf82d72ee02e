//! Scripted in-memory transport for engine tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use authadmin_core::{ClientError, ClientResult};

use crate::transport::{ApiRequest, Transport};

struct Scripted {
    path: Option<String>,
    delay: Option<Duration>,
    reply: ClientResult<Value>,
}

/// Answers requests from a FIFO script and records every request it sees.
///
/// Routed replies only match their path; unrouted ones match anything.
#[derive(Default)]
pub(crate) struct FakeTransport {
    script: Mutex<VecDeque<Scripted>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, path: Option<&str>, delay: Option<Duration>, reply: ClientResult<Value>) -> Self {
        self.script.lock().unwrap().push_back(Scripted {
            path: path.map(str::to_string),
            delay,
            reply,
        });
        self
    }

    pub fn reply(self, body: Value) -> Self {
        self.push(None, None, Ok(body))
    }

    pub fn fail(self, err: ClientError) -> Self {
        self.push(None, None, Err(err))
    }

    pub fn delayed(self, delay: Duration, reply: ClientResult<Value>) -> Self {
        self.push(None, Some(delay), reply)
    }

    pub fn route(self, path: &str, reply: ClientResult<Value>) -> Self {
        self.push(Some(path), None, reply)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let next = {
            let mut script = self.script.lock().unwrap();
            let idx = script
                .iter()
                .position(|s| s.path.as_deref().is_none_or(|p| p == request.path));
            idx.and_then(|i| script.remove(i))
        };
        self.log.lock().unwrap().push(request.clone());

        let Some(next) = next else {
            return Err(ClientError::network(format!("no scripted reply for {}", request.path)));
        };
        if let Some(delay) = next.delay {
            tokio::time::sleep(delay).await;
        }
        next.reply
    }
}
