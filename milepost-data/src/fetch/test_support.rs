//! Shared fixtures for fetch tests.
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::io::Write;

use async_trait::async_trait;

use super::{DatasetSource, TransportError};

/// Stub [`DatasetSource`] serving canned bodies from memory.
///
/// Responses are matched by URL substring in registration order. Every
/// request is recorded, including those the stub fails on purpose.
#[derive(Debug, Default)]
pub struct StubSource {
    responses: Vec<(String, Vec<u8>)>,
    failures_remaining: Cell<u32>,
    requests: RefCell<Vec<String>>,
}

impl StubSource {
    /// Construct a stub that knows no URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for any URL containing `url_fragment`.
    #[must_use]
    pub fn with_response(mut self, url_fragment: impl Into<String>, body: Vec<u8>) -> Self {
        self.responses.push((url_fragment.into(), body));
        self
    }

    /// Fail the next `count` requests with a 503 before serving bodies.
    #[must_use]
    pub fn failing_first(self, count: u32) -> Self {
        self.failures_remaining.set(count);
        self
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DatasetSource for StubSource {
    async fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        let remaining = self.failures_remaining.get();
        if remaining > 0 {
            self.failures_remaining.set(remaining - 1);
            return Err(TransportError::Http {
                url: url.to_owned(),
                status: 503,
                message: "service unavailable".to_owned(),
            });
        }
        let Some((_, body)) = self
            .responses
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
        else {
            return Err(TransportError::Http {
                url: url.to_owned(),
                status: 404,
                message: "not found".to_owned(),
            });
        };
        sink.write_all(body)
            .map_err(|source| TransportError::Network {
                url: url.to_owned(),
                source,
            })?;
        let length = u64::try_from(body.len()).expect("body length should fit in u64");
        Ok(length)
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("create Tokio runtime")
        .block_on(future)
}
