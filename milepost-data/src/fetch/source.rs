use std::io::{self, Write};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Response};

use super::TransportError;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "milepost-map/0.1";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Fetches remote datasets byte for byte.
#[async_trait(?Send)]
pub trait DatasetSource {
    /// Stream the body served at `url` into `sink`, returning the byte count.
    async fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

/// HTTP implementation of [`DatasetSource`].
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    client: Client,
    user_agent: String,
}

impl HttpDatasetSource {
    /// Construct an HTTP-backed dataset source.
    ///
    /// # Errors
    /// Returns [`TransportError::Client`] when the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|source| TransportError::Client { source })?;
        Ok(Self {
            client,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    async fn call(&self, url: &str) -> Result<Response, TransportError> {
        self.client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, url))
    }
}

#[async_trait(?Send)]
impl DatasetSource for HttpDatasetSource {
    async fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let response = self.call(url).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0_u64;
        while let Some(chunk) = stream
            .try_next()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
        {
            sink.write_all(&chunk)
                .map_err(|source| TransportError::Network {
                    url: url.to_owned(),
                    source,
                })?;
            written = written.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        }
        Ok(written)
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
