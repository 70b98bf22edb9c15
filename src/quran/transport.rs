use std::time::Duration;

use crate::quran::error::{QuranError, Result};

/// Read-only HTTP GET returning the response body on a success status.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;
}

#[cfg(feature = "network")]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "network")]
impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("muraja/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuranError::Network {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "network")]
impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let network = |e: reqwest::Error| QuranError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuranError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(network)
    }
}

#[cfg(not(feature = "network"))]
pub struct HttpTransport;

#[cfg(not(feature = "network"))]
impl HttpTransport {
    pub fn new(_timeout: Duration) -> Result<Self> {
        Ok(Self)
    }
}

#[cfg(not(feature = "network"))]
impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        Err(QuranError::Network {
            url: url.to_string(),
            message: "built without the `network` feature".to_string(),
        })
    }
}
