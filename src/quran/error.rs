use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuranError {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("unexpected response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("ayah {ayah} not found in surah {chapter}")]
    AyahOutOfRange { chapter: u16, ayah: u16 },
}

impl QuranError {
    /// Non-success status, transport failure or an undecodable body.
    pub fn is_fetch_error(&self) -> bool {
        !matches!(self, QuranError::AyahOutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, QuranError>;
