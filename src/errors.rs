use thiserror::Error;

/// Custom error type that includes exit codes
#[derive(Debug, Error)]
pub enum GigscrapeError {
    /// Browser session could not be started (exit code 4)
    #[error("WebDriver session failed: {0}")]
    Init(String),
    /// A results page could not be fetched or parsed (exit code 2)
    #[error("Failed to fetch results page: {0}")]
    PageFetch(String),
    /// A primary export target could not be written (exit code 3)
    #[error("Export failed: {0}")]
    Export(String),
    /// Generic error (exit code 1)
    #[error("{0}")]
    Other(anyhow::Error),
}

impl GigscrapeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GigscrapeError::PageFetch(_) => 2,
            GigscrapeError::Export(_) => 3,
            GigscrapeError::Init(_) => 4,
            GigscrapeError::Other(_) => 1,
        }
    }
}

impl From<anyhow::Error> for GigscrapeError {
    fn from(err: anyhow::Error) -> Self {
        // Classify from the error message so callers can keep using anyhow
        let msg = err.to_string();

        if msg.contains("WebDriver")
            || msg.contains("geckodriver")
            || msg.contains("chromedriver")
        {
            GigscrapeError::Init(msg)
        } else if msg.contains("results page") {
            GigscrapeError::PageFetch(msg)
        } else if msg.contains("export") || msg.contains("Export") {
            GigscrapeError::Export(msg)
        } else {
            GigscrapeError::Other(err)
        }
    }
}
