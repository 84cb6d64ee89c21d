//! Page fetcher
//!
//! Loads the raw HTML of one page:
//! - `http` and `https` URLs through a blocking HTTP client
//! - `file` URLs straight from the local filesystem

use crate::ParseError;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

/// Builds the blocking HTTP client used by the page parser
///
/// `timeout` bounds each individual request.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the body of `url`
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Network failure or timeout | `ParseError::Http` |
/// | Non-2xx response | `ParseError::Status` |
/// | Unreadable local file | `ParseError::Io` |
/// | Scheme other than http, https, file | `ParseError::UnsupportedScheme` |
pub fn fetch_page(client: &Client, url: &Url) -> Result<String, ParseError> {
    match url.scheme() {
        "http" | "https" => fetch_remote(client, url),
        "file" => read_local(url),
        other => Err(ParseError::UnsupportedScheme(other.to_string())),
    }
}

fn fetch_remote(client: &Client, url: &Url) -> Result<String, ParseError> {
    let http_error = |source| ParseError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ParseError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().map_err(http_error)
}

fn read_local(url: &Url) -> Result<String, ParseError> {
    let path = url
        .to_file_path()
        .map_err(|()| ParseError::NotAFilePath(url.to_string()))?;

    std::fs::read_to_string(&path).map_err(|source| ParseError::Io {
        url: url.to_string(),
        source,
    })
}
