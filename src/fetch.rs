//! Downloading and verifying upstream artifacts.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, WheelError};
use crate::fsx;

/// Source of raw bytes for a URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Time allowed to establish a connection to the download host.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `http(s)://` URLs over the network; `file://` URLs and bare paths
/// are read from disk, which allows building from a local mirror.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Connecting is bounded by [`CONNECT_TIMEOUT`]; reading the body is not,
    /// toolchain archives are tens of megabytes.
    pub fn new() -> Result<Self> {
        Self::with_timeouts(CONNECT_TIMEOUT, None)
    }

    /// `total` bounds the whole request including the body; `None` disables it.
    pub fn with_timeouts(connect: Duration, total: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("zigwheel/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect)
            .timeout(total)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            let path = url.strip_prefix("file://").unwrap_or(url);
            debug!(path, "reading local artifact");
            return fsx::read(Path::new(path));
        }

        debug!(url, "downloading");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(WheelError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes()?;
        debug!(url, size = bytes.len(), "downloaded");
        Ok(bytes.to_vec())
    }
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Fails with [`WheelError::ChecksumMismatch`] unless `data` hashes to `expected`.
/// Returns the computed digest.
pub fn verify_sha256(url: &str, data: &[u8], expected: &str) -> Result<String> {
    let actual = sha256_hex(data);
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(WheelError::ChecksumMismatch {
            url: url.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Instant;
    use tempfile::tempdir;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn accepts_matching_digest() {
        assert_eq!(verify_sha256("u", b"hello", HELLO_SHA256).unwrap(), HELLO_SHA256);
        assert!(verify_sha256("u", b"hello", &HELLO_SHA256.to_uppercase()).is_ok());
    }

    #[test]
    fn rejects_mismatched_digest() {
        let err = verify_sha256("https://example.invalid/zig.tar.xz", b"hellO", HELLO_SHA256).unwrap_err();
        match err {
            WheelError::ChecksumMismatch { url, expected, actual } => {
                assert_eq!(url, "https://example.invalid/zig.tar.xz");
                assert_eq!(expected, HELLO_SHA256);
                assert_ne!(actual, HELLO_SHA256);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_local_paths_and_file_urls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, b"{}").unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        assert_eq!(fetcher.fetch(path.to_str().unwrap()).unwrap(), b"{}");
        let url = format!("file://{}", path.display());
        assert_eq!(fetcher.fetch(&url).unwrap(), b"{}");
    }

    #[test]
    fn missing_local_file_names_the_path() {
        let fetcher = HttpFetcher::new().unwrap();
        match fetcher.fetch("/nonexistent/zigwheel/index.json").unwrap_err() {
            WheelError::Io { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/zigwheel/index.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Serves `body` over plain HTTP to one client, one chunk per `pause`.
    fn serve_slowly(body: Vec<u8>, chunk: usize, pause: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            if stream.write_all(head.as_bytes()).is_err() {
                return;
            }
            for part in body.chunks(chunk) {
                thread::sleep(pause);
                if stream.write_all(part).and_then(|_| stream.flush()).is_err() {
                    return;
                }
            }
        });
        format!("http://{}/zig.tar.xz", addr)
    }

    #[test]
    fn slow_body_is_not_cut_off() {
        let body: Vec<u8> = (0..4096u32).map(|i| i as u8).collect();
        let url = serve_slowly(body.clone(), 1024, Duration::from_millis(700));

        let started = Instant::now();
        let data = HttpFetcher::new().unwrap().fetch(&url).unwrap();
        assert_eq!(data, body);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[test]
    fn bounded_total_timeout_fails_on_the_same_server() {
        let body = vec![7u8; 4096];
        let url = serve_slowly(body, 1024, Duration::from_millis(700));

        let fetcher =
            HttpFetcher::with_timeouts(CONNECT_TIMEOUT, Some(Duration::from_millis(500))).unwrap();
        assert!(matches!(fetcher.fetch(&url), Err(WheelError::Http(_))));
    }
}
