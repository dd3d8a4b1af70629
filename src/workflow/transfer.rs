/// Upload of the selected file to the transformation service
///
/// One multipart POST per submission, a single part named `file`, and the
/// response body read back as raw bytes. No retries.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};

use crate::config::Config;
use crate::error::{Result, WorkflowError};

use super::selection::SelectedFile;

/// Multipart field the service reads the image from
pub const FILE_FIELD: &str = "file";

/// Where the single transfer currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl TransferState {
    pub fn is_in_flight(self) -> bool {
        self == TransferState::InFlight
    }
}

/// HTTP client for `POST /process-image`
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TransformClient {
    http: reqwest::Client,
    endpoint: Arc<str>,
}

impl TransformClient {
    /// Create a client from the build-time configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| WorkflowError::ClientBuild(Arc::new(e)))?;

        Ok(Self {
            http,
            endpoint: Arc::from(config.endpoint.as_str()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the file and return the raw success body.
    ///
    /// Read errors, network errors and non-2xx statuses all come back as
    /// `Err`; partial bodies are dropped with the response.
    pub async fn upload(&self, file: SelectedFile) -> Result<Vec<u8>> {
        let blob = tokio::fs::read(&file.path)
            .await
            .map_err(|e| WorkflowError::Read {
                path: file.path.clone(),
                source: Arc::new(e),
            })?;

        log::info!(
            "⏳ Uploading {} ({} bytes) to {}",
            file.file_name,
            blob.len(),
            self.endpoint
        );

        let part = Part::bytes(blob)
            .file_name(file.file_name.clone())
            .mime_str(file.media_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&*self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkflowError::Status(status));
        }

        let body = response.bytes().await?;
        log::info!("✅ Received {} bytes from service", body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP exchange with a canned response.
    ///
    /// Returns the endpoint URL and a handle yielding the raw request text.
    async fn one_shot_server(
        status_line: &'static str,
        body: Vec<u8>,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}/process-image", addr), handle)
    }

    /// Read headers plus a Content-Length body
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Client that ignores any proxy configured in the test environment
    fn local_client(endpoint: String) -> TransformClient {
        TransformClient {
            http: reqwest::Client::builder().no_proxy().build().unwrap(),
            endpoint: Arc::from(endpoint.as_str()),
        }
    }

    fn photo_on_disk() -> (tempfile::TempDir, SelectedFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        (dir, SelectedFile::from_path(path))
    }

    #[tokio::test]
    async fn test_upload_returns_body_on_success() {
        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let (endpoint, server) = one_shot_server("200 OK", png.clone()).await;
        let (_dir, file) = photo_on_disk();

        let client = local_client(endpoint);
        let body = client.upload(file).await.unwrap();
        assert_eq!(body, png);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("post /process-image http/1.1"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains("name=\"file\"; filename=\"photo.jpg\""));
        assert!(request.contains("content-type: image/jpeg"));
    }

    #[tokio::test]
    async fn test_upload_rejects_server_error() {
        let (endpoint, server) =
            one_shot_server("500 Internal Server Error", br#"{"error":"boom"}"#.to_vec()).await;
        let (_dir, file) = photo_on_disk();

        let client = local_client(endpoint);
        let result = client.upload(file).await;
        assert!(matches!(
            result,
            Err(WorkflowError::Status(status)) if status.as_u16() == 500
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_reports_unreachable_endpoint() {
        // Bind then drop so the port is closed
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let (_dir, file) = photo_on_disk();

        let client = local_client(format!("http://{}/process-image", addr));
        let result = client.upload(file).await;
        assert!(matches!(result, Err(WorkflowError::Network(_))));
    }

    #[tokio::test]
    async fn test_upload_reports_missing_file() {
        let client = TransformClient::new(&Config::with_endpoint("http://127.0.0.1:9/process-image")).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/process-image");
        let file = SelectedFile::from_path("/nonexistent/photo.jpg".into());
        let result = client.upload(file).await;
        assert!(matches!(result, Err(WorkflowError::Read { .. })));
    }
}
