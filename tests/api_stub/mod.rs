use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Scripted HTTP endpoint standing in for Pocket or Pinboard. Records
/// every request it receives, decoded query string included.
pub struct ApiStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

#[derive(Debug, Clone)]
pub struct ApiStubConfig {
    pub body: String,
    pub content_type: &'static str,
    /// Fail every request from this zero-based index on.
    pub fail_from: Option<usize>,
    pub fail_status: u16,
    pub fail_body: String,
}

#[allow(dead_code)]
impl ApiStubConfig {
    pub fn pocket(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: "application/json",
            fail_from: None,
            fail_status: 500,
            fail_body: "stub failure".to_owned(),
        }
    }

    pub fn pinboard() -> Self {
        Self {
            body: r#"<result code="done" />"#.to_owned(),
            content_type: "text/xml",
            fail_from: None,
            fail_status: 500,
            fail_body: "stub failure".to_owned(),
        }
    }

    pub fn failing_from(mut self, index: usize, status: u16, body: &str) -> Self {
        self.fail_from = Some(index);
        self.fail_status = status;
        self.fail_body = body.to_owned();
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl ApiStub {
    pub fn spawn(config: ApiStubConfig) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start api stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let raw_url = request.url().to_string();
                let (path, query) = raw_url.split_once('?').unwrap_or((raw_url.as_str(), ""));
                let params = url::form_urlencoded::parse(query.as_bytes())
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect();

                let index = {
                    let mut log = log.lock().expect("lock stub request log");
                    log.push(RecordedRequest {
                        path: path.to_owned(),
                        params,
                    });
                    log.len() - 1
                };

                let response = if config.fail_from.is_some_and(|from| index >= from) {
                    tiny_http::Response::from_string(config.fail_body.clone())
                        .with_status_code(config.fail_status)
                } else {
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        config.content_type.as_bytes(),
                    )
                    .expect("build header");
                    tiny_http::Response::from_string(config.body.clone())
                        .with_status_code(200)
                        .with_header(header)
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock stub request log").clone()
    }
}

impl Drop for ApiStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Binary invocation wired to the two stubs: stub endpoints, test
/// credentials, explicit watermark file, no pacing delay.
#[allow(dead_code)]
pub fn sync_cmd(pocket: &ApiStub, pinboard: &ApiStub, timestamp_file: &Path) -> assert_cmd::Command {
    sync_cmd_with_delay(pocket, pinboard, timestamp_file, 0)
}

#[allow(dead_code)]
pub fn sync_cmd_with_delay(
    pocket: &ApiStub,
    pinboard: &ApiStub,
    timestamp_file: &Path,
    delay_ms: u64,
) -> assert_cmd::Command {
    let delay_ms = delay_ms.to_string();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pocketpin");
    cmd.env("POCKET_CONSUMER_KEY", "ck-test")
        .env("POCKET_ACCESS_TOKEN", "at-test")
        .env("PINBOARD_USERNAME", "tester")
        .env("PINBOARD_API_TOKEN", "tester:SECRET0123")
        .env("POCKET_API_ENDPOINT", format!("{}/v3/get", pocket.base_url))
        .env(
            "PINBOARD_API_ENDPOINT",
            format!("{}/v1/posts/add", pinboard.base_url),
        )
        .args([
            "--timestamp-file",
            timestamp_file.to_str().expect("utf8 temp path"),
            "--delay-ms",
            delay_ms.as_str(),
        ]);
    cmd
}
