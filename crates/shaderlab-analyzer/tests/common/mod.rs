#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use shaderlab_analyzer::ShaderLabLanguageServer;
use tower::{Service, ServiceExt};
use tower_lsp::{
    ClientSocket, LspService,
    jsonrpc::{Request, Response},
    lsp_types::{DidOpenTextDocumentParams, InitializedParams, Position, TextDocumentItem, Url},
};

static NEXT_WORKSPACE: AtomicU64 = AtomicU64::new(0);

/// A throwaway project directory under the system temp dir.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(label: &str) -> Self {
        let id = NEXT_WORKSPACE.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!("shaderlab-analyzer-it-{label}-{}-{id}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).expect("create workspace");
        Self {
            root: root.canonicalize().expect("canonical workspace root"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_uri(&self) -> Url {
        Url::from_directory_path(&self.root).expect("workspace root URI")
    }

    pub fn write(
        &self,
        relative: &str,
        text: &str,
    ) -> Url {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(&path, text).expect("write fixture");
        self.url(relative)
    }

    pub fn url(
        &self,
        relative: &str,
    ) -> Url {
        Url::from_file_path(self.root.join(relative)).expect("fixture URI")
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// A server under test plus the client half of its socket.
pub struct Harness {
    pub service: LspService<ShaderLabLanguageServer>,
    pub socket: ClientSocket,
    /// Server-to-client notifications observed so far.
    pub notifications: Vec<Request>,
    /// Server-to-client requests answered so far.
    pub server_requests: Vec<Request>,
    next_id: i64,
}

impl Harness {
    pub async fn start(initialize_params: Value) -> (Self, Response) {
        let (service, socket) = LspService::new(|client| ShaderLabLanguageServer::new(client, false));
        let mut harness = Self {
            service,
            socket,
            notifications: Vec::new(),
            server_requests: Vec::new(),
            next_id: 1,
        };
        let response = harness.request("initialize", initialize_params).await;
        harness.notify("initialized", InitializedParams {}).await;
        (harness, response)
    }

    /// Initialize with `root` as the only workspace folder.
    pub async fn with_root(
        root: &Url,
        options: Value,
    ) -> Self {
        let params = json!({
            "capabilities": {},
            "rootUri": root,
            "initializationOptions": options,
        });
        let (harness, response) = Self::start(params).await;
        assert!(response.is_ok(), "initialize failed: {:?}", response.error());
        harness
    }

    pub async fn notify<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) {
        let request =
            Request::build(method).params(serde_json::to_value(params).expect("serialize notification params")).finish();
        let response = self.call(request).await;
        assert!(response.is_none(), "{method} should be handled as notification");
    }

    pub async fn request<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) -> Response {
        let id = self.next_id;
        self.next_id += 1;
        let request = Request::build(method)
            .params(serde_json::to_value(params).expect("serialize request params"))
            .id(id)
            .finish();
        self.call(request).await.expect("request should return response")
    }

    /// The deserialized result of a successful request.
    pub async fn request_result<P: serde::Serialize, R: serde::de::DeserializeOwned>(
        &mut self,
        method: &'static str,
        params: P,
    ) -> R {
        let response = self.request(method, params).await;
        assert!(response.is_ok(), "{method} failed: {:?}", response.error());
        let result = response.result().cloned().unwrap_or(Value::Null);
        serde_json::from_value(result).expect("deserialize response")
    }

    pub async fn open(
        &mut self,
        uri: &Url,
        language_id: &str,
        text: &str,
    ) {
        self.notify(
            "textDocument/didOpen",
            DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: uri.clone(),
                    language_id: language_id.to_owned(),
                    version: 1,
                    text: text.to_owned(),
                },
            },
        )
        .await;
    }

    /// Reads client-bound messages until a notification or request named
    /// `method` shows up. Requests are answered with `null`.
    pub async fn wait_for(
        &mut self,
        method: &str,
    ) -> Request {
        if let Some(index) = self.notifications.iter().position(|message| message.method() == method) {
            return self.notifications.remove(index);
        }
        if let Some(index) = self.server_requests.iter().position(|message| message.method() == method) {
            return self.server_requests.remove(index);
        }
        loop {
            let message = tokio::time::timeout(Duration::from_secs(20), self.socket.next())
                .await
                .expect("timed out waiting for server message")
                .expect("client socket unexpectedly closed");
            if let Some(id) = message.id().cloned() {
                self.socket.send(Response::from_ok(id, json!(null))).await.expect("answer server request");
            }
            if message.method() == method {
                return message;
            }
            if message.id().is_some() {
                self.server_requests.push(message);
            } else {
                self.notifications.push(message);
            }
        }
    }

    async fn call(
        &mut self,
        request: Request,
    ) -> Option<Response> {
        let service = &mut self.service;
        let mut call_fut =
            Box::pin(async move { service.ready().await.expect("service ready").call(request).await.expect("call") });

        loop {
            tokio::select! {
                response = &mut call_fut => return response,
                maybe_message = self.socket.next() => {
                    let message = maybe_message.expect("client socket unexpectedly closed while call in flight");
                    if let Some(id) = message.id().cloned() {
                        self.socket
                            .send(Response::from_ok(id, json!(null)))
                            .await
                            .expect("failed to send synthetic client response");
                        self.server_requests.push(message);
                    } else {
                        self.notifications.push(message);
                    }
                }
            }
        }
    }
}

pub fn position_of(
    source: &str,
    needle: &str,
) -> Position {
    position_of_nth(source, needle, 0)
}

pub fn position_of_nth(
    source: &str,
    needle: &str,
    nth: usize,
) -> Position {
    assert!(!needle.is_empty(), "needle must not be empty");
    let mut from = 0usize;
    let mut current = 0usize;

    loop {
        let Some(idx) = source[from..].find(needle) else {
            panic!("needle not found: {needle}");
        };
        let absolute = from + idx;
        if current == nth {
            let before = &source[..absolute];
            let line = before.as_bytes().iter().filter(|&&b| b == b'\n').count() as u32;
            let col = before
                .rsplit_once('\n')
                .map(|(_, tail)| tail.chars().count() as u32)
                .unwrap_or_else(|| before.chars().count() as u32);
            return Position::new(line, col);
        }
        current += 1;
        from = absolute + needle.len();
    }
}
