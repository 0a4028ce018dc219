use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{server_message, ApiError};
use crate::models::{
    AddDocumentRequest, CreateWorkspaceRequest, DeleteWorkspaceRequest, Document, LoginRequest,
    RegisterRequest, RemoveDocumentRequest, UploadRequest, Workspace,
};

pub trait Backend {
    fn health(&self) -> Result<(), ApiError>;
    fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
    fn login(&self, request: &LoginRequest) -> Result<(), ApiError>;
    fn list_documents(&self, user_id: u64) -> Result<Vec<Document>, ApiError>;
    fn list_workspaces(&self, user_id: u64) -> Result<Vec<Workspace>, ApiError>;
    fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<(), ApiError>;
    fn delete_workspace(&self, workspace_id: u64) -> Result<(), ApiError>;
    fn add_document_to_workspace(&self, document_id: u64, workspace_id: u64)
    -> Result<(), ApiError>;
    fn remove_document_from_workspace(&self, document_id: u64) -> Result<(), ApiError>;
    fn upload_document(&self, request: &UploadRequest) -> Result<(), ApiError>;
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("research-assistant-tui")
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_for_user<T: DeserializeOwned>(&self, path: &str, user_id: u64) -> Result<T, ApiError> {
        let url = reqwest::Url::parse_with_params(
            &self.url(path),
            &[("user_id", user_id.to_string())],
        )
        .map_err(|err| ApiError::Network(err.to_string()))?;
        let response = self.send(self.client.get(url.as_str()), "GET", url.as_str())?;
        response
            .json::<T>()
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(self.client.post(&url).json(body), "POST", &url)
            .map(|_| ())
    }

    fn send(&self, request: RequestBuilder, method: &str, url: &str) -> Result<Response, ApiError> {
        debug!(method, url, "sending request");
        let response = request
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            debug!(method, url, status = status.as_u16(), "request failed");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        Ok(response)
    }
}

impl Backend for ApiClient {
    fn health(&self) -> Result<(), ApiError> {
        let url = self.url("/health");
        self.send(self.client.get(&url), "GET", &url).map(|_| ())
    }

    fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_json("/register", request)
    }

    fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.post_json("/login", request)
    }

    fn list_documents(&self, user_id: u64) -> Result<Vec<Document>, ApiError> {
        // Go's encoder writes `null` for an empty slice.
        self.get_for_user::<Option<Vec<Document>>>("/documents/get", user_id)
            .map(Option::unwrap_or_default)
    }

    fn list_workspaces(&self, user_id: u64) -> Result<Vec<Workspace>, ApiError> {
        self.get_for_user::<Option<Vec<Workspace>>>("/workspace/get", user_id)
            .map(Option::unwrap_or_default)
    }

    fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<(), ApiError> {
        self.post_json("/workspace/create", request)
    }

    fn delete_workspace(&self, workspace_id: u64) -> Result<(), ApiError> {
        self.post_json("/workspace/delete", &DeleteWorkspaceRequest { id: workspace_id })
    }

    fn add_document_to_workspace(
        &self,
        document_id: u64,
        workspace_id: u64,
    ) -> Result<(), ApiError> {
        self.post_json(
            "/workspace/add-document",
            &AddDocumentRequest {
                document_id,
                workspace_id,
            },
        )
    }

    fn remove_document_from_workspace(&self, document_id: u64) -> Result<(), ApiError> {
        self.post_json(
            "/workspace/remove-document",
            &RemoveDocumentRequest { document_id },
        )
    }

    fn upload_document(&self, request: &UploadRequest) -> Result<(), ApiError> {
        let pdf = Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let mut form = Form::new()
            .text("title", request.title.clone())
            .part("pdf", pdf)
            .text("user_id", request.user_id.to_string());
        if let Some(workspace_id) = request.workspace_id {
            form = form.text("workspace_id", workspace_id.to_string());
        }

        let url = self.url("/documents/upload");
        self.send(self.client.post(&url).multipart(form), "POST", &url)
            .map(|_| ())
    }
}

#[cfg(test)]
pub mod fake {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Backend;
    use crate::error::ApiError;
    use crate::models::{
        CreateWorkspaceRequest, Document, LoginRequest, RegisterRequest, UploadRequest, Workspace,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Health,
        Register(String),
        Login(String),
        ListDocuments(u64),
        ListWorkspaces(u64),
        CreateWorkspace(u64, String),
        DeleteWorkspace(u64),
        AddDocument(u64, u64),
        RemoveDocument(u64),
        Upload {
            title: String,
            file_name: String,
            user_id: u64,
            workspace_id: Option<u64>,
        },
    }

    #[derive(Default)]
    struct State {
        calls: Vec<Call>,
        documents: Vec<Document>,
        workspaces: Vec<Workspace>,
        failures: Vec<(Call, ApiError)>,
    }

    #[derive(Clone, Default)]
    pub struct FakeBackend {
        state: Rc<RefCell<State>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_data(documents: Vec<Document>, workspaces: Vec<Workspace>) -> Self {
            let fake = Self::default();
            {
                let mut state = fake.state.borrow_mut();
                state.documents = documents;
                state.workspaces = workspaces;
            }
            fake
        }

        pub fn fail_on(&self, call: Call, error: ApiError) {
            self.state.borrow_mut().failures.push((call, error));
        }

        pub fn calls(&self) -> Vec<Call> {
            self.state.borrow().calls.clone()
        }

        pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
            self.state.borrow().calls.iter().filter(|call| predicate(call)).count()
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            let mut state = self.state.borrow_mut();
            state.calls.push(call.clone());
            match state.failures.iter().find(|(failing, _)| *failing == call) {
                Some((_, error)) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    pub fn server_error(message: &str) -> ApiError {
        ApiError::Server {
            status: 500,
            message: message.to_string(),
        }
    }

    impl Backend for FakeBackend {
        fn health(&self) -> Result<(), ApiError> {
            self.record(Call::Health)
        }

        fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
            self.record(Call::Register(request.username.clone()))
        }

        fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
            self.record(Call::Login(request.username.clone()))
        }

        fn list_documents(&self, user_id: u64) -> Result<Vec<Document>, ApiError> {
            self.record(Call::ListDocuments(user_id))?;
            Ok(self.state.borrow().documents.clone())
        }

        fn list_workspaces(&self, user_id: u64) -> Result<Vec<Workspace>, ApiError> {
            self.record(Call::ListWorkspaces(user_id))?;
            Ok(self.state.borrow().workspaces.clone())
        }

        fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<(), ApiError> {
            self.record(Call::CreateWorkspace(request.user_id, request.title.clone()))
        }

        fn delete_workspace(&self, workspace_id: u64) -> Result<(), ApiError> {
            self.record(Call::DeleteWorkspace(workspace_id))?;
            self.state
                .borrow_mut()
                .workspaces
                .retain(|workspace| workspace.id != workspace_id);
            Ok(())
        }

        fn add_document_to_workspace(
            &self,
            document_id: u64,
            workspace_id: u64,
        ) -> Result<(), ApiError> {
            self.record(Call::AddDocument(document_id, workspace_id))
        }

        fn remove_document_from_workspace(&self, document_id: u64) -> Result<(), ApiError> {
            self.record(Call::RemoveDocument(document_id))
        }

        fn upload_document(&self, request: &UploadRequest) -> Result<(), ApiError> {
            self.record(Call::Upload {
                title: request.title.clone(),
                file_name: request.file_name.clone(),
                user_id: request.user_id,
                workspace_id: request.workspace_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    fn serve_once(status: &str, body: &str) -> (ApiClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        let client = ApiClient::new(&base_url, Duration::from_secs(5)).unwrap();
        (client, handle)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = stream.read(&mut buf).unwrap();
            if read == 0 {
                break;
            }
            data.extend_from_slice(&buf[..read]);
            let Some(end) = data.windows(4).position(|window| window == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&data[..end]).to_ascii_lowercase();
            let received = data.len() - end - 4;
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok());
            let complete = match length {
                Some(length) => received >= length,
                None if head.contains("transfer-encoding: chunked") => data.ends_with(b"0\r\n\r\n"),
                None => true,
            };
            if complete {
                break;
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn json_body(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn upload(workspace_id: Option<u64>) -> UploadRequest {
        UploadRequest {
            title: "Paper A".to_string(),
            file_name: "paper.pdf".to_string(),
            bytes: b"%PDF-1.7 test".to_vec(),
            user_id: 1,
            workspace_id,
        }
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/workspace/get"), "http://localhost:8080/workspace/get");
    }

    #[test]
    fn unreachable_server_is_a_network_error() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.list_documents(1).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn null_document_list_is_empty() {
        let (client, server) = serve_once("200 OK", "null");
        assert_eq!(client.list_documents(7).unwrap(), Vec::<Document>::new());
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /documents/get?user_id=7 HTTP/1.1"));
    }

    #[test]
    fn workspaces_are_listed_for_the_user() {
        let (client, server) = serve_once(
            "200 OK",
            r#"[{"id":3,"title":"ML","created_at":"2026-02-01T00:00:00Z","user_id":2}]"#,
        );
        let workspaces = client.list_workspaces(2).unwrap();
        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].id, 3);
        assert_eq!(workspaces[0].title, "ML");
        let request = server.join().unwrap();
        assert!(request.starts_with("GET /workspace/get?user_id=2 HTTP/1.1"));
    }

    #[test]
    fn workspace_mutations_post_expected_bodies() {
        let (client, server) = serve_once("200 OK", "");
        client
            .create_workspace(&CreateWorkspaceRequest {
                user_id: 1,
                title: "Reading".to_string(),
            })
            .unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /workspace/create HTTP/1.1"));
        assert_eq!(json_body(&request), serde_json::json!({"user_id": 1, "title": "Reading"}));

        let (client, server) = serve_once("200 OK", "");
        client.delete_workspace(4).unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /workspace/delete HTTP/1.1"));
        assert_eq!(json_body(&request), serde_json::json!({"id": 4}));

        let (client, server) = serve_once("200 OK", "");
        client.add_document_to_workspace(2, 5).unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /workspace/add-document HTTP/1.1"));
        assert_eq!(
            json_body(&request),
            serde_json::json!({"document_id": 2, "workspace_id": 5})
        );

        let (client, server) = serve_once("200 OK", "");
        client.remove_document_from_workspace(2).unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /workspace/remove-document HTTP/1.1"));
        assert_eq!(json_body(&request), serde_json::json!({"document_id": 2}));
    }

    #[test]
    fn error_field_becomes_server_message() {
        let (client, server) = serve_once(
            "400 Bad Request",
            r#"{"error":"Title and user_id are required"}"#,
        );
        let err = client.delete_workspace(4).unwrap_err();
        server.join().unwrap();
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Title and user_id are required".to_string(),
            }
        );
    }

    #[test]
    fn upload_sends_multipart_parts() {
        let (client, server) = serve_once("200 OK", "");
        client.upload_document(&upload(None)).unwrap();
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /documents/upload HTTP/1.1"));
        assert!(request.contains("name=\"title\"\r\n\r\nPaper A\r\n"));
        assert!(request.contains("name=\"pdf\"; filename=\"paper.pdf\""));
        assert!(request.contains("application/pdf"));
        assert!(request.contains("%PDF-1.7 test"));
        assert!(request.contains("name=\"user_id\"\r\n\r\n1\r\n"));
        assert!(!request.contains("name=\"workspace_id\""));

        let (client, server) = serve_once("200 OK", "");
        client.upload_document(&upload(Some(9))).unwrap();
        let request = server.join().unwrap();
        assert!(request.contains("name=\"workspace_id\"\r\n\r\n9\r\n"));
    }
}
