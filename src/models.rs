use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: u64,
    pub username: Option<String>,
}

impl Session {
    pub fn new(user_id: u64, username: Option<String>) -> Self {
        Self { user_id, username }
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("guest")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Document {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "zero_as_none")]
    pub workspace_id: Option<u64>,
    pub uploaded_at: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Workspace {
    pub id: u64,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkspaceRequest {
    pub user_id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteWorkspaceRequest {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddDocumentRequest {
    pub document_id: u64,
    pub workspace_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveDocumentRequest {
    pub document_id: u64,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub user_id: u64,
    pub workspace_id: Option<u64>,
}

// The backend stores "no workspace" as 0 or null depending on the code path.
fn zero_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<u64>::deserialize(deserializer)?;
    Ok(value.filter(|id| *id != 0))
}
