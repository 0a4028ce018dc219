use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use reqwest::Url;
use tracing::{info, warn};

use crate::api::Backend;
use crate::error::{ActionError, ApiError};
use crate::forms::{FormCommand, FormStatus, ModalHost, Refresh, TextField, cycle_focus};
use crate::models::{CreateWorkspaceRequest, Document, Session, UploadRequest, Workspace};

const PDF_SIGNATURE: &[u8] = b"%PDF-";

pub enum Modal {
    Upload(UploadModal),
    CreateWorkspace(CreateWorkspaceModal),
    AddToWorkspace(AddToWorkspaceModal),
    ViewDocument(ViewDocumentModal),
}

impl Modal {
    pub fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        if self.is_submitting() {
            return FormCommand::None;
        }
        match self {
            Modal::Upload(modal) => modal.handle_key(key),
            Modal::CreateWorkspace(modal) => modal.handle_key(key),
            Modal::AddToWorkspace(modal) => modal.handle_key(key),
            Modal::ViewDocument(modal) => modal.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.is_submitting() {
            return;
        }
        match self {
            Modal::Upload(modal) => modal.drop_file(text),
            Modal::CreateWorkspace(modal) => modal.title.push_str(text),
            Modal::AddToWorkspace(_) | Modal::ViewDocument(_) => {}
        }
    }

    pub fn prepare(&mut self) -> bool {
        match self {
            Modal::Upload(modal) => modal.prepare(),
            Modal::CreateWorkspace(modal) => modal.status.begin(modal.validate()).is_some(),
            Modal::AddToWorkspace(modal) => modal.status.begin(modal.validate()).is_some(),
            Modal::ViewDocument(_) => false,
        }
    }

    pub fn submit(&mut self, api: &dyn Backend, session: &Session, host: &mut dyn ModalHost) {
        match self {
            Modal::Upload(modal) => modal.submit(api, session, host),
            Modal::CreateWorkspace(modal) => modal.submit(api, session, host),
            Modal::AddToWorkspace(modal) => modal.submit(api, host),
            Modal::ViewDocument(_) => {}
        }
    }

    pub fn is_submitting(&self) -> bool {
        match self {
            Modal::Upload(modal) => modal.status.is_submitting(),
            Modal::CreateWorkspace(modal) => modal.status.is_submitting(),
            Modal::AddToWorkspace(modal) => modal.status.is_submitting(),
            Modal::ViewDocument(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    Title,
    File,
}

pub struct UploadModal {
    pub title: TextField,
    pub file: TextField,
    pub focus: UploadField,
    pub workspace: Option<(u64, String)>,
    pub status: FormStatus,
    prepared: Option<ValidUpload>,
}

struct ValidUpload {
    title: String,
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadModal {
    pub fn new(workspace: Option<&Workspace>) -> Self {
        Self {
            title: TextField::new(),
            file: TextField::new(),
            focus: UploadField::Title,
            workspace: workspace.map(|workspace| (workspace.id, workspace.title.clone())),
            status: FormStatus::default(),
            prepared: None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        match key.code {
            KeyCode::Esc => FormCommand::Close,
            KeyCode::Enter => FormCommand::Submit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    UploadField::Title => UploadField::File,
                    UploadField::File => UploadField::Title,
                };
                FormCommand::None
            }
            _ => {
                match self.focus {
                    UploadField::Title => self.title.handle_key(key),
                    UploadField::File => self.file.handle_key(key),
                };
                FormCommand::None
            }
        }
    }

    pub fn drop_file(&mut self, text: &str) {
        if let Some(path) = dropped_path(text) {
            self.file.set(path);
            self.focus = UploadField::File;
        }
    }

    fn validate(&self) -> Result<ValidUpload, ActionError> {
        let title = self.title.value().trim();
        let path = self.file.value().trim();
        if title.is_empty() || path.is_empty() {
            return Err(ActionError::validation("Title and PDF file are required."));
        }
        let (file_name, bytes) = load_pdf(&expand_home(path))?;
        Ok(ValidUpload {
            title: title.to_string(),
            file_name,
            bytes,
        })
    }

    fn prepare(&mut self) -> bool {
        let validated = self.validate();
        self.prepared = self.status.begin(validated);
        self.prepared.is_some()
    }

    fn submit(&mut self, api: &dyn Backend, session: &Session, host: &mut dyn ModalHost) {
        let upload = match self.prepared.take() {
            Some(upload) => upload,
            None => {
                let Some(upload) = self.status.begin(self.validate()) else {
                    return;
                };
                upload
            }
        };
        let request = UploadRequest {
            title: upload.title,
            file_name: upload.file_name,
            bytes: upload.bytes,
            user_id: session.user_id,
            workspace_id: self.workspace.as_ref().map(|(id, _)| *id),
        };

        match api.upload_document(&request) {
            Ok(()) => {
                info!(title = %request.title, size = request.bytes.len(), "document uploaded");
                self.status.succeed();
                host.on_success(Refresh::ALL);
                host.on_close();
            }
            Err(err) => {
                warn!(error = %err, "upload failed");
                self.status.fail(ActionError::from_api(err, "Upload failed"));
            }
        }
    }
}

pub fn load_pdf(path: &Path) -> Result<(String, Vec<u8>), ActionError> {
    let is_pdf_name = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf_name {
        return Err(ActionError::validation("Only PDF files are accepted."));
    }

    let bytes = fs::read(path).map_err(|err| {
        ActionError::validation(format!("Could not read {}: {err}", path.display()))
    })?;
    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err(ActionError::validation("Only PDF files are accepted."));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    Ok((file_name, bytes))
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

pub fn dropped_path(text: &str) -> Option<String> {
    let text = text.trim();
    let chars: Vec<char> = text.chars().collect();
    let first = *chars.first()?;
    let mut path = String::new();

    if first == '\'' || first == '"' {
        for &ch in chars.iter().skip(1) {
            if ch == first {
                break;
            }
            path.push(ch);
        }
    } else {
        let mut index = 0;
        while index < chars.len() {
            let ch = chars[index];
            let next = chars.get(index + 1).copied();
            match (ch, next) {
                ('\\', Some(escaped)) if escaped.is_whitespace() || "'\"\\()&".contains(escaped) => {
                    path.push(escaped);
                    index += 2;
                    continue;
                }
                (ch, _) if ch.is_whitespace() => break,
                (ch, _) => path.push(ch),
            }
            index += 1;
        }
    }

    if path.starts_with("file:") {
        let url = Url::parse(&path).ok()?;
        let local = url.to_file_path().ok()?;
        return Some(local.to_string_lossy().into_owned());
    }
    (!path.is_empty()).then_some(path)
}

pub struct CreateWorkspaceModal {
    pub title: TextField,
    pub status: FormStatus,
}

impl CreateWorkspaceModal {
    pub fn new() -> Self {
        Self {
            title: TextField::new(),
            status: FormStatus::default(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        match key.code {
            KeyCode::Esc => FormCommand::Close,
            KeyCode::Enter => FormCommand::Submit,
            _ => {
                self.title.handle_key(key);
                FormCommand::None
            }
        }
    }

    fn validate(&self) -> Result<String, ActionError> {
        let title = self.title.value().trim();
        if title.is_empty() {
            return Err(ActionError::validation("Title is required"));
        }
        Ok(title.to_string())
    }

    fn submit(&mut self, api: &dyn Backend, session: &Session, host: &mut dyn ModalHost) {
        let Some(title) = self.status.begin(self.validate()) else {
            return;
        };
        let request = CreateWorkspaceRequest {
            user_id: session.user_id,
            title,
        };
        match api.create_workspace(&request) {
            Ok(()) => {
                info!(title = %request.title, "workspace created");
                self.status.succeed();
                host.on_success(Refresh::WORKSPACES);
                host.on_close();
            }
            Err(err) => {
                warn!(error = %err, "workspace creation failed");
                self.status
                    .fail(ActionError::from_api(err, "Failed to create workspace"));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFocus {
    Workspaces,
    Documents,
}

pub struct AddToWorkspaceModal {
    pub workspaces: Vec<Choice>,
    pub documents: Vec<Choice>,
    pub selected_workspace: Option<u64>,
    /// Kept in toggle order; requests go out in this order.
    pub selected_documents: Vec<u64>,
    pub focus: AddFocus,
    pub workspace_state: ListState,
    pub document_state: ListState,
    pub status: FormStatus,
}

impl AddToWorkspaceModal {
    pub fn new(documents: &[Document], workspaces: &[Workspace], preselected: Option<u64>) -> Self {
        let mut workspace_state = ListState::default();
        workspace_state.select((!workspaces.is_empty()).then_some(0));
        let mut document_state = ListState::default();
        let preselected_index =
            preselected.and_then(|id| documents.iter().position(|document| document.id == id));
        document_state.select(preselected_index.or((!documents.is_empty()).then_some(0)));

        Self {
            workspaces: workspaces
                .iter()
                .map(|workspace| Choice {
                    id: workspace.id,
                    title: workspace.title.clone(),
                })
                .collect(),
            documents: documents
                .iter()
                .map(|document| Choice {
                    id: document.id,
                    title: document.title.clone(),
                })
                .collect(),
            selected_workspace: None,
            selected_documents: preselected_index
                .map(|index| vec![documents[index].id])
                .unwrap_or_default(),
            focus: AddFocus::Workspaces,
            workspace_state,
            document_state,
            status: FormStatus::default(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        match key.code {
            KeyCode::Esc => return FormCommand::Close,
            KeyCode::Enter => return FormCommand::Submit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.focus = match self.focus {
                    AddFocus::Workspaces => AddFocus::Documents,
                    AddFocus::Documents => AddFocus::Workspaces,
                };
            }
            KeyCode::Up => self.move_selection(true),
            KeyCode::Down => self.move_selection(false),
            KeyCode::Char(' ') => self.toggle_current(),
            _ => {}
        }
        FormCommand::None
    }

    fn move_selection(&mut self, backwards: bool) {
        let (state, len) = match self.focus {
            AddFocus::Workspaces => (&mut self.workspace_state, self.workspaces.len()),
            AddFocus::Documents => (&mut self.document_state, self.documents.len()),
        };
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        state.select(Some(cycle_focus(current, len, backwards)));
    }

    fn toggle_current(&mut self) {
        match self.focus {
            AddFocus::Workspaces => {
                let chosen = self
                    .workspace_state
                    .selected()
                    .and_then(|index| self.workspaces.get(index))
                    .map(|choice| choice.id);
                if chosen.is_some() {
                    self.selected_workspace = chosen;
                }
            }
            AddFocus::Documents => {
                if let Some(id) = self
                    .document_state
                    .selected()
                    .and_then(|index| self.documents.get(index))
                    .map(|choice| choice.id)
                {
                    self.toggle_document(id);
                }
            }
        }
    }

    pub fn toggle_document(&mut self, id: u64) {
        if let Some(position) = self.selected_documents.iter().position(|doc| *doc == id) {
            self.selected_documents.remove(position);
        } else {
            self.selected_documents.push(id);
        }
    }

    pub fn select_workspace(&mut self, id: u64) {
        self.selected_workspace = Some(id);
    }

    pub fn is_document_selected(&self, id: u64) -> bool {
        self.selected_documents.contains(&id)
    }

    fn validate(&self) -> Result<(Vec<u64>, u64), ActionError> {
        match self.selected_workspace {
            Some(workspace_id) if !self.selected_documents.is_empty() => {
                Ok((self.selected_documents.clone(), workspace_id))
            }
            _ => Err(ActionError::validation(
                "Please select at least one document and a workspace",
            )),
        }
    }

    /// The first failure stops the run; earlier documents stay assigned.
    fn submit(&mut self, api: &dyn Backend, host: &mut dyn ModalHost) {
        let Some((documents, workspace_id)) = self.status.begin(self.validate()) else {
            return;
        };

        for document_id in documents {
            if let Err(err) = api.add_document_to_workspace(document_id, workspace_id) {
                warn!(document_id, workspace_id, error = %err, "assignment stopped");
                let message = format!("Failed to add document ID {document_id}");
                let failure = match err {
                    ApiError::Network(reason) => ActionError::Network(format!("{message}: {reason}")),
                    ApiError::Server { .. } | ApiError::Decode(_) => ActionError::Server(message),
                };
                self.status.fail(failure);
                return;
            }
        }

        info!(workspace_id, count = self.selected_documents.len(), "documents assigned");
        self.status.succeed();
        host.on_success(Refresh::DOCUMENTS);
        host.on_close();
    }
}

pub struct ViewDocumentModal {
    pub document: Document,
    pub workspace_label: String,
    pub scroll: u16,
}

impl ViewDocumentModal {
    pub fn new(document: Document, workspace_label: String) -> Self {
        Self {
            document,
            workspace_label,
            scroll: 0,
        }
    }

    pub fn text(&self) -> &str {
        self.document
            .extracted_text
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return FormCommand::Close,
            KeyCode::Char('c') => return FormCommand::Copy(self.text().to_string()),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
        FormCommand::None
    }

    fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.text().lines().count().saturating_sub(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }
}
