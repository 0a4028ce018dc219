use std::collections::HashMap;

use crate::models::{Document, Workspace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Unassigned,
    In(String),
    Orphaned(u64),
}

impl Placement {
    pub fn label(&self) -> String {
        match self {
            Placement::Unassigned => "No workspace".to_string(),
            Placement::In(title) => title.clone(),
            Placement::Orphaned(id) => format!("Missing workspace #{id}"),
        }
    }
}

pub fn placement(document: &Document, workspaces: &[Workspace]) -> Placement {
    match document.workspace_id {
        None => Placement::Unassigned,
        Some(id) => workspaces
            .iter()
            .find(|workspace| workspace.id == id)
            .map(|workspace| Placement::In(workspace.title.clone()))
            .unwrap_or(Placement::Orphaned(id)),
    }
}

pub fn visible_documents<'a>(documents: &'a [Document], open: Option<u64>) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|document| open.is_none() || document.workspace_id == open)
        .collect()
}

pub fn document_counts(documents: &[Document]) -> HashMap<u64, usize> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for workspace_id in documents.iter().filter_map(|document| document.workspace_id) {
        *counts.entry(workspace_id).or_insert(0) += 1;
    }
    counts
}
