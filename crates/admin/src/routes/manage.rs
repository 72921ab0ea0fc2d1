//! Manage Data view: browse, edit and delete documents.

use std::collections::HashMap;

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use eshop_core::{CollectionName, DocumentId};

use super::{NOT_FOUND_MESSAGE, Notice, Sidebar, notices_from_query};
use crate::components::DataTable;
use crate::db::{DocumentRepository, LIST_LIMIT, RepositoryError};
use crate::error::{AppError, render};
use crate::services::{FieldView, RecordEditor, Selection};
use crate::state::AppState;

/// Query parameters for the Manage Data page.
#[derive(Debug, Default, Deserialize)]
pub struct ManageQuery {
    pub collection: Option<String>,
    pub id: Option<String>,
    pub notice: Option<String>,
}

/// Entry of the collection selector.
#[derive(Debug, Clone)]
pub struct CollectionOption {
    pub name: &'static str,
    pub selected: bool,
}

/// The selected document in the editor panel.
#[derive(Debug, Clone)]
pub struct EditorView {
    pub id: String,
    pub kind: &'static str,
    pub summary: String,
    pub fields: Vec<FieldView>,
}

/// Manage Data page template.
#[derive(Template)]
#[template(path = "manage.html")]
pub struct ManageTemplate {
    pub sidebar: Sidebar,
    pub notices: Vec<Notice>,
    pub collections: Vec<CollectionOption>,
    pub collection: &'static str,
    pub table: DataTable,
    pub list_limit: i64,
    pub row_ids: Vec<String>,
    pub selected_id: String,
    pub editor: Option<EditorView>,
}

/// Manage Data page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ManageQuery>,
) -> Result<Response, AppError> {
    let collection = parse_collection(query.collection.as_deref().unwrap_or_default())?;
    let notices = notices_from_query(query.notice.as_deref());

    let page = render_manage(&state, collection, query.id.as_deref(), notices).await?;
    Ok(page.into_response())
}

/// Save the changed scalar fields of one document.
#[instrument(skip(state, form))]
pub async fn save(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let collection = parse_collection(&collection)?;
    let document_id = parse_id(&id)?;

    match RecordEditor::new(state.db())
        .save(collection, &document_id, &form)
        .await
    {
        Ok(saved) => {
            let notice = if saved.is_unchanged() {
                "unchanged"
            } else {
                tracing::info!(%collection, id = %document_id, fields = ?saved.changed, "Document updated");
                "saved"
            };
            Ok(Redirect::to(&format!(
                "/manage?collection={collection}&id={document_id}&notice={notice}"
            ))
            .into_response())
        }
        Err(RepositoryError::NotFound) => Ok(Redirect::to(&format!(
            "/manage?collection={collection}&notice=missing"
        ))
        .into_response()),
        Err(e) => {
            tracing::error!(%collection, id = %document_id, error = %e, "Failed to update document");
            let notices = vec![Notice::error(format!("Failed to save changes: {e}"))];
            let page = render_manage(&state, collection, Some(id.as_str()), notices).await?;
            Ok(page.into_response())
        }
    }
}

/// Delete one document.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let collection = parse_collection(&collection)?;
    let document_id = parse_id(&id)?;

    match RecordEditor::new(state.db())
        .delete(collection, &document_id)
        .await
    {
        Ok(deleted) => {
            tracing::info!(%collection, id = %document_id, deleted, "Document delete requested");
            Ok(Redirect::to(&format!("/manage?collection={collection}&notice=deleted")).into_response())
        }
        Err(e) => {
            tracing::error!(%collection, id = %document_id, error = %e, "Failed to delete document");
            let notices = vec![Notice::error(format!("Failed to delete document: {e}"))];
            let page = render_manage(&state, collection, Some(id.as_str()), notices).await?;
            Ok(page.into_response())
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the page for `collection`, selecting `requested_id` or, when none
/// is given, the first listed document.
async fn render_manage(
    state: &AppState,
    collection: CollectionName,
    requested_id: Option<&str>,
    mut notices: Vec<Notice>,
) -> Result<Html<String>, AppError> {
    let documents = match DocumentRepository::new(state.db())
        .list(collection, LIST_LIMIT)
        .await
    {
        Ok(documents) => documents,
        Err(e) => {
            tracing::error!(%collection, error = %e, "Failed to list documents");
            notices.push(Notice::error(format!("Failed to list {collection}: {e}")));
            Vec::new()
        }
    };

    let table = DataTable::from_documents(collection.as_str(), &documents)
        .empty_state(&format!("No documents in {collection}"));
    let row_ids = table.row_ids();

    let selected_id = requested_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| row_ids.first().cloned())
        .unwrap_or_default();

    let editor = if selected_id.is_empty() {
        None
    } else {
        select(state, collection, &selected_id, &mut notices).await
    };

    render(&ManageTemplate {
        sidebar: Sidebar::load(state, "/manage").await,
        notices,
        collections: CollectionName::ALL
            .iter()
            .map(|c| CollectionOption {
                name: c.as_str(),
                selected: *c == collection,
            })
            .collect(),
        collection: collection.as_str(),
        table,
        list_limit: LIST_LIMIT,
        row_ids,
        selected_id,
        editor,
    })
}

/// Load the selected document, turning every failure into a banner.
async fn select(
    state: &AppState,
    collection: CollectionName,
    id: &str,
    notices: &mut Vec<Notice>,
) -> Option<EditorView> {
    let document_id = match DocumentId::parse(id) {
        Ok(document_id) => document_id,
        Err(e) => {
            notices.push(Notice::error(format!("Invalid document id: {e}")));
            return None;
        }
    };

    match RecordEditor::new(state.db())
        .select(collection, &document_id)
        .await
    {
        Ok(Selection::Found { record, fields }) => Some(EditorView {
            id: document_id.to_string(),
            kind: record.kind(),
            summary: record.summary(),
            fields,
        }),
        Ok(Selection::NotFound) => {
            notices.push(Notice::warning(NOT_FOUND_MESSAGE));
            None
        }
        Err(e) => {
            tracing::error!(%collection, id = %document_id, error = %e, "Failed to load document");
            notices.push(Notice::error(format!("Failed to load document: {e}")));
            None
        }
    }
}

/// An empty name selects the default collection.
fn parse_collection(name: &str) -> Result<CollectionName, AppError> {
    if name.trim().is_empty() {
        return Ok(CollectionName::default());
    }
    name.trim().parse().map_err(AppError::BadRequest)
}

fn parse_id(id: &str) -> Result<DocumentId, AppError> {
    DocumentId::parse(id).map_err(|e| AppError::BadRequest(format!("invalid document id: {e}")))
}
