//! Single-document editing for the Manage Data view.
//!
//! Only scalar fields (string, int32, int64, double) are editable. Submitted
//! text is coerced back to the stored numeric type when it parses; text that
//! does not parse is stored as a string. This is a convenience, not
//! validation: a price overwritten with `"abc"` becomes a string field.

use std::collections::HashMap;

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use tracing::instrument;

use eshop_core::{CollectionName, DocumentId};

use crate::components::display_value;
use crate::db::{Database, DocumentRepository, RepositoryError, UpdateOutcome};
use crate::models::Record;

/// Stored type of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarKind {
    Text,
    Int32,
    Int64,
    Double,
}

impl ScalarKind {
    /// Kind of a stored value, `None` if the value is not editable.
    #[must_use]
    pub const fn of(value: &Bson) -> Option<Self> {
        match value {
            Bson::String(_) => Some(Self::Text),
            Bson::Int32(_) => Some(Self::Int32),
            Bson::Int64(_) => Some(Self::Int64),
            Bson::Double(_) => Some(Self::Double),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Double => "double",
        }
    }

    /// Convert submitted text to a value of this kind.
    ///
    /// Integers widen from int32 to int64 before giving up. Anything that
    /// does not parse, including non-finite doubles, is kept as a string.
    #[must_use]
    pub fn coerce(self, input: &str) -> Bson {
        let trimmed = input.trim();
        let parsed = match self {
            Self::Text => None,
            Self::Int32 => trimmed
                .parse::<i32>()
                .map(Bson::Int32)
                .ok()
                .or_else(|| trimmed.parse::<i64>().map(Bson::Int64).ok()),
            Self::Int64 => trimmed.parse::<i64>().map(Bson::Int64).ok(),
            Self::Double => trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Bson::Double),
        };

        parsed.unwrap_or_else(|| Bson::String(input.to_string()))
    }
}

/// One field of the selected document as shown in the editor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub key: String,
    pub value: String,
    /// Stored type, e.g. `"double"` or `"datetime"`.
    pub kind_label: String,
    pub editable: bool,
}

/// Editor rows for every field except `_id`, in document order.
#[must_use]
pub fn field_views(document: &Document) -> Vec<FieldView> {
    document
        .iter()
        .filter(|(key, _)| key.as_str() != "_id")
        .map(|(key, value)| {
            let kind = ScalarKind::of(value);
            FieldView {
                key: key.clone(),
                value: display_value(value),
                kind_label: kind.map_or_else(|| bson_type_label(value), |k| k.label()).to_string(),
                editable: kind.is_some(),
            }
        })
        .collect()
}

const fn bson_type_label(value: &Bson) -> &'static str {
    match value {
        Bson::Boolean(_) => "bool",
        Bson::DateTime(_) => "datetime",
        Bson::ObjectId(_) => "objectId",
        Bson::Array(_) => "array",
        Bson::Document(_) => "object",
        Bson::Null => "null",
        _ => "other",
    }
}

/// The `$set` body for a form submission.
///
/// Contains only scalar fields present in `submitted` whose coerced value
/// differs from the stored one. A field whose submitted text equals its
/// displayed value is untouched, so values the form cannot round-trip (a
/// stored `NaN` or infinity) are never rewritten. `_id`, read-only fields and
/// unknown keys are ignored.
#[must_use]
pub fn changed_fields(current: &Document, submitted: &HashMap<String, String>) -> Document {
    let mut changes = Document::new();

    for (key, stored) in current {
        if key == "_id" {
            continue;
        }
        let Some(kind) = ScalarKind::of(stored) else {
            continue;
        };
        let Some(input) = submitted.get(key) else {
            continue;
        };
        if *input == display_value(stored) {
            continue;
        }

        let value = kind.coerce(input);
        if &value != stored {
            changes.insert(key.clone(), value);
        }
    }

    changes
}

/// Result of selecting a document by id.
#[derive(Debug, Clone)]
pub enum Selection {
    Found {
        record: Record,
        fields: Vec<FieldView>,
    },
    /// No document with that id, it may have been deleted.
    NotFound,
}

/// What a save did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Names of the fields sent in the `$set`.
    pub changed: Vec<String>,
    pub outcome: UpdateOutcome,
}

impl SaveOutcome {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Select, save and delete operations on single documents.
pub struct RecordEditor<'a> {
    documents: DocumentRepository<'a>,
}

impl<'a> RecordEditor<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            documents: DocumentRepository::new(db),
        }
    }

    /// Load a document and build its editor rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    pub async fn select(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<Selection, RepositoryError> {
        let Some(document) = self.documents.find_by_id(collection, id).await? else {
            return Ok(Selection::NotFound);
        };

        let fields = field_views(&document);
        Ok(Selection::Found {
            record: Record::decode(collection, document),
            fields,
        })
    }

    /// Save the changed scalar fields of a form submission.
    ///
    /// The document is re-read first so the diff is taken against the
    /// current stored values. Nothing is written when no field changed.
    /// Concurrent saves of the same field are last-write-wins: there is no
    /// version check between the read and the `$set`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the document no longer exists,
    /// or `RepositoryError::Database` if the lookup or update fails.
    #[instrument(skip(self, submitted), fields(id = %id))]
    pub async fn save(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        submitted: &HashMap<String, String>,
    ) -> Result<SaveOutcome, RepositoryError> {
        let current = self
            .documents
            .find_by_id(collection, id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let changes = changed_fields(&current, submitted);
        let changed: Vec<String> = changes.keys().cloned().collect();
        if changed.is_empty() {
            tracing::debug!("No field changed, skipping update");
            return Ok(SaveOutcome::default());
        }

        let outcome = self.documents.set_fields(collection, id, changes).await?;
        Ok(SaveOutcome { changed, outcome })
    }

    /// Delete one document. Deleting a missing id succeeds with `0`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<u64, RepositoryError> {
        self.documents.delete_by_id(collection, id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{self, doc};

    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn product() -> Document {
        doc! {
            "_id": ObjectId::new(),
            "nome": "Mesa Elegante de Madeira",
            "categoria": "Casa",
            "preco": 12.5,
            "estoque": 7,
            "created": bson::DateTime::from_millis(0),
        }
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(ScalarKind::Int32.coerce("42"), Bson::Int32(42));
        assert_eq!(ScalarKind::Int32.coerce(" 42 "), Bson::Int32(42));
        assert_eq!(
            ScalarKind::Int32.coerce("5000000000"),
            Bson::Int64(5_000_000_000)
        );
        assert_eq!(ScalarKind::Int64.coerce("-3"), Bson::Int64(-3));
        assert_eq!(ScalarKind::Double.coerce("19.99"), Bson::Double(19.99));
    }

    #[test]
    fn test_coerce_unparseable_falls_back_to_string() {
        assert_eq!(
            ScalarKind::Int32.coerce("abc"),
            Bson::String("abc".to_string())
        );
        assert_eq!(
            ScalarKind::Double.coerce("NaN"),
            Bson::String("NaN".to_string())
        );
        assert_eq!(
            ScalarKind::Text.coerce(" 12 "),
            Bson::String(" 12 ".to_string())
        );
    }

    #[test]
    fn test_field_views_skip_id_and_mark_read_only() {
        let views = field_views(&product());
        let keys: Vec<&str> = views.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["nome", "categoria", "preco", "estoque", "created"]);

        assert!(views[2].editable);
        assert_eq!(views[2].kind_label, "double");
        assert_eq!(views[2].value, "12.5");
        assert!(!views[4].editable);
        assert_eq!(views[4].kind_label, "datetime");
    }

    #[test]
    fn test_unchanged_form_yields_empty_set() {
        let submitted = form(&[
            ("nome", "Mesa Elegante de Madeira"),
            ("categoria", "Casa"),
            ("preco", "12.5"),
            ("estoque", "7"),
        ]);
        assert!(changed_fields(&product(), &submitted).is_empty());
    }

    #[test]
    fn test_only_changed_field_is_set() {
        let submitted = form(&[
            ("nome", "Mesa Elegante de Madeira"),
            ("categoria", "Casa"),
            ("preco", "12.5"),
            ("estoque", "9"),
        ]);
        assert_eq!(
            changed_fields(&product(), &submitted),
            doc! { "estoque": 9 }
        );
    }

    #[test]
    fn test_id_unknown_and_read_only_fields_ignored() {
        let submitted = form(&[
            ("_id", "000000000000000000000000"),
            ("created", "yesterday"),
            ("color", "red"),
        ]);
        assert!(changed_fields(&product(), &submitted).is_empty());
    }

    #[test]
    fn test_bad_number_stored_as_string() {
        let submitted = form(&[("preco", "caro")]);
        assert_eq!(
            changed_fields(&product(), &submitted),
            doc! { "preco": "caro" }
        );
    }

    #[test]
    fn test_untouched_non_finite_doubles_are_not_rewritten() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "nome": "Mesa",
            "preco": f64::INFINITY,
            "ratio": f64::NAN,
            "floor": f64::NEG_INFINITY,
        };

        let mut submitted: HashMap<String, String> = field_views(&stored)
            .into_iter()
            .map(|view| (view.key, view.value))
            .collect();
        submitted.insert("nome".to_string(), "Cadeira".to_string());

        let changes = changed_fields(&stored, &submitted);
        let keys: Vec<&str> = changes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["nome"]);
    }

    #[test]
    fn test_edited_non_finite_double_is_written() {
        let stored = doc! { "preco": f64::NAN };
        let submitted = form(&[("preco", "9.5")]);
        assert_eq!(changed_fields(&stored, &submitted), doc! { "preco": 9.5 });
    }

    #[test]
    fn test_save_outcome_unchanged() {
        assert!(SaveOutcome::default().is_unchanged());
    }
}
