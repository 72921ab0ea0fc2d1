//! Integration tests for browsing, editing and deleting documents.
//!
//! These tests require a running `MongoDB` reachable via `MONGO_URL`.
//!
//! Run with: cargo test -p eshop-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use mongodb::bson::{Bson, Document};
use rand::SeedableRng;
use rand::rngs::StdRng;

use eshop_admin::db::{DocumentRepository, LIST_LIMIT, RepositoryError, document_id};
use eshop_admin::models::Record;
use eshop_admin::services::{DataGenerator, RecordEditor, SeedPlan, Selection};
use eshop_core::{CollectionName, DocumentId};
use eshop_integration_tests::TestContext;

async fn seeded(plan: SeedPlan) -> TestContext {
    let ctx = TestContext::new().await.unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    DataGenerator::new(&ctx.db)
        .seed(plan, &mut rng)
        .await
        .unwrap();
    ctx
}

fn small_plan() -> SeedPlan {
    SeedPlan {
        products: 5,
        users: 5,
        logs: 10,
    }
}

async fn first_id(ctx: &TestContext, collection: CollectionName) -> (DocumentId, Document) {
    let documents = DocumentRepository::new(&ctx.db)
        .list(collection, 1)
        .await
        .unwrap();
    let document = documents.into_iter().next().unwrap();
    (document_id(&document.get_object_id("_id").unwrap()), document)
}

/// Submitted form reproducing the stored scalar values.
fn form_from(document: &Document) -> HashMap<String, String> {
    document
        .iter()
        .filter_map(|(key, value)| match value {
            Bson::String(s) => Some((key.clone(), s.clone())),
            Bson::Int32(n) => Some((key.clone(), n.to_string())),
            Bson::Int64(n) => Some((key.clone(), n.to_string())),
            Bson::Double(n) => Some((key.clone(), n.to_string())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_list_is_capped() {
    let ctx = seeded(SeedPlan {
        products: 1005,
        users: 0,
        logs: 0,
    })
    .await;

    let listed = DocumentRepository::new(&ctx.db)
        .list(CollectionName::Products, LIST_LIMIT)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1000);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_select_decodes_typed_record() {
    let ctx = seeded(small_plan()).await;
    let (id, _) = first_id(&ctx, CollectionName::Users).await;

    let selection = RecordEditor::new(&ctx.db)
        .select(CollectionName::Users, &id)
        .await
        .unwrap();

    match selection {
        Selection::Found { record, fields } => {
            match record {
                Record::User(user) => assert_eq!(user.id.map(|oid| document_id(&oid)), Some(id)),
                other => panic!("expected a user, got {other:?}"),
            }
            let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
            assert_eq!(keys, vec!["nome", "email", "estado"]);
        }
        Selection::NotFound => panic!("seeded user not found"),
    }

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_delete_removes_exactly_one() {
    let ctx = seeded(small_plan()).await;
    let (id, _) = first_id(&ctx, CollectionName::Products).await;
    let editor = RecordEditor::new(&ctx.db);

    assert_eq!(editor.delete(CollectionName::Products, &id).await.unwrap(), 1);

    let documents = DocumentRepository::new(&ctx.db);
    assert_eq!(documents.count(CollectionName::Products).await.unwrap(), 4);
    assert!(matches!(
        editor.select(CollectionName::Products, &id).await.unwrap(),
        Selection::NotFound
    ));

    // Deleting again is a no-op
    assert_eq!(editor.delete(CollectionName::Products, &id).await.unwrap(), 0);
    assert_eq!(documents.count(CollectionName::Products).await.unwrap(), 4);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_edit_changes_exactly_one_field() {
    let ctx = seeded(small_plan()).await;
    let (id, before) = first_id(&ctx, CollectionName::Products).await;

    let mut form = form_from(&before);
    form.insert("estoque".to_string(), "123".to_string());

    let saved = RecordEditor::new(&ctx.db)
        .save(CollectionName::Products, &id, &form)
        .await
        .unwrap();
    assert_eq!(saved.changed, vec!["estoque".to_string()]);
    assert_eq!(saved.outcome.matched, 1);

    let after = DocumentRepository::new(&ctx.db)
        .find_by_id(CollectionName::Products, &id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(after.get("estoque"), Some(&Bson::Int32(123)));
    for (key, value) in &before {
        if key != "estoque" {
            assert_eq!(after.get(key), Some(value), "field {key} changed");
        }
    }

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_unchanged_form_writes_nothing() {
    let ctx = seeded(small_plan()).await;
    let (id, before) = first_id(&ctx, CollectionName::Users).await;

    let saved = RecordEditor::new(&ctx.db)
        .save(CollectionName::Users, &id, &form_from(&before))
        .await
        .unwrap();
    assert!(saved.is_unchanged());
    assert_eq!(saved.outcome.matched, 0);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_unparseable_number_stored_as_text() {
    let ctx = seeded(small_plan()).await;
    let (id, _) = first_id(&ctx, CollectionName::Products).await;

    let form = HashMap::from([("preco".to_string(), "caro".to_string())]);
    let editor = RecordEditor::new(&ctx.db);
    editor
        .save(CollectionName::Products, &id, &form)
        .await
        .unwrap();

    match editor.select(CollectionName::Products, &id).await.unwrap() {
        Selection::Found {
            record: Record::Unrecognized { document, .. },
            ..
        } => {
            assert_eq!(document.get_str("preco").unwrap(), "caro");
        }
        Selection::Found { record, .. } => panic!("expected unrecognized, got {record:?}"),
        Selection::NotFound => panic!("edited product not found"),
    }

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_save_on_deleted_document_writes_nothing() {
    let ctx = seeded(small_plan()).await;
    let (id, before) = first_id(&ctx, CollectionName::Products).await;
    let editor = RecordEditor::new(&ctx.db);

    editor.delete(CollectionName::Products, &id).await.unwrap();

    let mut form = form_from(&before);
    form.insert("nome".to_string(), "Fantasma".to_string());
    let result = editor.save(CollectionName::Products, &id, &form).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));

    // No upsert happened
    assert!(
        DocumentRepository::new(&ctx.db)
            .find_by_id(CollectionName::Products, &id)
            .await
            .unwrap()
            .is_none()
    );

    ctx.cleanup().await.unwrap();
}
