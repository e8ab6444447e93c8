//! Store-facing execution of reads and validated writes.
//!
//! The only module that touches persistent state. Validation outcomes
//! arrive as `Rejection`s from the pipeline; this layer adds the store's
//! own failure classes on top: uniqueness conflicts (409), store-side
//! schema rejections (400), targets that vanished between validation and
//! the write (404), and backend failures (logged, surfaced as a generic
//! 500 with no storage detail).

use crate::error::Rejection;
use crate::resources::ResourceKind;
use crate::store::{DocumentStore, StoreError};
use crate::validate::validate_for_write;
use serde_json::Value;

/// Validate and persist a new document. Returns the stored document,
/// including its assigned id.
pub async fn create_document<S>(
    store: &S,
    kind: ResourceKind,
    payload: Value,
) -> Result<Value, Rejection>
where
    S: DocumentStore + ?Sized,
{
    validate_for_write(store, kind, &payload).await?;

    store
        .create(kind, payload)
        .await
        .map_err(|err| classify_store_error(err, kind, "create"))
}

/// Validate and apply a whole-document replace. Partial updates are not
/// supported; the payload is revalidated in full every time.
pub async fn replace_document<S>(
    store: &S,
    kind: ResourceKind,
    id: &str,
    payload: Value,
) -> Result<Value, Rejection>
where
    S: DocumentStore + ?Sized,
{
    if !store.is_valid_identifier(id) {
        return Err(Rejection::bad_request(format!("Invalid {} id", kind.noun())));
    }

    validate_for_write(store, kind, &payload).await?;

    match store.replace_by_id(kind, id, payload).await {
        Ok(Some(document)) => Ok(document),
        Ok(None) => Err(Rejection::not_found(format!("{} not found", kind.title()))),
        Err(err) => Err(classify_store_error(err, kind, "update")),
    }
}

/// Delete a document. No referential cascade: documents elsewhere that
/// reference the target keep their now-dangling ids.
pub async fn delete_document<S>(store: &S, kind: ResourceKind, id: &str) -> Result<(), Rejection>
where
    S: DocumentStore + ?Sized,
{
    if !store.is_valid_identifier(id) {
        return Err(Rejection::bad_request(format!("Invalid {} id", kind.noun())));
    }

    match store.delete_by_id(kind, id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(Rejection::not_found(format!("{} not found", kind.title()))),
        Err(err) => Err(classify_store_error(err, kind, "delete")),
    }
}

pub async fn fetch_document<S>(
    store: &S,
    kind: ResourceKind,
    id: &str,
) -> Result<Value, Rejection>
where
    S: DocumentStore + ?Sized,
{
    if !store.is_valid_identifier(id) {
        return Err(Rejection::bad_request(format!("Invalid {} id", kind.noun())));
    }

    match store.find_by_id(kind, id).await {
        Ok(Some(document)) => Ok(document),
        Ok(None) => Err(Rejection::not_found(format!("{} not found", kind.title()))),
        Err(err) => {
            tracing::error!(error = %err, kind = kind.noun(), id, "fetch failed");
            Err(Rejection::internal(format!(
                "Unable to fetch {}",
                kind.noun()
            )))
        }
    }
}

pub async fn fetch_all_documents<S>(
    store: &S,
    kind: ResourceKind,
) -> Result<Vec<Value>, Rejection>
where
    S: DocumentStore + ?Sized,
{
    store.list(kind).await.map_err(|err| {
        tracing::error!(error = %err, kind = kind.noun(), "list failed");
        Rejection::internal(format!("Unable to fetch {}", kind.plural()))
    })
}

fn classify_store_error(err: StoreError, kind: ResourceKind, verb: &str) -> Rejection {
    match err {
        StoreError::UniqueViolation { field } => Rejection::conflict(conflict_message(kind, field)),
        StoreError::SchemaRejected(reason) => Rejection::bad_request(reason),
        StoreError::Backend(_) => {
            tracing::error!(error = %err, kind = kind.noun(), "store operation failed");
            Rejection::internal(format!("Unable to {verb} {}", kind.noun()))
        }
    }
}

fn conflict_message(kind: ResourceKind, field: &'static str) -> String {
    match kind {
        ResourceKind::User => "username or email already exists".to_string(),
        _ => format!("duplicate value for {field}"),
    }
}
