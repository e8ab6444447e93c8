//! In-memory document store.
//!
//! Backs the integration tests and small embedded deployments without a
//! database server. UUIDs are the addressing scheme; collections keep
//! insertion order. Unique indexes mirror what the production store
//! declares: `username` and `email` for users, plus a sparse index on
//! `externalId` (documents without the field never collide).

use super::{DocumentStore, StoreError};
use crate::resources::ResourceKind;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

fn unique_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::User => &["username", "email", "externalId"],
        _ => &[],
    }
}

/// Defaults the store fills in on write, the way a backend schema would.
fn apply_schema_defaults(kind: ResourceKind, document: &mut Value) {
    if kind == ResourceKind::ShoppingList {
        if let Some(items) = document.get_mut("items").and_then(Value::as_array_mut) {
            for item in items {
                if let Some(item) = item.as_object_mut() {
                    item.entry("checked").or_insert(Value::Bool(false));
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<ResourceKind, Vec<(String, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn conflicting_field(
        documents: &[(String, Value)],
        kind: ResourceKind,
        candidate: &serde_json::Map<String, Value>,
        skip_id: Option<&str>,
    ) -> Option<&'static str> {
        for field in unique_fields(kind).iter().copied() {
            let Some(candidate_value) = candidate.get(field) else {
                continue;
            };
            if candidate_value.is_null() {
                continue;
            }
            for (id, document) in documents {
                if skip_id == Some(id.as_str()) {
                    continue;
                }
                if document.get(field) == Some(candidate_value) {
                    return Some(field);
                }
            }
        }
        None
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn is_valid_identifier(&self, id: &str) -> bool {
        Uuid::try_parse(id).is_ok()
    }

    async fn exists(&self, kind: ResourceKind, id: &str) -> Result<bool, StoreError> {
        let collections = self.collections.read().unwrap();
        let found = collections
            .get(&kind)
            .is_some_and(|documents| documents.iter().any(|(doc_id, _)| doc_id == id));
        Ok(found)
    }

    async fn count_by_ids(&self, kind: ResourceKind, ids: &[&str]) -> Result<usize, StoreError> {
        let collections = self.collections.read().unwrap();
        let Some(documents) = collections.get(&kind) else {
            return Ok(0);
        };
        let count = documents
            .iter()
            .filter(|(id, _)| ids.contains(&id.as_str()))
            .count();
        Ok(count)
    }

    async fn create(&self, kind: ResourceKind, payload: Value) -> Result<Value, StoreError> {
        let Value::Object(mut fields) = payload else {
            return Err(StoreError::SchemaRejected(
                "document must be a JSON object".to_string(),
            ));
        };

        let mut collections = self.collections.write().unwrap();
        let documents = collections.entry(kind).or_default();

        if let Some(field) = Self::conflicting_field(documents, kind, &fields, None) {
            return Err(StoreError::UniqueViolation { field });
        }

        let id = Uuid::new_v4().to_string();
        fields.insert("_id".to_string(), json!(id));
        let mut document = Value::Object(fields);
        apply_schema_defaults(kind, &mut document);

        documents.push((id, document.clone()));
        Ok(document)
    }

    async fn find_by_id(&self, kind: ResourceKind, id: &str) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().unwrap();
        let found = collections.get(&kind).and_then(|documents| {
            documents
                .iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(_, document)| document.clone())
        });
        Ok(found)
    }

    async fn replace_by_id(
        &self,
        kind: ResourceKind,
        id: &str,
        payload: Value,
    ) -> Result<Option<Value>, StoreError> {
        let Value::Object(mut fields) = payload else {
            return Err(StoreError::SchemaRejected(
                "document must be a JSON object".to_string(),
            ));
        };

        let mut collections = self.collections.write().unwrap();
        let Some(documents) = collections.get_mut(&kind) else {
            return Ok(None);
        };

        if let Some(field) = Self::conflicting_field(documents, kind, &fields, Some(id)) {
            return Err(StoreError::UniqueViolation { field });
        }

        let Some(slot) = documents.iter_mut().find(|(doc_id, _)| doc_id == id) else {
            return Ok(None);
        };

        fields.insert("_id".to_string(), json!(id));
        let mut document = Value::Object(fields);
        apply_schema_defaults(kind, &mut document);

        slot.1 = document.clone();
        Ok(Some(document))
    }

    async fn delete_by_id(&self, kind: ResourceKind, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().unwrap();
        let Some(documents) = collections.get_mut(&kind) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|(doc_id, _)| doc_id != id);
        Ok(documents.len() < before)
    }

    async fn list(&self, kind: ResourceKind) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().unwrap();
        let documents = collections
            .get(&kind)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(_, document)| document.clone())
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }
}
