//! Validation pipeline for write requests.
//!
//! Every write runs the same sequence: required-field shape, domain rules,
//! then cross-collection references. The stages are strictly ordered and
//! short-circuiting; the first failing stage produces the rejection and
//! later stages never run. The payload is inspected, never trimmed or
//! otherwise normalized: whatever the caller sent is what the store
//! receives.

mod refs;
mod rules;
mod shape;

pub use refs::{check_references, RefCheck};
pub use rules::{rules_for, DomainCheck, NumericRule, ResourceRules};
pub use shape::missing_required;

use crate::error::Rejection;
use crate::resources::ResourceKind;
use crate::store::{DocumentStore, StoreError};
use serde_json::Value;

/// Run the full pipeline against a create/replace payload. `Ok(())` means
/// the payload may be handed to the store unchanged.
pub async fn validate_for_write<S>(
    store: &S,
    kind: ResourceKind,
    payload: &Value,
) -> Result<(), Rejection>
where
    S: DocumentStore + ?Sized,
{
    let rules = rules::rules_for(kind);

    let missing = shape::missing_required(payload, rules.required);
    if !missing.is_empty() {
        return Err(Rejection::missing_fields(missing));
    }

    let invalid = rules::invalid_numeric_fields(payload, rules);
    if !invalid.is_empty() {
        return Err(Rejection::invalid_numeric_fields(invalid));
    }

    if let Some(issue) = rules::first_domain_issue(payload, rules) {
        return Err(Rejection::bad_request(issue));
    }

    check_kind_references(store, kind, payload).await
}

/// Which other collections a payload points into, by kind. Recipes and
/// users hold no outbound references.
async fn check_kind_references<S>(
    store: &S,
    kind: ResourceKind,
    payload: &Value,
) -> Result<(), Rejection>
where
    S: DocumentStore + ?Sized,
{
    match kind {
        ResourceKind::Recipe | ResourceKind::User => Ok(()),
        ResourceKind::ShoppingList => check_owner(store, payload).await,
        ResourceKind::MealPlan => {
            check_owner(store, payload).await?;
            check_entry_recipes(store, payload).await
        }
    }
}

async fn check_owner<S>(store: &S, payload: &Value) -> Result<(), Rejection>
where
    S: DocumentStore + ?Sized,
{
    // A non-string owner field can never be a valid id.
    let owner = payload
        .get("user")
        .and_then(Value::as_str)
        .unwrap_or_default();

    match check_references(store, ResourceKind::User, &[owner]).await {
        Ok(RefCheck::Ok) => Ok(()),
        Ok(RefCheck::Malformed) => Err(Rejection::bad_request("user must be a valid id")),
        Ok(RefCheck::Dangling { .. }) => Err(Rejection::not_found("Referenced user not found")),
        Err(err) => Err(reference_check_failure(err)),
    }
}

async fn check_entry_recipes<S>(store: &S, payload: &Value) -> Result<(), Rejection>
where
    S: DocumentStore + ?Sized,
{
    let mut ids: Vec<&str> = Vec::new();
    if let Some(entries) = payload.get("entries").and_then(Value::as_array) {
        for entry in entries {
            let Some(reference) = entry.get("recipe") else {
                continue;
            };
            if reference.is_null() {
                continue;
            }
            match reference.as_str() {
                Some(id) => ids.push(id),
                None => return Err(Rejection::bad_request("Invalid recipe id in entries")),
            }
        }
    }

    match check_references(store, ResourceKind::Recipe, &ids).await {
        Ok(RefCheck::Ok) => Ok(()),
        Ok(RefCheck::Malformed) => Err(Rejection::bad_request("Invalid recipe id in entries")),
        Ok(RefCheck::Dangling { .. }) => Err(Rejection::not_found(
            "One or more recipe references were not found",
        )),
        Err(err) => Err(reference_check_failure(err)),
    }
}

fn reference_check_failure(err: StoreError) -> Rejection {
    tracing::error!(error = %err, "reference check failed");
    Rejection::internal("Unable to verify references")
}
