//! Declarative per-resource validation rules.
//!
//! Each resource kind declares a single `ResourceRules` table: required
//! fields, numeric bounds, and an ordered list of domain checks. The
//! orchestrator walks the table, so the four kinds share one engine instead
//! of four hand-copied validators that drift apart.
//!
//! Check order is part of the contract. For meal plans the date checks run
//! before the entry checks, so a reversed date range is reported even when
//! individual entries are also broken. Within a collection, the first
//! failing element rule wins.

use crate::resources::{MealType, ResourceKind};
use crate::validate::shape::has_value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Lower bound on a field, checked on numeric coercion of the raw value.
pub struct NumericRule {
    pub field: &'static str,
    pub min: f64,
}

/// A domain check returning a diagnostic for the first offending field.
pub type DomainCheck = fn(&Value) -> Option<String>;

pub struct ResourceRules {
    pub required: &'static [&'static str],
    pub numeric: &'static [NumericRule],
    pub checks: &'static [DomainCheck],
}

pub fn rules_for(kind: ResourceKind) -> &'static ResourceRules {
    match kind {
        ResourceKind::Recipe => &RECIPE_RULES,
        ResourceKind::User => &USER_RULES,
        ResourceKind::MealPlan => &MEAL_PLAN_RULES,
        ResourceKind::ShoppingList => &SHOPPING_LIST_RULES,
    }
}

static RECIPE_RULES: ResourceRules = ResourceRules {
    required: &[
        "title",
        "cuisine",
        "prepTimeMinutes",
        "cookTimeMinutes",
        "servings",
        "ingredients",
        "steps",
    ],
    numeric: &[
        NumericRule {
            field: "prepTimeMinutes",
            min: 0.0,
        },
        NumericRule {
            field: "cookTimeMinutes",
            min: 0.0,
        },
        NumericRule {
            field: "servings",
            min: 1.0,
        },
    ],
    checks: &[
        check_ingredients as DomainCheck,
        check_steps,
        check_nutrition,
    ],
};

static USER_RULES: ResourceRules = ResourceRules {
    required: &["username", "email"],
    numeric: &[],
    checks: &[check_email as DomainCheck],
};

static MEAL_PLAN_RULES: ResourceRules = ResourceRules {
    required: &["title", "user", "startDate", "endDate", "entries"],
    numeric: &[],
    checks: &[check_plan_dates as DomainCheck, check_entries],
};

static SHOPPING_LIST_RULES: ResourceRules = ResourceRules {
    required: &["title", "user", "items"],
    numeric: &[],
    checks: &[check_items as DomainCheck, check_due_date],
};

/// All numeric fields violating their bound, in table order.
pub fn invalid_numeric_fields(payload: &Value, rules: &ResourceRules) -> Vec<String> {
    rules
        .numeric
        .iter()
        .filter(|rule| {
            matches!(
                payload.get(rule.field).and_then(as_number),
                Some(n) if n < rule.min
            )
        })
        .map(|rule| rule.field.to_string())
        .collect()
}

/// The first domain rule the payload violates, if any.
pub fn first_domain_issue(payload: &Value, rules: &ResourceRules) -> Option<String> {
    rules.checks.iter().find_map(|check| check(payload))
}

/// Numeric coercion: JSON numbers and numeric strings. Anything else is left
/// for the store's own constraints.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse a payload value as a calendar instant. Accepts RFC 3339 strings,
/// bare `YYYY-MM-DD` dates, naive datetimes, and epoch-millisecond numbers.
fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
                return Some(instant.with_timezone(&Utc));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
            }
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return Some(datetime.and_utc());
            }
            None
        }
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn check_ingredients(payload: &Value) -> Option<String> {
    let ingredients = match payload.get("ingredients").and_then(Value::as_array) {
        Some(ingredients) if !ingredients.is_empty() => ingredients,
        _ => return Some("ingredients must include at least one item".to_string()),
    };

    for ingredient in ingredients {
        let named = ingredient
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.trim().is_empty());
        if !named {
            return Some("each ingredient requires a name".to_string());
        }
        if let Some(quantity) = ingredient.get("quantity") {
            if matches!(as_number(quantity), Some(n) if n < 0.0) {
                return Some("ingredient quantities must be zero or greater".to_string());
            }
        }
    }
    None
}

fn check_steps(payload: &Value) -> Option<String> {
    let steps = match payload.get("steps").and_then(Value::as_array) {
        Some(steps) if !steps.is_empty() => steps,
        _ => return Some("steps must include at least one item".to_string()),
    };

    for step in steps {
        let empty = match step {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if empty {
            return Some("steps cannot be empty".to_string());
        }
    }
    None
}

const NUTRITION_FIELDS: [&str; 4] = ["calories", "protein", "carbs", "fat"];

fn check_nutrition(payload: &Value) -> Option<String> {
    let nutrition = payload.get("nutrition")?;
    if nutrition.is_null() {
        return None;
    }
    let Some(nutrition) = nutrition.as_object() else {
        return Some("nutrition must be an object".to_string());
    };
    for field in NUTRITION_FIELDS {
        if let Some(n) = nutrition.get(field).and_then(as_number) {
            if n < 0.0 {
                return Some(format!("nutrition.{field} must be zero or greater"));
            }
        }
    }
    None
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

fn check_email(payload: &Value) -> Option<String> {
    let valid = payload
        .get("email")
        .and_then(Value::as_str)
        .is_some_and(|email| EMAIL_RE.is_match(email));
    if valid {
        None
    } else {
        Some("email must be a valid email address".to_string())
    }
}

fn check_plan_dates(payload: &Value) -> Option<String> {
    let start = payload.get("startDate").and_then(parse_instant);
    let end = payload.get("endDate").and_then(parse_instant);
    let (Some(start), Some(end)) = (start, end) else {
        return Some("startDate and endDate must be valid dates".to_string());
    };
    if end < start {
        return Some("endDate must be on or after startDate".to_string());
    }
    None
}

fn check_entries(payload: &Value) -> Option<String> {
    let entries = match payload.get("entries").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Some("entries must include at least one meal slot".to_string()),
    };

    for (i, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            return Some(format!("entries[{i}] is required"));
        }
        if entry.get("date").and_then(parse_instant).is_none() {
            return Some(format!(
                "entries[{i}].date is required and must be a valid date"
            ));
        }
        let meal_type_ok = entry
            .get("mealType")
            .and_then(Value::as_str)
            .and_then(MealType::from_wire)
            .is_some();
        if !meal_type_ok {
            return Some(format!(
                "entries[{i}].mealType must be one of: {}",
                MealType::ALL.map(|m| m.as_str()).join(", ")
            ));
        }
        if !has_value(entry.get("recipe")) {
            return Some(format!("entries[{i}].recipe is required"));
        }
    }
    None
}

fn check_items(payload: &Value) -> Option<String> {
    let items = match payload.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => return Some("items must include at least one entry".to_string()),
    };

    for (i, item) in items.iter().enumerate() {
        let named = item
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.trim().is_empty());
        if !named {
            return Some(format!("items[{i}].name is required"));
        }
        if let Some(quantity) = item.get("quantity") {
            if matches!(as_number(quantity), Some(n) if n < 0.0) {
                return Some(format!("items[{i}].quantity must be zero or greater"));
            }
        }
    }
    None
}

fn check_due_date(payload: &Value) -> Option<String> {
    let due = payload.get("dueDate")?;
    if !has_value(Some(due)) {
        return None;
    }
    if parse_instant(due).is_none() {
        return Some("dueDate must be a valid date when provided".to_string());
    }
    None
}
