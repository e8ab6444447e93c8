use serde::{Deserialize, Serialize};

/// The four document collections managed by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Recipe,
    User,
    MealPlan,
    ShoppingList,
}

impl ResourceKind {
    /// Lowercase singular noun for diagnostics ("Invalid recipe id").
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Recipe => "recipe",
            ResourceKind::User => "user",
            ResourceKind::MealPlan => "meal plan",
            ResourceKind::ShoppingList => "shopping list",
        }
    }

    /// Sentence-initial singular noun ("Recipe not found").
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Recipe => "Recipe",
            ResourceKind::User => "User",
            ResourceKind::MealPlan => "Meal plan",
            ResourceKind::ShoppingList => "Shopping list",
        }
    }

    /// Plural noun ("Unable to fetch recipes").
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Recipe => "recipes",
            ResourceKind::User => "users",
            ResourceKind::MealPlan => "meal plans",
            ResourceKind::ShoppingList => "shopping lists",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Exact-match parse of the wire value. Case variants ("Dinner") are
    /// not accepted.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_round_trip() {
        for meal_type in MealType::ALL {
            assert_eq!(MealType::from_wire(meal_type.as_str()), Some(meal_type));
        }
    }

    #[test]
    fn test_meal_type_rejects_case_variants() {
        assert_eq!(MealType::from_wire("Dinner"), None);
        assert_eq!(MealType::from_wire("BREAKFAST"), None);
        assert_eq!(MealType::from_wire("brunch"), None);
        assert_eq!(MealType::from_wire(""), None);
    }
}
