//! Domain Model
//!
//! The glucose reading entity and the identity returned by the auth
//! provider. Readings are immutable once created; the only mutation the
//! app performs is deletion by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest glucose level accepted at creation time, in mg/dL.
pub const LEVEL_MIN: f64 = 10.0;

/// Highest glucose level accepted at creation time, in mg/dL.
pub const LEVEL_MAX: f64 = 600.0;

/// Whether a level lies inside the domain-valid range. Boundaries are
/// inclusive: 10 and 600 both pass.
pub fn level_in_domain(level: f64) -> bool {
    (LEVEL_MIN..=LEVEL_MAX).contains(&level)
}

/// Meal context of a reading. An unset context renders as "General".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealContext {
    BeforeMeal,
    AfterMeal,
}

impl MealContext {
    pub fn label(self) -> &'static str {
        match self {
            MealContext::BeforeMeal => "Before Meal",
            MealContext::AfterMeal => "After Meal",
        }
    }

    /// Wire value used in query predicates and form inputs.
    pub fn key(self) -> &'static str {
        match self {
            MealContext::BeforeMeal => "before_meal",
            MealContext::AfterMeal => "after_meal",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "before_meal" => Some(MealContext::BeforeMeal),
            "after_meal" => Some(MealContext::AfterMeal),
            _ => None,
        }
    }
}

/// Display label for an optional meal context.
pub fn meal_label(meal: Option<MealContext>) -> &'static str {
    meal.map(MealContext::label).unwrap_or("General")
}

/// One glucose measurement as stored in the `glucose_logs` table.
///
/// `logged_at` is when the measurement was physically taken and may be
/// backdated by the user; `created_at` is the row-insertion time assigned
/// by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: String,
    pub user_id: String,
    pub level: f64,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payload for creating a reading. The backend assigns `id` and
/// `created_at`; the owner is attached by the API client.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReadingDraft {
    pub level: f64,
    pub logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Authenticated user as reported by the auth provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries_inclusive() {
        assert!(!level_in_domain(9.0));
        assert!(level_in_domain(10.0));
        assert!(level_in_domain(600.0));
        assert!(!level_in_domain(600.1));
    }

    #[test]
    fn test_meal_context_wire_format() {
        assert_eq!(
            serde_json::to_string(&MealContext::BeforeMeal).unwrap(),
            "\"before_meal\""
        );
        let parsed: MealContext = serde_json::from_str("\"after_meal\"").unwrap();
        assert_eq!(parsed, MealContext::AfterMeal);
    }

    #[test]
    fn test_meal_label_defaults_to_general() {
        assert_eq!(meal_label(None), "General");
        assert_eq!(meal_label(Some(MealContext::AfterMeal)), "After Meal");
    }

    #[test]
    fn test_reading_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "abc",
            "user_id": "u1",
            "level": 105.0,
            "logged_at": "2026-08-20T08:30:00Z",
            "created_at": "2026-08-20T08:31:00Z"
        }"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.meal_type, None);
        assert_eq!(reading.note, None);
        assert_eq!(reading.level, 105.0);
    }
}
