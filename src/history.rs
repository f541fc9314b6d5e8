//! Logged meal history as served by `/get_history`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub food: String,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: i64,
    #[serde(default)]
    pub fat: i64,
    #[serde(default)]
    pub calories: i64,
}

/// Totals for one day, as computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    #[serde(default)]
    pub calories: i64,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: i64,
    #[serde(default)]
    pub fat: i64,
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

/// Days keyed by `YYYY-MM-DD`, which sorts chronologically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    pub days: BTreeMap<String, DailySummary>,
}

impl History {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DailySummary)> {
        self.days.iter().map(|(day, summary)| (day.as_str(), summary))
    }

    pub fn total_calories(&self) -> i64 {
        self.days.values().map(|d| d.calories).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_days_are_sorted() {
        let history: History = serde_json::from_value(json!({
            "2025-02-03": {"calories": 500, "protein": 30, "carbs": 40, "fat": 20, "items": []},
            "2025-01-31": {"calories": 420, "protein": 60, "carbs": 0, "fat": 25, "items": [
                {"food": "Beef mince (500g 5% fat)", "protein": 60, "carbs": 0, "fat": 25, "calories": 420}
            ]}
        }))
        .unwrap();

        let days: Vec<_> = history.iter().map(|(d, _)| d).collect();
        assert_eq!(days, vec!["2025-01-31", "2025-02-03"]);
        assert_eq!(history.total_calories(), 920);
        assert_eq!(history.days["2025-01-31"].items[0].protein, 60);
    }

    #[test]
    fn test_empty_history() {
        let history: History = serde_json::from_value(json!({})).unwrap();
        assert!(history.is_empty());
        assert_eq!(history.total_calories(), 0);
    }
}
