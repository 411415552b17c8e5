//! Data Export
//!
//! CSV and JSON export builders plus the browser download helper. Export
//! always covers the full reading set, regardless of any on-screen
//! filters.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use wasm_bindgen::JsCast;

use crate::model::{meal_label, Identity, Reading};

/// CSV column header, fixed order.
const CSV_HEADERS: [&str; 5] = [
    "Date",
    "Time",
    "Glucose Level (mg/dL)",
    "Meal Type",
    "Notes",
];

/// Render the full reading list as CSV. Dates are `MM/DD/YYYY`, times
/// 24-hour `HH:MM`, both in local time.
pub fn csv_export(readings: &[Reading]) -> String {
    let mut lines = Vec::with_capacity(readings.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for reading in readings {
        let local = reading.logged_at.with_timezone(&Local);
        let row = [
            local.format("%m/%d/%Y").to_string(),
            local.format("%H:%M").to_string(),
            format_level(reading.level),
            meal_label(reading.meal_type).to_string(),
            csv_field(reading.note.as_deref().unwrap_or("")),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Integer rendering for whole-number levels, one decimal otherwise.
fn format_level(level: f64) -> String {
    if level.fract() == 0.0 {
        format!("{}", level as i64)
    } else {
        format!("{level:.1}")
    }
}

/// Quote a field when it contains a separator, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[derive(Serialize)]
struct ExportUser<'a> {
    email: &'a str,
    joined: DateTime<Utc>,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    user: ExportUser<'a>,
    glucose_logs: &'a [Reading],
    export_date: DateTime<Utc>,
}

/// Render the full data export as pretty-printed JSON: identity metadata,
/// raw readings, and the export timestamp.
pub fn json_export(
    identity: &Identity,
    readings: &[Reading],
    exported_at: DateTime<Utc>,
) -> String {
    let document = ExportDocument {
        user: ExportUser {
            email: &identity.email,
            joined: identity.created_at,
        },
        glucose_logs: readings,
        export_date: exported_at,
    };
    // Serialization of these plain records cannot fail
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

pub fn csv_filename(today: NaiveDate) -> String {
    format!("glucose-log-{}.csv", today.format("%Y-%m-%d"))
}

pub fn json_filename(today: NaiveDate) -> String {
    format!("glucose-tracker-data-{}.json", today.format("%Y-%m-%d"))
}

/// Trigger a browser download of in-memory content via a temporary blob
/// URL and a synthetic anchor click.
pub fn download(filename: &str, content: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let parts = js_sys::Array::of1(&content.into());
    let Ok(blob) = web_sys::Blob::new_with_str_sequence(&parts) else {
        web_sys::console::error_1(&"Export failed: could not build blob".into());
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use crate::model::MealContext;

    fn reading(
        id: &str,
        level: f64,
        logged_at: DateTime<Utc>,
        meal_type: Option<MealContext>,
        note: Option<&str>,
    ) -> Reading {
        Reading {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            level,
            logged_at,
            created_at: logged_at,
            meal_type,
            note: note.map(str::to_string),
        }
    }

    fn identity() -> Identity {
        Identity {
            id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_csv_row_count_matches_total() {
        let now = Utc::now();
        let readings: Vec<Reading> = (0..5)
            .map(|i| {
                reading(
                    &format!("r{i}"),
                    100.0 + i as f64,
                    now - Duration::hours(i),
                    None,
                    None,
                )
            })
            .collect();

        let csv = csv_export(&readings);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), readings.len() + 1);
        assert_eq!(
            lines[0],
            "Date,Time,Glucose Level (mg/dL),Meal Type,Notes"
        );
    }

    #[test]
    fn test_csv_formats_fields() {
        let logged_local = Local.with_ymd_and_hms(2026, 8, 5, 14, 30, 0).unwrap();
        let readings = vec![reading(
            "a",
            112.0,
            logged_local.with_timezone(&Utc),
            Some(MealContext::BeforeMeal),
            Some("morning walk"),
        )];

        let csv = csv_export(&readings);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "08/05/2026,14:30,112,Before Meal,morning walk");
    }

    #[test]
    fn test_csv_renders_general_for_unset_meal() {
        let readings = vec![reading("a", 95.5, Utc::now(), None, None)];
        let row = csv_export(&readings);
        let row = row.lines().nth(1).unwrap();
        assert!(row.contains(",95.5,General,"));
    }

    #[test]
    fn test_csv_quotes_notes_with_separators() {
        let readings = vec![reading(
            "a",
            100.0,
            Utc::now(),
            None,
            Some("dizzy, after \"long\" run"),
        )];

        let row = csv_export(&readings);
        let row = row.lines().nth(1).unwrap();
        assert!(row.ends_with("\"dizzy, after \"\"long\"\" run\""));
    }

    #[test]
    fn test_json_export_structure() {
        let now = Utc::now();
        let readings = vec![reading("a", 100.0, now, Some(MealContext::AfterMeal), None)];

        let json = json_export(&identity(), &readings, now);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["user"]["email"], "ada@example.com");
        assert!(value["user"]["joined"].is_string());
        assert_eq!(value["glucose_logs"].as_array().unwrap().len(), 1);
        assert_eq!(value["glucose_logs"][0]["meal_type"], "after_meal");
        assert!(value["export_date"].is_string());
    }

    #[test]
    fn test_export_filenames() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(csv_filename(day), "glucose-log-2026-08-23.csv");
        assert_eq!(json_filename(day), "glucose-tracker-data-2026-08-23.json");
    }
}
