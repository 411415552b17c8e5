//! History Page
//!
//! Browsable reading list with search, meal-type and day filters,
//! per-reading deletion, and CSV export of the full set.

use chrono::{Duration, Local, NaiveDate};
use leptos::*;

use crate::components::{Loading, ReadingCard};
use crate::export;
use crate::model::{MealContext, Reading};
use crate::state::readings::remove_reading;
use crate::state::use_readings;

/// Apply the history view filters. Search matches note text and the
/// digits of the level, both case-insensitive; the day filter compares
/// local calendar days.
fn apply_filters(
    readings: &[Reading],
    search: &str,
    meal: Option<MealContext>,
    day: Option<NaiveDate>,
) -> Vec<Reading> {
    let needle = search.trim().to_lowercase();
    readings
        .iter()
        .filter(|r| {
            let matches_search = needle.is_empty()
                || r.note
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
                || r.level.to_string().contains(&needle);

            let matches_meal = meal.is_none() || r.meal_type == meal;

            let matches_day = day.is_none_or(|d| {
                r.logged_at.with_timezone(&Local).date_naive() == d
            });

            matches_search && matches_meal && matches_day
        })
        .cloned()
        .collect()
}

/// History page component
#[component]
pub fn History() -> impl IntoView {
    let readings = use_readings();

    let (search, set_search) = create_signal(String::new());
    let (meal_filter, set_meal_filter) = create_signal(None::<MealContext>);
    let (day_filter, set_day_filter) = create_signal(None::<NaiveDate>);
    let (pending_delete, set_pending_delete) = create_signal(None::<String>);
    let (deleting, set_deleting) = create_signal(false);

    let filtered = create_memo(move |_| {
        let rows = readings.readings.get().unwrap_or_default();
        apply_filters(&rows, &search.get(), meal_filter.get(), day_filter.get())
    });

    let total = move || readings.readings.get().map(|r| r.len()).unwrap_or(0);

    // Export always covers the full set, not the filtered view
    let on_export = move |_| {
        let Some(rows) = readings.readings.get() else {
            return;
        };
        let csv = export::csv_export(&rows);
        let filename = export::csv_filename(Local::now().date_naive());
        export::download(&filename, &csv);
    };

    let confirm_delete = move |_| {
        let Some(id) = pending_delete.get() else {
            return;
        };
        set_deleting.set(true);
        spawn_local(async move {
            match remove_reading(readings, &id).await {
                Ok(()) => set_pending_delete.set(None),
                Err(e) => readings.show_error(&e.to_string()),
            }
            set_deleting.set(false);
        });
    };

    view! {
        <div class="space-y-6">
            // Header
            <div>
                <h1 class="text-3xl font-bold text-gray-900">"Glucose History"</h1>
                <p class="text-gray-600 mt-1">"View and manage all your glucose readings"</p>
            </div>

            // Filters and actions
            <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100 space-y-4">
                <div class="flex flex-col md:flex-row gap-4 items-center justify-between">
                    <input
                        type="text"
                        placeholder="Search notes or glucose levels..."
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        class="flex-1 max-w-md px-4 py-2 border border-gray-200 rounded-lg \
                               focus:border-blue-500 focus:outline-none"
                    />
                    <button
                        on:click=on_export
                        class="px-4 py-2 bg-green-600 hover:bg-green-700 text-white \
                               rounded-lg transition-colors"
                    >
                        "Export CSV"
                    </button>
                </div>

                <div class="flex flex-col md:flex-row gap-4 items-center">
                    // Day filter
                    <div class="flex items-center gap-2">
                        <input
                            type="date"
                            prop:value=move || {
                                day_filter.get().map(|d| d.to_string()).unwrap_or_default()
                            }
                            on:input=move |ev| {
                                set_day_filter.set(event_target_value(&ev).parse().ok());
                            }
                            class="px-3 py-2 border border-gray-200 rounded-lg \
                                   focus:border-blue-500 focus:outline-none"
                        />
                        {move || day_filter.get().map(|_| view! {
                            <button
                                on:click=move |_| set_day_filter.set(None)
                                class="text-sm text-gray-500 hover:text-gray-700"
                            >
                                "Clear"
                            </button>
                        })}
                    </div>

                    // Meal type filter
                    <select
                        on:change=move |ev| {
                            set_meal_filter.set(MealContext::from_key(&event_target_value(&ev)));
                        }
                        class="px-3 py-2 border border-gray-200 rounded-lg \
                               focus:border-blue-500 focus:outline-none"
                    >
                        <option value="">"All Types"</option>
                        <option value="before_meal">"Before Meal"</option>
                        <option value="after_meal">"After Meal"</option>
                    </select>

                    // Quick day shortcuts
                    <div class="flex items-center gap-2">
                        <button
                            on:click=move |_| {
                                set_day_filter.set(Some(Local::now().date_naive()))
                            }
                            class="text-sm px-3 py-1 bg-blue-100 text-blue-700 rounded-lg \
                                   hover:bg-blue-200 transition-colors"
                        >
                            "Today"
                        </button>
                        <button
                            on:click=move |_| {
                                set_day_filter.set(Some(
                                    Local::now().date_naive() - Duration::days(1),
                                ))
                            }
                            class="text-sm px-3 py-1 bg-gray-100 text-gray-700 rounded-lg \
                                   hover:bg-gray-200 transition-colors"
                        >
                            "Yesterday"
                        </button>
                    </div>
                </div>
            </div>

            // Results count
            <p class="text-gray-600">
                {move || format!("Showing {} of {} readings", filtered.get().len(), total())}
            </p>

            // Reading list
            {move || {
                if readings.loading.get() && readings.readings.get().is_none() {
                    return view! { <Loading /> }.into_view();
                }

                let rows = filtered.get();
                if rows.is_empty() {
                    view! {
                        <div class="bg-white rounded-xl p-12 text-center shadow-sm border border-gray-100">
                            <h3 class="text-lg font-semibold text-gray-900 mb-2">
                                "No readings found"
                            </h3>
                            <p class="text-gray-600">
                                "Try adjusting your search or filters, or add your first reading."
                            </p>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="space-y-4">
                            {rows.into_iter().map(|reading| view! {
                                <ReadingCard
                                    reading=reading
                                    on_delete=Callback::new(move |id| {
                                        set_pending_delete.set(Some(id))
                                    })
                                />
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}

            // Delete confirmation dialog
            {move || pending_delete.get().map(|_| view! {
                <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center \
                            justify-center z-50 p-4">
                    <div class="bg-white rounded-xl p-6 max-w-md w-full">
                        <h3 class="text-lg font-semibold text-gray-900 mb-4">
                            "Delete Reading"
                        </h3>
                        <p class="text-gray-600 mb-6">
                            "Are you sure you want to delete this glucose reading? \
                             This action cannot be undone."
                        </p>
                        <div class="flex gap-3">
                            <button
                                on:click=move |_| set_pending_delete.set(None)
                                class="flex-1 px-4 py-2 border border-gray-200 text-gray-700 \
                                       rounded-lg hover:bg-gray-50 transition-colors"
                            >
                                "Cancel"
                            </button>
                            <button
                                on:click=confirm_delete
                                disabled=move || deleting.get()
                                class="flex-1 px-4 py-2 bg-red-600 hover:bg-red-700 \
                                       disabled:opacity-50 text-white rounded-lg transition-colors"
                            >
                                {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

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

    fn sample() -> Vec<Reading> {
        let base = Local.with_ymd_and_hms(2026, 8, 10, 9, 0, 0).unwrap();
        vec![
            reading(
                "a",
                105.0,
                base.with_timezone(&Utc),
                Some(MealContext::BeforeMeal),
                Some("Morning walk"),
            ),
            reading(
                "b",
                145.0,
                (base + Duration::days(1)).with_timezone(&Utc),
                Some(MealContext::AfterMeal),
                None,
            ),
            reading(
                "c",
                98.0,
                (base + Duration::days(2)).with_timezone(&Utc),
                None,
                Some("stressful day"),
            ),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let rows = sample();
        assert_eq!(apply_filters(&rows, "", None, None).len(), 3);
    }

    #[test]
    fn test_search_matches_note_case_insensitive() {
        let rows = sample();
        let hits = apply_filters(&rows, "MORNING", None, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_search_matches_level_digits() {
        let rows = sample();
        let hits = apply_filters(&rows, "145", None, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn test_meal_type_filter() {
        let rows = sample();
        let hits = apply_filters(&rows, "", Some(MealContext::AfterMeal), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn test_day_filter_uses_local_date() {
        let rows = sample();
        let day = NaiveDate::from_ymd_opt(2026, 8, 11).unwrap();
        let hits = apply_filters(&rows, "", None, Some(day));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn test_filters_compose() {
        let rows = sample();
        let day = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let hits = apply_filters(&rows, "walk", Some(MealContext::BeforeMeal), Some(day));
        assert_eq!(hits.len(), 1);

        let none = apply_filters(&rows, "walk", Some(MealContext::AfterMeal), Some(day));
        assert!(none.is_empty());
    }
}
