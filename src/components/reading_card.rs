//! Reading Card Component
//!
//! One glucose reading in a list: level with classification color, meal
//! context, time, note, and an optional delete action.

use chrono::Local;
use leptos::*;

use crate::model::{meal_label, Reading};
use crate::stats::{classify, GlucoseStatus};

fn status_classes(status: GlucoseStatus) -> &'static str {
    match status {
        GlucoseStatus::Low => "bg-red-100 text-red-700",
        GlucoseStatus::Normal => "bg-green-100 text-green-700",
        GlucoseStatus::Elevated => "bg-yellow-100 text-yellow-700",
        GlucoseStatus::High => "bg-red-100 text-red-700",
    }
}

/// Card for a single reading
#[component]
pub fn ReadingCard(
    reading: Reading,
    /// Delete request with the reading id; omits the button when absent
    #[prop(optional)]
    on_delete: Option<Callback<String>>,
) -> impl IntoView {
    let status = classify(reading.level);
    let when = reading
        .logged_at
        .with_timezone(&Local)
        .format("%b %-d, %-I:%M %p")
        .to_string();
    let id = reading.id.clone();

    view! {
        <div class="bg-white rounded-xl p-5 shadow-sm border border-gray-100 flex items-center justify-between">
            <div class="flex items-center gap-4">
                <div class="text-center">
                    <div class="text-2xl font-bold text-gray-900">
                        {format!("{:.0}", reading.level)}
                    </div>
                    <div class="text-xs text-gray-500">"mg/dL"</div>
                </div>

                <div>
                    <div class="flex items-center gap-2">
                        <span class=format!(
                            "inline-flex items-center px-2 py-1 rounded-full text-xs font-medium {}",
                            status_classes(status)
                        )>
                            {status.label()}
                        </span>
                        <span class="text-sm text-gray-600">{meal_label(reading.meal_type)}</span>
                    </div>
                    <div class="text-sm text-gray-500 mt-1">{when}</div>
                    {reading.note.clone().map(|note| view! {
                        <div class="text-sm text-gray-600 mt-1 italic">{note}</div>
                    })}
                </div>
            </div>

            {on_delete.map(|on_delete| view! {
                <button
                    on:click=move |_| on_delete.call(id.clone())
                    class="px-3 py-2 text-red-600 hover:bg-red-50 rounded-lg transition-colors text-sm"
                >
                    "Delete"
                </button>
            })}
        </div>
    }
}
