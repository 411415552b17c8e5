//! Add Log Page
//!
//! Multi-step form for logging a reading, driven by the wizard state
//! machine: meal context, test time, level, notes, review.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use leptos::*;
use leptos_router::use_navigate;

use crate::model::MealContext;
use crate::state::readings::add_reading;
use crate::state::{use_readings, use_session};
use crate::stats::classify;
use crate::wizard::{Wizard, WizardStep, QUICK_TAGS};

const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn format_datetime_local(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format(DATETIME_LOCAL_FORMAT)
        .to_string()
}

fn parse_datetime_local(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

/// Add log page component
#[component]
pub fn AddLog() -> impl IntoView {
    let session = use_session();
    let readings = use_readings();
    // Stored so the submit handler stays Copy for the reactive button
    let navigate = store_value(use_navigate());

    let wizard = create_rw_signal(Wizard::new(Utc::now()));
    let (submitting, set_submitting) = create_signal(false);

    let on_next = move |_| {
        wizard.update(|w| {
            w.advance(Utc::now());
        });
    };
    let on_back = move |_| {
        wizard.update(|w| {
            w.back();
        });
    };

    let on_submit = move |_| {
        let now = Utc::now();
        let form = wizard.get();
        if !form.can_submit(now) || submitting.get() {
            return;
        }
        let Some(owner) = session.identity.get() else {
            readings.show_error("Not signed in");
            return;
        };

        set_submitting.set(true);
        spawn_local(async move {
            // Single attempt: on failure we stay on review with the form
            // intact so the user can resubmit
            match add_reading(readings, &owner, form.draft()).await {
                Ok(()) => navigate.with_value(|nav| nav("/dashboard", Default::default())),
                Err(e) => readings.show_error(&e.to_string()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-xl mx-auto space-y-6">
            // Header with progress
            <div class="text-center">
                <h1 class="text-2xl font-bold text-gray-900">"Add Glucose Reading"</h1>
                <p class="text-gray-600 mt-1">
                    {move || format!("Step {} of {}", wizard.get().step.position(), WizardStep::SEQUENCE.len())}
                </p>
            </div>

            <ProgressDots wizard=wizard />

            // Active step
            <div class="bg-white rounded-xl p-8 shadow-sm border border-gray-100">
                <h2 class="text-xl font-semibold text-gray-900 mb-6 text-center">
                    {move || wizard.get().step.title()}
                </h2>

                {move || match wizard.get().step {
                    WizardStep::MealContext => view! { <MealContextStep wizard=wizard /> }.into_view(),
                    WizardStep::TestTime => view! { <TestTimeStep wizard=wizard /> }.into_view(),
                    WizardStep::Level => view! { <LevelStep wizard=wizard /> }.into_view(),
                    WizardStep::Notes => view! { <NotesStep wizard=wizard /> }.into_view(),
                    WizardStep::Review => view! { <ReviewStep wizard=wizard /> }.into_view(),
                }}
            </div>

            // Navigation
            <div class="flex justify-between">
                <button
                    on:click=on_back
                    disabled=move || wizard.get().step == WizardStep::MealContext
                    class="px-6 py-3 border border-gray-200 text-gray-700 rounded-lg \
                           hover:bg-gray-50 disabled:opacity-50 transition-colors"
                >
                    "Back"
                </button>

                {move || {
                    if wizard.get().step == WizardStep::Review {
                        view! {
                            <button
                                on:click=on_submit
                                disabled=move || {
                                    !wizard.get().can_submit(Utc::now()) || submitting.get()
                                }
                                class="px-6 py-3 bg-green-600 hover:bg-green-700 text-white \
                                       rounded-lg font-semibold disabled:bg-gray-300 transition-colors"
                            >
                                {move || if submitting.get() { "Saving..." } else { "Save Reading" }}
                            </button>
                        }.into_view()
                    } else {
                        view! {
                            <button
                                on:click=on_next
                                disabled=move || !wizard.get().step_valid(Utc::now())
                                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white \
                                       rounded-lg font-semibold disabled:bg-gray-300 transition-colors"
                            >
                                "Next"
                            </button>
                        }.into_view()
                    }
                }}
            </div>
        </div>
    }
}

/// Step progress indicator
#[component]
fn ProgressDots(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2">
            {WizardStep::SEQUENCE.into_iter().map(|step| {
                view! {
                    <div class=move || {
                        let current = wizard.get().step.position();
                        if step.position() <= current {
                            "w-8 h-2 rounded-full bg-blue-600 transition-colors"
                        } else {
                            "w-8 h-2 rounded-full bg-gray-200 transition-colors"
                        }
                    } />
                }
            }).collect_view()}
        </div>
    }
}

#[component]
fn MealContextStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let choice = move |meal: MealContext, icon: &'static str, label: &'static str| {
        view! {
            <button
                type="button"
                on:click=move |_| wizard.update(|w| w.meal_type = Some(meal))
                class=move || {
                    let base = "w-full p-6 rounded-xl border-2 transition-colors";
                    if wizard.get().meal_type == Some(meal) {
                        format!("{base} border-blue-600 bg-blue-50 text-blue-600")
                    } else {
                        format!("{base} border-gray-200 hover:border-gray-300")
                    }
                }
            >
                <div class="text-3xl mb-2">{icon}</div>
                <div class="font-semibold">{label}</div>
            </button>
        }
    };

    view! {
        <div class="space-y-4">
            {choice(MealContext::BeforeMeal, "🍽", "Before Meal")}
            {choice(MealContext::AfterMeal, "✅", "After Meal")}
        </div>
    }
}

#[component]
fn TestTimeStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <input
                type="datetime-local"
                // The picker cannot exceed the current time
                max=format_datetime_local(Utc::now())
                prop:value=move || format_datetime_local(wizard.get().test_time)
                on:input=move |ev| {
                    if let Some(time) = parse_datetime_local(&event_target_value(&ev)) {
                        wizard.update(|w| w.test_time = time);
                    }
                }
                class="w-full px-4 py-3 border border-gray-200 rounded-lg \
                       focus:border-blue-500 focus:outline-none"
            />
            {move || {
                if wizard.get().test_time > Utc::now() {
                    view! {
                        <p class="text-sm text-red-600">"Test time cannot be in the future"</p>
                    }.into_view()
                } else {
                    view! {
                        <p class="text-sm text-gray-500">"Backdated entries are fine"</p>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn LevelStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="relative">
                <input
                    type="number"
                    min="10"
                    max="600"
                    placeholder="Enter glucose level"
                    prop:value=move || {
                        wizard.get().level.map(|l| l.to_string()).unwrap_or_default()
                    }
                    on:input=move |ev| {
                        let level = event_target_value(&ev).parse::<f64>().ok();
                        wizard.update(|w| w.level = level);
                    }
                    class="w-full px-4 py-3 text-center text-2xl font-bold border \
                           border-gray-200 rounded-lg focus:border-blue-500 focus:outline-none"
                />
                <span class="absolute right-4 top-1/2 -translate-y-1/2 text-gray-500">
                    "mg/dL"
                </span>
            </div>

            // Live classification preview or validation error
            {move || {
                match wizard.get().level {
                    Some(level) if crate::model::level_in_domain(level) => {
                        let status = classify(level);
                        view! {
                            <p class="text-center text-sm font-medium text-gray-600">
                                {format!("Status: {}", status.label())}
                            </p>
                        }.into_view()
                    }
                    Some(_) => view! {
                        <p class="text-center text-sm text-red-600">
                            "Glucose level must be between 10 and 600 mg/dL"
                        </p>
                    }.into_view(),
                    None => view! {
                        <p class="text-center text-sm text-gray-500">
                            "Typical readings fall between 70 and 200 mg/dL"
                        </p>
                    }.into_view(),
                }
            }}
        </div>
    }
}

#[component]
fn NotesStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <textarea
                placeholder="Optional note about this reading..."
                prop:value=move || wizard.get().note
                on:input=move |ev| {
                    let note = event_target_value(&ev);
                    wizard.update(|w| w.note = note);
                }
                class="w-full px-4 py-3 border border-gray-200 rounded-lg h-24 \
                       focus:border-blue-500 focus:outline-none resize-none"
            />

            <div>
                <p class="text-sm text-gray-600 mb-2">"Quick tags"</p>
                <div class="flex flex-wrap gap-2">
                    {QUICK_TAGS.into_iter().map(|tag| {
                        view! {
                            <button
                                type="button"
                                on:click=move |_| wizard.update(|w| w.toggle_tag(tag))
                                class=move || {
                                    let base = "px-3 py-1 rounded-full text-sm transition-colors";
                                    if wizard.get().tags.iter().any(|t| t == tag) {
                                        format!("{base} bg-blue-600 text-white")
                                    } else {
                                        format!("{base} bg-gray-100 text-gray-700 hover:bg-gray-200")
                                    }
                                }
                            >
                                {tag}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
fn ReviewStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let row = |label: &'static str, value: Signal<String>| {
        view! {
            <div class="flex justify-between py-3 border-b border-gray-100 last:border-0">
                <span class="text-gray-600">{label}</span>
                <span class="font-medium text-gray-900">{move || value.get()}</span>
            </div>
        }
    };

    view! {
        <div>
            {row("Meal Context", Signal::derive(move || {
                crate::model::meal_label(wizard.get().meal_type).to_string()
            }))}
            {row("Test Time", Signal::derive(move || {
                wizard.get().test_time
                    .with_timezone(&Local)
                    .format("%b %-d, %Y at %-I:%M %p")
                    .to_string()
            }))}
            {row("Glucose Level", Signal::derive(move || {
                wizard.get().level
                    .map(|l| format!("{l:.0} mg/dL"))
                    .unwrap_or_else(|| "Not set".to_string())
            }))}
            {row("Notes", Signal::derive(move || {
                wizard.get().combined_note().unwrap_or_else(|| "None".to_string())
            }))}
        </div>
    }
}
