//! Loading Component
//!
//! Loading spinners and skeleton states.

use leptos::*;

/// Full-width loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Skeleton loader for stat cards
#[component]
pub fn CardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl p-6 shadow-sm border border-gray-100 animate-pulse">
            <div class="h-4 bg-gray-200 rounded w-1/3 mb-4" />
            <div class="h-8 bg-gray-200 rounded w-1/2 mb-2" />
            <div class="h-4 bg-gray-200 rounded w-2/3" />
        </div>
    }
}
