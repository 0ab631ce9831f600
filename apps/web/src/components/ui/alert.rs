//! Error banner. Messages must be safe to render and never carry backend detail.

use leptos::prelude::*;

/// Renders a titled error banner.
#[component]
pub fn Alert(title: &'static str, message: String) -> impl IntoView {
    view! {
        <div
            class="rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
            role="alert"
        >
            <h2 class="mb-2 text-lg font-semibold">{title}</h2>
            <p class="text-sm">{message}</p>
        </div>
    }
}
