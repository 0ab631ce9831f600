use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div
            class="inline-block h-12 w-12 animate-spin rounded-full border-t-2 border-b-2 border-blue-500"
            role="status"
            aria-live="polite"
            aria-label="Loading"
        ></div>
    }
}
