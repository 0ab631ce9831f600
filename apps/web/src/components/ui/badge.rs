use crate::app_lib::theme::Theme;
use leptos::prelude::*;

/// Soft badge for a single role name.
#[component]
pub fn Badge(label: String) -> impl IntoView {
    view! { <span class=Theme::BADGE>{label}</span> }
}
