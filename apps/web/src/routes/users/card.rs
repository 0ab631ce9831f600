use crate::{app_lib::theme::Theme, components::Badge, features::users::card::UserCard};
use leptos::prelude::*;

/// One user card: email heading, role badges, then the detail lines.
#[component]
pub fn UserCardView(card: UserCard) -> impl IntoView {
    let UserCard {
        title,
        roles,
        login_id,
        country,
        created,
        last_sync,
        ..
    } = card;
    let has_roles = !roles.is_empty();

    view! {
        <div class=Theme::CARD>
            <div class="flex flex-col gap-3">
                <div>
                    <div class="text-sm font-bold text-gray-900 dark:text-white break-all">{title}</div>
                    <Show when=move || has_roles>
                        <div class="mt-1 flex flex-wrap gap-1">
                            {roles.clone().into_iter().map(|role| view! { <Badge label=role /> }).collect_view()}
                        </div>
                    </Show>
                </div>
                <div class=Theme::MUTED>
                    <div><strong>"Login ID:"</strong> " " {login_id}</div>
                    <div><strong>"Country:"</strong> " " {country}</div>
                    {created.map(|date| view! { <div><strong>"Created:"</strong> " " {date}</div> })}
                    {last_sync.map(|date| view! { <div><strong>"Last Sync:"</strong> " " {date}</div> })}
                </div>
            </div>
        </div>
    }
}
