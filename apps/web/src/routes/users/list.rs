//! The users list: header counters, a card grid and Previous/Next paging.
//! Every page change issues exactly one request; the latest response to
//! settle wins.

use crate::{
    app_lib::theme::Theme,
    components::{Alert, AppShell, Spinner},
    features::users::{
        card::UserCard,
        client,
        state::{ListView, PER_PAGE, UserListState},
    },
    routes::users::card::UserCardView,
};
use leptos::{logging, prelude::*, task::spawn_local};

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <AppShell>
            <UserList />
        </AppShell>
    }
}

/// Fetches the current page on mount and whenever the page number changes.
#[component]
pub fn UserList() -> impl IntoView {
    let state = RwSignal::new(UserListState::new());
    let page = Memo::new(move |_| state.with(UserListState::page));

    Effect::new(move |_| {
        let page = page.get();
        state.update(UserListState::begin_fetch);
        spawn_local(async move {
            let result = client::list_users(page, PER_PAGE).await;
            if let Err(err) = &result {
                logging::error!("Error fetching users: {err}");
            }
            state.update(|s| s.apply(result));
        });
    });

    let on_previous = move |_| {
        state.update(|s| {
            s.previous();
        });
    };
    let on_next = move |_| {
        state.update(|s| {
            s.next();
        });
    };

    move || {
        state.with(|s| match s.view() {
            ListView::Loading => view! {
                <div class="flex min-h-[50vh] items-center justify-center">
                    <Spinner />
                </div>
            }
            .into_any(),
            ListView::Failed(message) => view! {
                <div class="flex min-h-[50vh] items-center justify-center">
                    <Alert title="Error" message=message.to_string() />
                </div>
            }
            .into_any(),
            ListView::Ready(users) => {
                let cards: Vec<UserCard> = users.iter().map(UserCard::from).collect();
                view! {
                    <div class="space-y-6">
                        <div class="flex items-center justify-between">
                            <div class="space-y-1">
                                <h2 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                    "User List"
                                </h2>
                                <p class=Theme::MUTED>{s.total_label()}</p>
                            </div>
                            <p class=Theme::MUTED>{s.showing_label()}</p>
                        </div>

                        <div class=Theme::CARD_GRID>
                            <For
                                each=move || cards.clone()
                                key=|card| card.id
                                children=|card| view! { <UserCardView card=card /> }
                            />
                        </div>

                        <div class="flex items-center justify-center gap-3">
                            <button
                                type="button"
                                class=Theme::PAGER_BUTTON
                                disabled=!s.can_previous()
                                on:click=on_previous
                            >
                                "Previous"
                            </button>
                            <span class="text-gray-900 dark:text-white">{s.page_label()}</span>
                            <button
                                type="button"
                                class=Theme::PAGER_BUTTON
                                disabled=!s.can_next()
                                on:click=on_next
                            >
                                "Next"
                            </button>
                        </div>
                    </div>
                }
                .into_any()
            }
        })
    }
}
