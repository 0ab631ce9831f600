use crate::app_lib::{build_info, config::AppConfig};
use crate::components::AppShell;
use leptos::prelude::*;

/// Build version of the dashboard and the API it talks to.
#[component]
pub fn HealthPage() -> impl IntoView {
    let commit = build_info::git_commit_hash();
    let api_base_url = AppConfig::load().api_base_url;

    view! {
        <AppShell>
            <div class="flex justify-center">
                <div class="block max-w-[38rem] rounded-lg border border-neutral-200 bg-white dark:border-neutral-300 dark:bg-neutral-600">
                    <div class="border-b-2 border-[#0000002d] px-6 py-3 text-neutral-600 dark:text-neutral-50 font-semibold">
                        "Build Version"
                    </div>
                    <div class="p-6 space-y-2 text-base text-black dark:text-neutral-50">
                        <pre class="text-center">{commit}</pre>
                        <p class="text-center text-sm text-neutral-500 dark:text-neutral-300">
                            "API: " {api_base_url}
                        </p>
                    </div>
                </div>
            </div>
        </AppShell>
    }
}
