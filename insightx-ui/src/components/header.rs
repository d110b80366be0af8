//! Header Component
//!
//! Brand, tab buttons, the chat "Clear" action and the dataset badge.

use leptos::*;

use insightx::shell::TabButton;

use crate::state::use_app_state;

/// Header bar
#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();
    let header = state.header();
    let state_for_clear = state.clone();

    view! {
        <header class="header">
            <div class="header-brand">
                <span class="header-logo">"⚡"</span>
                <span class="header-title">"InsightX"</span>
            </div>

            <nav class="header-tabs">
                {move || {
                    header
                        .get()
                        .tabs
                        .into_iter()
                        .map(|button| view! { <TabLink button=button /> })
                        .collect_view()
                }}
            </nav>

            <div class="header-actions">
                <Show when=move || header.get().show_clear>
                    {
                        let state = state_for_clear.clone();
                        view! {
                            <button class="clear-btn" on:click=move |_| state.clear_chat()>
                                "Clear"
                            </button>
                        }
                    }
                </Show>
                <span class="header-badge">{move || header.get().badge}</span>
            </div>
        </header>
    }
}

/// Single tab button
#[component]
fn TabLink(button: TabButton) -> impl IntoView {
    let state = use_app_state();
    let tab = button.tab;
    let class = if button.active { "tab-btn active" } else { "tab-btn" };

    view! {
        <button class=class on:click=move |_| state.select_tab(tab)>
            <span class="tab-icon">{button.icon}</span>
            " "
            {button.label}
        </button>
    }
}
