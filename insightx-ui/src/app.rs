//! App Root Component
//!
//! Header plus whichever tab is active. Switching tabs remounts the page, so
//! the dashboard fetches on every visit while the chat keeps its state in
//! the shell.

use leptos::*;

use insightx::shell::Tab;

use crate::components::Header;
use crate::pages::{ChatPage, DashboardPage};
use crate::state::provide_app_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_app_state();
    let active = state.active_tab();

    let shell = state.shell;
    on_cleanup(move || {
        shell.try_update(|s| s.shutdown());
    });

    view! {
        <div class="app">
            <Header />

            <main class="main">
                {move || match active.get() {
                    Tab::Chat => view! { <ChatPage /> }.into_view(),
                    Tab::Dashboard => view! { <DashboardPage /> }.into_view(),
                }}
            </main>
        </div>
    }
}
