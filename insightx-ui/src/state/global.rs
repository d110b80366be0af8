//! Global Application State
//!
//! The tab shell (session, chat, active tab) lives in one signal for the
//! lifetime of the page; pages read it through memos so unrelated changes do
//! not re-render them.

use leptos::*;

use insightx::chat::PendingAsk;
use insightx::shell::{HeaderView, Shell, Tab};
use insightx::QaClient;

use crate::api::GlooClient;
use crate::store::LocalStore;

/// Global application state provided to all components
#[derive(Clone)]
pub struct AppState {
    pub shell: RwSignal<Shell<LocalStore>>,
    pub client: GlooClient,
}

/// Read the session and history, then provide the state to the tree
pub fn provide_app_state() -> AppState {
    let state = AppState {
        shell: create_rw_signal(Shell::init(LocalStore)),
        client: GlooClient::from_storage(),
    };

    provide_context(state.clone());
    state
}

/// Fetch the state provided by [`provide_app_state`]
pub fn use_app_state() -> AppState {
    use_context::<AppState>().expect("AppState not found")
}

impl AppState {
    pub fn active_tab(&self) -> Memo<Tab> {
        let shell = self.shell;
        create_memo(move |_| shell.with(|s| s.active_tab()))
    }

    pub fn header(&self) -> Memo<HeaderView> {
        let shell = self.shell;
        create_memo(move |_| shell.with(|s| s.header()))
    }

    pub fn select_tab(&self, tab: Tab) {
        self.shell.update(|s| s.select_tab(tab));
    }

    pub fn clear_chat(&self) {
        self.shell.update(|s| s.clear_chat());
    }

    /// Send `text` (or the input box) and append the reply when it lands
    ///
    /// The request runs detached from the signal borrow; a reply arriving
    /// after [`Shell::shutdown`] or after the state is disposed is dropped.
    pub fn send(&self, text: Option<String>) {
        let pending: Option<PendingAsk> = self
            .shell
            .try_update(|s| s.chat_mut().begin_send(text.as_deref()))
            .flatten();
        let Some(pending) = pending else {
            return;
        };

        let shell = self.shell;
        let client = self.client.clone();
        spawn_local(async move {
            let outcome = client.ask(pending.request()).await;
            if let Err(e) = &outcome {
                web_sys::console::error_1(&format!("Ask failed: {}", e).into());
            }
            shell.try_update(|s| s.chat_mut().complete(pending, outcome));
        });
    }
}
