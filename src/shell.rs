//! Tab Shell
//!
//! Top-level state: which view is showing, plus the session and the chat it
//! owns. The dashboard keeps no state here; it loads on each mount.

use crate::chat::ChatController;
use crate::history::MessageHistory;
use crate::session::SessionId;
use crate::store::KeyValueStore;

/// Badge shown on the right of the header
pub const HEADER_BADGE: &str = "250K txns · 2024";

/// Caption under the chat input
pub const FOOTER_CAPTION: &str = "InsightX · 250,000 UPI transactions · Jan–Dec 2024";

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Chat,
    Dashboard,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Chat, Tab::Dashboard];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Chat => "chat",
            Tab::Dashboard => "dashboard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Dashboard => "Dashboard",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Chat => "💬",
            Tab::Dashboard => "📊",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Tab::Chat),
            "dashboard" => Ok(Tab::Dashboard),
            other => Err(format!("Unknown tab: {}", other)),
        }
    }
}

/// One tab button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    pub tab: Tab,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Header display model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub tabs: Vec<TabButton>,
    /// The clear button only exists on the chat tab
    pub show_clear: bool,
    pub badge: &'static str,
}

impl HeaderView {
    pub fn new(active: Tab) -> Self {
        Self {
            tabs: Tab::ALL
                .iter()
                .map(|&tab| TabButton {
                    tab,
                    label: tab.label(),
                    icon: tab.icon(),
                    active: tab == active,
                })
                .collect(),
            show_clear: active == Tab::Chat,
            badge: HEADER_BADGE,
        }
    }
}

/// Application shell
///
/// Initializes the session once and owns the chat for the process lifetime.
/// Switching tabs only changes visibility, the chat keeps its state.
#[derive(Debug)]
pub struct Shell<S> {
    active: Tab,
    chat: ChatController<S>,
}

impl<S: KeyValueStore + Clone> Shell<S> {
    /// Read (or create) the session id and rehydrate the history
    pub fn init(store: S) -> Self {
        let session_id = SessionId::load_or_create(&store);
        let history = MessageHistory::load(store);
        tracing::debug!(
            session_id = %session_id,
            messages = history.len(),
            "Shell initialized"
        );

        Self {
            active: Tab::default(),
            chat: ChatController::new(session_id, history),
        }
    }
}

impl<S: KeyValueStore> Shell<S> {
    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active != tab {
            tracing::debug!(from = self.active.id(), to = tab.id(), "Switching tab");
            self.active = tab;
        }
    }

    pub fn session_id(&self) -> &SessionId {
        self.chat.session_id()
    }

    pub fn chat(&self) -> &ChatController<S> {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatController<S> {
        &mut self.chat
    }

    /// Header "Clear" action
    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }

    pub fn header(&self) -> HeaderView {
        HeaderView::new(self.active)
    }

    /// Tear down: ignore anything still in flight
    pub fn shutdown(&mut self) {
        self.chat.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Message;
    use crate::store::{MemoryStore, MESSAGES_KEY};

    #[test]
    fn test_starts_on_chat() {
        let shell = Shell::init(MemoryStore::new());
        assert_eq!(shell.active_tab(), Tab::Chat);
        assert!(shell.header().show_clear);
    }

    #[test]
    fn test_header_follows_tab() {
        let mut shell = Shell::init(MemoryStore::new());
        shell.select_tab(Tab::Dashboard);

        let header = shell.header();
        assert!(!header.show_clear);
        let active: Vec<Tab> = header.tabs.iter().filter(|b| b.active).map(|b| b.tab).collect();
        assert_eq!(active, vec![Tab::Dashboard]);
        assert_eq!(header.badge, HEADER_BADGE);
    }

    #[test]
    fn test_session_reused_across_inits() {
        let store = MemoryStore::new();
        let first = Shell::init(store.clone()).session_id().clone();
        let second = Shell::init(store).session_id().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tab_switch_keeps_chat() {
        let store = MemoryStore::new();
        let mut shell = Shell::init(store);
        let pending = shell.chat_mut().begin_send(Some("hello")).unwrap();

        shell.select_tab(Tab::Dashboard);
        shell.select_tab(Tab::Chat);

        assert!(shell.chat().is_busy());
        shell.chat_mut().complete(pending, Err(crate::error::ClientError::Timeout));
        assert_eq!(shell.chat().messages().len(), 2);
    }

    #[test]
    fn test_clear_chat_then_reload() {
        let store = MemoryStore::new();
        let mut shell = Shell::init(store.clone());
        let pending = shell.chat_mut().begin_send(Some("q")).unwrap();
        shell.chat_mut().complete(pending, Err(crate::error::ClientError::Timeout));

        shell.clear_chat();
        assert!(shell.chat().messages().is_empty());
        assert!(!store.contains(MESSAGES_KEY));

        let reloaded = Shell::init(store);
        assert_eq!(reloaded.chat().messages(), &[] as &[Message]);
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("dashboard".parse::<Tab>(), Ok(Tab::Dashboard));
        assert_eq!(Tab::Chat.id().parse::<Tab>(), Ok(Tab::Chat));
        assert!("settings".parse::<Tab>().is_err());
    }
}
