//! Chat Page
//!
//! Message list, suggested questions on an empty conversation, and the input
//! box. Enter sends, Shift+Enter inserts a newline.

use leptos::*;

use insightx::chat::SUGGESTED_QUESTIONS;
use insightx::shell::FOOTER_CAPTION;

use crate::components::{MessageBubble, TypingIndicator};
use crate::state::use_app_state;

/// Chat page component
#[component]
pub fn ChatPage() -> impl IntoView {
    let state = use_app_state();
    let shell = state.shell;

    let is_empty = create_memo(move |_| shell.with(|s| s.chat().messages().is_empty()));
    let input = create_memo(move |_| shell.with(|s| s.chat().input().to_string()));
    let busy = create_memo(move |_| shell.with(|s| s.chat().is_busy()));
    let can_send = create_memo(move |_| shell.with(|s| s.chat().can_send()));
    let scroll_key = create_memo(move |_| shell.with(|s| s.chat().scroll_key()));

    // Keep the newest message in view
    let bottom = create_node_ref::<html::Div>();
    create_effect(move |_| {
        let _ = scroll_key.get();
        if let Some(anchor) = bottom.get() {
            anchor.scroll_into_view();
        }
    });

    let state_for_keys = state.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state_for_keys.send(None);
        }
    };

    let state_for_button = state.clone();

    view! {
        <div class="chat-container">
            <div class="messages-area">
                <Show when=move || is_empty.get() fallback=move || view! { <MessageList /> }>
                    <Suggestions />
                </Show>

                <Show when=move || busy.get()>
                    <TypingIndicator />
                </Show>

                <div node_ref=bottom />
            </div>

            <div class="input-area">
                <div class="input-wrapper">
                    <textarea
                        class="chat-input"
                        rows="1"
                        placeholder="Ask a leadership question about your UPI data..."
                        prop:value=move || input.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            shell.update(|s| s.chat_mut().set_input(text));
                        }
                        on:keydown=on_keydown
                    />
                    <button
                        class="send-btn"
                        disabled=move || !can_send.get()
                        on:click=move |_| state_for_button.send(None)
                    >
                        "➤"
                    </button>
                </div>
                <p class="input-caption">{FOOTER_CAPTION}</p>
            </div>
        </div>
    }
}

/// Every message in order
///
/// Reads the list through a memo so typing in the input does not rebuild it.
#[component]
fn MessageList() -> impl IntoView {
    let shell = use_app_state().shell;
    let messages = create_memo(move |_| shell.with(|s| s.chat().messages().to_vec()));

    view! {
        {move || {
            messages
                .get()
                .into_iter()
                .map(|message| view! { <MessageBubble message=message /> })
                .collect_view()
        }}
    }
}

/// Welcome text and the question shortcuts
#[component]
fn Suggestions() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="welcome">
            <div class="welcome-icon">"⚡"</div>
            <h2 class="welcome-title">"What would you like to know?"</h2>
            <p class="welcome-text">
                "Ask anything about your 250K UPI transactions"
            </p>
            <div class="suggestions">
                {SUGGESTED_QUESTIONS
                    .iter()
                    .copied()
                    .map(|question| {
                        let state = state.clone();
                        view! {
                            <button
                                class="suggestion-btn"
                                on:click=move |_| state.send(Some(question.to_string()))
                            >
                                {question}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
