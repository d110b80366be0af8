//! Message Components
//!
//! One chat bubble per message, plus the typing indicator.

use leptos::*;

use insightx::render::{Align, MessageView, ASSISTANT_AVATAR, TYPING_DOTS};
use insightx::Message;

/// Chat bubble
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let view_model = MessageView::of(&message);
    let row_class = match view_model.align {
        Align::End => "message-row user",
        Align::Start => "message-row assistant",
    };
    let avatar = view_model.avatar;
    let author = view_model.author;
    let content = view_model.content.to_string();

    view! {
        <div class=row_class>
            <div class="message-avatar">{avatar}</div>
            <div class="message-bubble">
                {author.map(|name| view! { <div class="message-author">{name}</div> })}
                <div class="message-content">{content}</div>
            </div>
        </div>
    }
}

/// Animated dots shown while a reply is pending
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="message-row assistant">
            <div class="message-avatar">{ASSISTANT_AVATAR}</div>
            <div class="message-bubble typing">
                {(0..TYPING_DOTS).map(|_| view! { <span class="typing-dot" /> }).collect_view()}
            </div>
        </div>
    }
}
