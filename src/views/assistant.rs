use crate::state::AppState;
use crate::types::Sender;
use crate::ui::use_controller;
use crate::views::shared::markdown_to_html;
use dioxus::events::Key;
use dioxus::prelude::*;

/// Browser-side copy for builds without a native clipboard.
#[cfg_attr(any(feature = "desktop", feature = "mobile"), allow(dead_code))]
fn clipboard_script(text: &str) -> String {
    // A JSON string literal is a valid JS string literal.
    let literal = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!("await navigator.clipboard.writeText({literal});")
}

fn row_class(from: Sender) -> &'static str {
    match from {
        Sender::User => "message-row user",
        Sender::Assistant => "message-row assistant",
    }
}

#[component]
pub fn AssistantPanel(state: Signal<AppState>) -> Element {
    let controller = use_controller();
    let chat = state.read().chat.clone();

    let send = {
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            spawn(async move {
                controller.send_chat().await;
            });
        }
    };
    let send_on_enter = send.clone();
    let on_input = move |ev: FormEvent| controller.set_chat_input(ev.value());

    rsx! {
        section { class: "card",
            div { class: "section-header",
                h2 { class: "section-title", "AI Assistant" }
                if chat.busy {
                    span { class: "text-muted", "Thinking…" }
                }
            }
            div { class: "assistant-grid",
                form {
                    class: "stack",
                    onsubmit: move |ev: FormEvent| {
                        ev.prevent_default();
                        send();
                    },
                    label { class: "field",
                        span { "Ask about your notes or tasks" }
                        textarea {
                            rows: "3",
                            value: "{chat.input}",
                            placeholder: "For example: 'Give me a summary of my notes' or 'What should I do next?'",
                            oninput: on_input,
                            onkeydown: move |ev: KeyboardEvent| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    send_on_enter();
                                }
                            },
                        }
                    }
                    button {
                        class: "btn btn-accent",
                        r#type: "submit",
                        disabled: chat.busy,
                        if chat.busy { "Thinking..." } else { "Ask assistant" }
                    }
                }
                div { class: "chat-list",
                    if chat.transcript.is_empty() {
                        p { class: "text-muted",
                            "No conversation yet. Ask the assistant something about your notes or tasks, like “summarize my tasks”."
                        }
                    }
                    for (i, msg) in chat.transcript.iter().enumerate() {
                        div { key: "{i}", class: row_class(msg.from),
                            if matches!(msg.from, Sender::Assistant) {
                                AssistantBubble { content: msg.text.clone() }
                            } else {
                                div { class: "bubble user", "{msg.text}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Err(err) = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(raw)) {
                    tracing::warn!(error = %err, "copy to clipboard failed");
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            {
                if let Err(err) = document::eval(&clipboard_script(&raw)).await {
                    tracing::warn!(error = %err, "copy to clipboard failed");
                }
            }
        });
    };

    rsx! {
        div { class: "bubble assistant",
            div { class: "md", dangerous_inner_html: "{content_html}" }
            div { class: "bubble-controls",
                button { class: "action-btn", title: "Copy reply", onclick: on_copy, "Copy" }
            }
        }
    }
}
