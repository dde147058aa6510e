use crate::state::AppState;
use crate::ui::use_controller;
use dioxus::prelude::*;

#[component]
pub fn SessionBar(state: Signal<AppState>) -> Element {
    let controller = use_controller();
    let mut signing_in = use_signal(|| false);
    let session = state.read().session.clone();
    let backend_online = state.read().backend_online;

    let sign_in = {
        let controller = controller.clone();
        move |_| {
            if signing_in() {
                return;
            }
            signing_in.set(true);
            let controller = controller.clone();
            let mut pending = signing_in;
            spawn(async move {
                controller.sign_in().await;
                pending.set(false);
            });
        }
    };
    let sign_out = move |_| {
        let controller = controller.clone();
        spawn(async move {
            controller.sign_out().await;
        });
    };

    rsx! {
        div { class: "header",
            div { class: "header-content",
                h1 { class: "wordmark",
                    span { class: "accent", "AI" }
                    " Task Manager"
                }
                OnlineIndicator { online: backend_online }
                div { class: "session",
                    if let Some(session) = session {
                        div { class: "user",
                            if let Some(avatar) = session.user.avatar_url.clone() {
                                img { class: "avatar", src: "{avatar}", alt: "avatar" }
                            }
                            div { class: "user-text",
                                div { class: "user-name", "{session.user.name}" }
                                div { class: "user-email text-muted", "{session.user.email}" }
                            }
                        }
                        button { class: "btn btn-ghost", r#type: "button", onclick: sign_out, "Logout" }
                    } else {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: signing_in(),
                            onclick: sign_in,
                            if signing_in() { "Signing in…" } else { "Sign in with Google" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn OnlineIndicator(online: Option<bool>) -> Element {
    let (class, label) = match online {
        Some(true) => ("status-dot online", "Backend online"),
        Some(false) => ("status-dot offline", "Backend unreachable"),
        None => ("status-dot", "Checking backend…"),
    };
    rsx! {
        span { class: "{class}", title: "{label}", aria_label: "{label}" }
    }
}

#[component]
pub fn ErrorBanner(state: Signal<AppState>) -> Element {
    let error = state.read().error.clone();
    rsx! {
        if let Some(message) = error {
            div { class: "error-banner", role: "alert", "{message}" }
        }
    }
}
