use crate::api::ApiClient;
use crate::config::{AppConfig, FeatureSet};
use crate::controller::Controller;
use crate::identity::FirebaseIdentity;
use crate::state::AppState;
use crate::views::{AssistantPanel, ErrorBanner, NotesModule, SessionBar, TasksModule};
use dioxus::prelude::*;
use std::rc::Rc;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// The controller as wired into the component tree.
pub type UiController = Controller<Signal<AppState>>;

pub fn use_controller() -> UiController {
    use_context::<UiController>()
}

#[component]
pub fn App() -> Element {
    let config = use_hook(|| {
        AppConfig::load().unwrap_or_else(|err| {
            tracing::error!(error = %err, "invalid configuration; using defaults");
            AppConfig::default()
        })
    });
    let state = use_signal(AppState::default);
    let controller = use_context_provider(|| {
        tracing::info!(backend = %config.backend_url, features = ?config.features, "starting");
        Controller::new(
            state,
            Rc::new(ApiClient::new(config.backend_url.clone())),
            Rc::new(FirebaseIdentity::new(config.firebase.clone())),
            config.features,
        )
    });

    use_hook(move || {
        spawn(async move {
            controller.check_backend().await;
        });
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SessionBar { state }
        div { class: "main-container",
            ErrorBanner { state }
            MainPanels { state, features: config.features }
        }
    }
}

/// The signed-in view, assembled from whichever feature modules are
/// enabled.
#[component]
fn MainPanels(state: Signal<AppState>, features: FeatureSet) -> Element {
    if !state.read().is_signed_in() {
        return rsx! {
            div { class: "signed-out",
                p { "Please sign in to view and manage your notes and tasks." }
            }
        };
    }

    rsx! {
        div { class: "modules",
            if features.notes {
                NotesModule { state }
            }
            if features.tasks {
                TasksModule { state }
            }
            if features.assistant {
                AssistantPanel { state }
            }
        }
    }
}
