//! Async half of the view state controller.
//!
//! [`Controller`] turns user intents into backend and identity calls and
//! writes the settled results back through a [`StateStore`]. In the UI the
//! store is a Dioxus signal; headless callers use [`LocalStore`].

use crate::api::Backend;
use crate::config::FeatureSet;
use crate::identity::IdentityProvider;
use crate::state::{AppState, Ticket};
use crate::types::{NoteDraft, TaskDraft};
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Somewhere an [`AppState`] lives.
pub trait StateStore: Clone + 'static {
    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R;
}

impl StateStore for Signal<AppState> {
    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut signal = *self;
        signal.with_mut(f)
    }
}

/// Single-threaded store for running the controller outside a component
/// tree.
#[derive(Clone, Default)]
pub struct LocalStore(Rc<RefCell<AppState>>);

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> AppState {
        self.0.borrow().clone()
    }
}

impl StateStore for LocalStore {
    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut *self.0.borrow_mut())
    }
}

pub struct Controller<S: StateStore> {
    store: S,
    backend: Rc<dyn Backend>,
    identity: Rc<dyn IdentityProvider>,
    features: FeatureSet,
}

impl<S: StateStore> Clone for Controller<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            backend: Rc::clone(&self.backend),
            identity: Rc::clone(&self.identity),
            features: self.features,
        }
    }
}

impl<S: StateStore> Controller<S> {
    pub fn new(
        store: S,
        backend: Rc<dyn Backend>,
        identity: Rc<dyn IdentityProvider>,
        features: FeatureSet,
    ) -> Self {
        Self {
            store,
            backend,
            identity,
            features,
        }
    }

    // ---- session ----

    /// Runs the interactive sign-in; on success loads every enabled list
    /// exactly once for the new session.
    pub async fn sign_in(&self) {
        self.store.update(AppState::begin_sign_in);
        match self.identity.sign_in().await {
            Ok(identity) => {
                tracing::info!(email = %identity.user.email, "signed in");
                let ticket = self.store.update(|state| state.establish_session(identity));
                self.refresh(&ticket).await;
            }
            Err(err) => {
                tracing::error!(error = %err, "sign-in failed");
                self.store.update(AppState::sign_in_failed);
            }
        }
    }

    pub async fn sign_out(&self) {
        if let Err(err) = self.identity.sign_out().await {
            tracing::error!(error = %err, "provider sign-out failed; clearing local session anyway");
        }
        self.store.update(AppState::reset_session);
        tracing::info!("signed out");
    }

    /// Fetches the enabled lists concurrently. Both lists enter loading in
    /// one update before either request is polled.
    pub async fn refresh(&self, ticket: &Ticket) {
        let features = self.features;
        let (notes, tasks) = self.store.update(|state| {
            let notes = features.notes && state.begin_notes_load(ticket);
            let tasks = features.tasks && state.begin_tasks_load(ticket);
            (notes, tasks)
        });
        let notes = async {
            if notes {
                self.fetch_notes(ticket).await;
            }
        };
        let tasks = async {
            if tasks {
                self.fetch_tasks(ticket).await;
            }
        };
        futures::join!(notes, tasks);
    }

    // ---- notes ----

    pub async fn load_notes(&self, ticket: &Ticket) {
        if self.store.update(|state| state.begin_notes_load(ticket)) {
            self.fetch_notes(ticket).await;
        }
    }

    async fn fetch_notes(&self, ticket: &Ticket) {
        let result = self.backend.list_notes(&ticket.token).await.map_err(|err| {
            tracing::error!(error = %err, "fetch notes failed");
        });
        self.store.update(|state| state.finish_notes_load(ticket, result));
    }

    pub fn edit_note_draft(&self, edit: impl FnOnce(&mut NoteDraft)) {
        self.store.update(|state| edit(&mut state.note_draft));
    }

    pub async fn create_note(&self) {
        if !self.features.notes {
            return;
        }
        let Some((ticket, draft)) = self.store.update(AppState::begin_note_create) else {
            return;
        };
        let result = self
            .backend
            .create_note(&ticket.token, &draft)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "create note failed");
            });
        self.store.update(|state| state.finish_note_create(&ticket, result));
    }

    // ---- tasks ----

    pub async fn load_tasks(&self, ticket: &Ticket) {
        if self.store.update(|state| state.begin_tasks_load(ticket)) {
            self.fetch_tasks(ticket).await;
        }
    }

    async fn fetch_tasks(&self, ticket: &Ticket) {
        let result = self.backend.list_tasks(&ticket.token).await.map_err(|err| {
            tracing::error!(error = %err, "fetch tasks failed");
        });
        self.store.update(|state| state.finish_tasks_load(ticket, result));
    }

    pub fn edit_task_draft(&self, edit: impl FnOnce(&mut TaskDraft)) {
        self.store.update(|state| edit(&mut state.task_draft));
    }

    pub async fn create_task(&self) {
        if !self.features.tasks {
            return;
        }
        let Some((ticket, draft)) = self.store.update(AppState::begin_task_create) else {
            return;
        };
        let result = self
            .backend
            .create_task(&ticket.token, &draft)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "create task failed");
            });
        self.store.update(|state| state.finish_task_create(&ticket, result));
    }

    // ---- assistant ----

    pub fn set_chat_input(&self, input: String) {
        self.store.update(|state| state.chat.input = input);
    }

    pub async fn send_chat(&self) {
        if !self.features.assistant {
            return;
        }
        let Some((ticket, message)) = self.store.update(AppState::begin_chat) else {
            return;
        };
        let result = self
            .backend
            .send_chat_message(&ticket.token, &message)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "assistant request failed");
            });
        self.store.update(|state| state.finish_chat(&ticket, result));
    }

    // ---- backend ----

    /// Probes the backend and records reachability. Never touches the
    /// error banner.
    pub async fn check_backend(&self) {
        let online = match self.backend.health().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "backend health check failed");
                false
            }
        };
        self.store.update(|state| state.backend_online = Some(online));
    }
}
