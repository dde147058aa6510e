//! Session-scoped view state.
//!
//! Every user intent is split into a synchronous `begin_*` half, which
//! mutates the state immediately and hands back a [`Ticket`], and a
//! `finish_*` half that applies the settled response. A ticket only applies
//! while its generation matches: signing in or out bumps the generation, so
//! responses to requests issued under an older session are dropped.

use crate::error::Failure;
use crate::identity::Identity;
use crate::types::{ChatMessage, Note, NoteDraft, Task, TaskDraft, UserProfile};

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceList<T> {
    /// In the order received; newly created items are prepended.
    pub items: Vec<T>,
    pub phase: LoadPhase,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            phase: LoadPhase::Idle,
        }
    }
}

impl<T> ResourceList<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatPanel {
    pub transcript: Vec<ChatMessage>,
    pub input: String,
    pub busy: bool,
}

/// Proof that a request was dispatched under a particular session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub token: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub session: Option<Session>,
    pub notes: ResourceList<Note>,
    pub note_draft: NoteDraft,
    pub tasks: ResourceList<Task>,
    pub task_draft: TaskDraft,
    pub chat: ChatPanel,
    /// Most recent failure message; a new failure replaces it.
    pub error: Option<String>,
    /// `None` until the first health probe settles.
    pub backend_online: Option<bool>,
    generation: u64,
}

impl AppState {
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn fail(&mut self, failure: Failure) {
        self.error = Some(failure.message().to_string());
    }

    fn ticket(&self) -> Option<Ticket> {
        self.token().map(|token| Ticket {
            generation: self.generation,
            token: token.to_string(),
        })
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        if ticket.generation == self.generation {
            true
        } else {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping response from a previous session"
            );
            false
        }
    }

    // ---- session ----

    pub fn begin_sign_in(&mut self) {
        self.clear_error();
    }

    /// Installs the new session and returns the ticket the initial fetches
    /// should carry.
    pub fn establish_session(&mut self, identity: Identity) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            token: identity.token.clone(),
        };
        self.session = Some(Session {
            user: identity.user,
            token: identity.token,
        });
        ticket
    }

    pub fn sign_in_failed(&mut self) {
        self.fail(Failure::SignIn);
    }

    /// Resets every session-derived slice. Backend reachability is not
    /// session-derived and survives.
    pub fn reset_session(&mut self) {
        let generation = self.generation + 1;
        let backend_online = self.backend_online;
        *self = AppState {
            backend_online,
            generation,
            ..AppState::default()
        };
    }

    // ---- notes ----

    pub fn begin_notes_load(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.notes.phase = LoadPhase::Loading;
        self.clear_error();
        true
    }

    pub fn finish_notes_load(&mut self, ticket: &Ticket, result: Result<Vec<Note>, ()>) {
        if !self.is_current(ticket) {
            return;
        }
        match result {
            Ok(notes) => {
                self.notes.items = notes;
                self.notes.phase = LoadPhase::Loaded;
            }
            Err(()) => {
                self.notes.phase = LoadPhase::Failed;
                self.fail(Failure::LoadNotes);
            }
        }
    }

    /// `None` when there is nothing to submit: blank title or no session.
    pub fn begin_note_create(&mut self) -> Option<(Ticket, NoteDraft)> {
        if self.note_draft.title.trim().is_empty() {
            return None;
        }
        let ticket = self.ticket()?;
        self.clear_error();
        Some((ticket, self.note_draft.clone()))
    }

    pub fn finish_note_create(&mut self, ticket: &Ticket, result: Result<Note, ()>) {
        if !self.is_current(ticket) {
            return;
        }
        match result {
            Ok(note) => {
                self.notes.items.insert(0, note);
                self.note_draft = NoteDraft::default();
            }
            Err(()) => self.fail(Failure::CreateNote),
        }
    }

    // ---- tasks ----

    pub fn begin_tasks_load(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.tasks.phase = LoadPhase::Loading;
        self.clear_error();
        true
    }

    pub fn finish_tasks_load(&mut self, ticket: &Ticket, result: Result<Vec<Task>, ()>) {
        if !self.is_current(ticket) {
            return;
        }
        match result {
            Ok(tasks) => {
                self.tasks.items = tasks;
                self.tasks.phase = LoadPhase::Loaded;
            }
            Err(()) => {
                self.tasks.phase = LoadPhase::Failed;
                self.fail(Failure::LoadTasks);
            }
        }
    }

    pub fn begin_task_create(&mut self) -> Option<(Ticket, TaskDraft)> {
        if self.task_draft.title.trim().is_empty() {
            return None;
        }
        let ticket = self.ticket()?;
        self.clear_error();
        Some((ticket, self.task_draft.clone()))
    }

    pub fn finish_task_create(&mut self, ticket: &Ticket, result: Result<Task, ()>) {
        if !self.is_current(ticket) {
            return;
        }
        match result {
            Ok(task) => {
                self.tasks.items.insert(0, task);
                self.task_draft = TaskDraft::default();
            }
            Err(()) => self.fail(Failure::CreateTask),
        }
    }

    // ---- assistant ----

    /// Appends the user's message, clears the input and marks the panel
    /// busy. Returns the trimmed message to send, or `None` for blank input
    /// or a missing session (nothing changes in that case).
    pub fn begin_chat(&mut self) -> Option<(Ticket, String)> {
        let message = self.chat.input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        let ticket = self.ticket()?;
        self.chat.transcript.push(ChatMessage::user(message.clone()));
        self.chat.input.clear();
        self.chat.busy = true;
        self.clear_error();
        Some((ticket, message))
    }

    pub fn finish_chat(&mut self, ticket: &Ticket, result: Result<String, ()>) {
        if !self.is_current(ticket) {
            return;
        }
        match result {
            Ok(reply) => self.chat.transcript.push(ChatMessage::assistant(reply)),
            Err(()) => self.fail(Failure::Assistant),
        }
        self.chat.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResourceId, Sender};

    fn signed_in() -> (AppState, Ticket) {
        let mut state = AppState::default();
        let ticket = state.establish_session(Identity {
            user: UserProfile {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                avatar_url: None,
            },
            token: "tok".into(),
        });
        (state, ticket)
    }

    fn note(id: i64, title: &str) -> Note {
        Note {
            id: ResourceId::Int(id),
            title: title.into(),
            content: None,
            tags: None,
            created_at: "2025-03-01T09:30:00".into(),
            updated_at: None,
        }
    }

    #[test]
    fn load_enters_and_leaves_loading() {
        let (mut state, ticket) = signed_in();
        assert!(state.begin_notes_load(&ticket));
        assert!(state.notes.is_loading());
        state.finish_notes_load(&ticket, Ok(vec![note(1, "a"), note(2, "b")]));
        assert_eq!(state.notes.phase, LoadPhase::Loaded);
        assert_eq!(state.notes.items.len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_items() {
        let (mut state, ticket) = signed_in();
        state.notes.items = vec![note(1, "kept")];
        state.begin_notes_load(&ticket);
        state.finish_notes_load(&ticket, Err(()));
        assert!(!state.notes.is_loading());
        assert_eq!(state.notes.items, vec![note(1, "kept")]);
        assert_eq!(state.error.as_deref(), Some("Failed to load notes."));
    }

    #[test]
    fn blank_title_does_not_start_a_create() {
        let (mut state, _) = signed_in();
        state.note_draft.title = "   ".into();
        assert!(state.begin_note_create().is_none());
        state.task_draft.title = String::new();
        assert!(state.begin_task_create().is_none());
    }

    #[test]
    fn create_without_session_is_ignored() {
        let mut state = AppState::default();
        state.note_draft.title = "Groceries".into();
        assert!(state.begin_note_create().is_none());
    }

    #[test]
    fn created_note_is_prepended_and_draft_resets() {
        let (mut state, _) = signed_in();
        state.notes.items = vec![note(1, "old")];
        state.note_draft = NoteDraft {
            title: "new".into(),
            content: "body".into(),
            tags: "x".into(),
        };
        let (ticket, draft) = state.begin_note_create().unwrap();
        assert_eq!(draft.title, "new");
        state.finish_note_create(&ticket, Ok(note(2, "new")));
        assert_eq!(state.notes.items[0].title, "new");
        assert_eq!(state.note_draft, NoteDraft::default());
    }

    #[test]
    fn failed_create_keeps_draft() {
        let (mut state, _) = signed_in();
        state.task_draft.title = "Call".into();
        let (ticket, _) = state.begin_task_create().unwrap();
        state.finish_task_create(&ticket, Err(()));
        assert_eq!(state.task_draft.title, "Call");
        assert_eq!(state.error.as_deref(), Some("Failed to create task."));
    }

    #[test]
    fn chat_exchange_updates_transcript_and_busy_flag() {
        let (mut state, _) = signed_in();
        state.chat.input = "  summarize my tasks ".into();
        let (ticket, message) = state.begin_chat().unwrap();
        assert_eq!(message, "summarize my tasks");
        assert!(state.chat.busy);
        assert!(state.chat.input.is_empty());
        assert_eq!(state.chat.transcript.len(), 1);

        state.finish_chat(&ticket, Ok("You have 2 tasks.".into()));
        assert!(!state.chat.busy);
        assert_eq!(state.chat.transcript[1].from, Sender::Assistant);
    }

    #[test]
    fn chat_failure_adds_no_assistant_message() {
        let (mut state, _) = signed_in();
        state.chat.input = "hi".into();
        let (ticket, _) = state.begin_chat().unwrap();
        state.finish_chat(&ticket, Err(()));
        assert_eq!(state.chat.transcript.len(), 1);
        assert!(!state.chat.busy);
        assert_eq!(state.error.as_deref(), Some("Assistant failed to respond."));
    }

    #[test]
    fn blank_chat_input_is_a_no_op() {
        let (mut state, _) = signed_in();
        state.chat.input = " \n\t".into();
        let before = state.clone();
        assert!(state.begin_chat().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn reset_clears_session_slices_and_invalidates_tickets() {
        let (mut state, ticket) = signed_in();
        state.backend_online = Some(true);
        state.notes.items = vec![note(1, "a")];
        state.chat.transcript.push(ChatMessage::user("hi"));
        state.error = Some("Failed to load tasks.".into());
        state.begin_tasks_load(&ticket);

        state.reset_session();
        assert!(state.session.is_none());
        assert!(state.notes.items.is_empty());
        assert!(state.chat.transcript.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.backend_online, Some(true));

        state.finish_notes_load(&ticket, Ok(vec![note(9, "late")]));
        assert!(state.notes.items.is_empty());
        assert_eq!(state.notes.phase, LoadPhase::Idle);
    }

    #[test]
    fn new_session_bumps_generation() {
        let (mut state, first) = signed_in();
        state.reset_session();
        let second = state.establish_session(Identity {
            user: UserProfile::default(),
            token: "tok2".into(),
        });
        assert!(second.generation > first.generation);
        assert_eq!(state.token(), Some("tok2"));
    }
}
