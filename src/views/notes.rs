use crate::state::AppState;
use crate::types::Note;
use crate::ui::use_controller;
use crate::views::shared::{format_timestamp, non_blank};
use dioxus::prelude::*;

#[component]
pub fn NotesModule(state: Signal<AppState>) -> Element {
    rsx! {
        div { class: "module-row",
            NoteForm { state }
            NoteList { state }
        }
    }
}

#[component]
fn NoteForm(state: Signal<AppState>) -> Element {
    let controller = use_controller();
    let draft = state.read().note_draft.clone();

    let on_submit = {
        let controller = controller.clone();
        move |ev: FormEvent| {
            ev.prevent_default();
            let controller = controller.clone();
            spawn(async move {
                controller.create_note().await;
            });
        }
    };
    let on_title = {
        let controller = controller.clone();
        move |ev: FormEvent| controller.edit_note_draft(|draft| draft.title = ev.value())
    };
    let on_content = {
        let controller = controller.clone();
        move |ev: FormEvent| controller.edit_note_draft(|draft| draft.content = ev.value())
    };
    let on_tags = move |ev: FormEvent| controller.edit_note_draft(|draft| draft.tags = ev.value());

    rsx! {
        section { class: "card",
            h2 { class: "section-title", "Create a note" }
            form { class: "stack", onsubmit: on_submit,
                label { class: "field",
                    span { "Title" }
                    input {
                        r#type: "text",
                        value: "{draft.title}",
                        placeholder: "Meeting notes, ideas...",
                        oninput: on_title,
                    }
                }
                label { class: "field",
                    span { "Content" }
                    textarea {
                        rows: "4",
                        value: "{draft.content}",
                        placeholder: "Details, tasks, anything...",
                        oninput: on_content,
                    }
                }
                label { class: "field",
                    span { "Tags" }
                    input {
                        r#type: "text",
                        value: "{draft.tags}",
                        placeholder: "e.g. work,urgent,idea",
                        oninput: on_tags,
                    }
                }
                button { class: "btn btn-primary", r#type: "submit", "Save note" }
            }
        }
    }
}

#[component]
fn NoteList(state: Signal<AppState>) -> Element {
    let notes = state.read().notes.clone();
    let loading = notes.is_loading();

    rsx! {
        section { class: "card",
            div { class: "section-header",
                h2 { class: "section-title", "Your notes" }
                if loading {
                    span { class: "text-muted", "Loading…" }
                }
            }
            if notes.items.is_empty() && !loading {
                p { class: "text-muted", "No notes yet. Create your first note on the left." }
            }
            ul { class: "item-list",
                for note in notes.items.iter() {
                    NoteItem { key: "{note.id}", note: note.clone() }
                }
            }
        }
    }
}

#[component]
fn NoteItem(note: Note) -> Element {
    let tags = non_blank(&note.tags).map(str::to_string);
    let content = non_blank(&note.content).map(str::to_string);
    let created = format_timestamp(&note.created_at);

    rsx! {
        li { class: "item",
            div { class: "item-header",
                h3 { class: "item-title", "{note.title}" }
                if let Some(tags) = tags {
                    span { class: "pill", "{tags}" }
                }
            }
            if let Some(content) = content {
                p { class: "item-body", "{content}" }
            }
            p { class: "item-meta", "Created: {created}" }
        }
    }
}
