use crate::state::AppState;
use crate::types::{Task, TaskPriority, TaskStatus};
use crate::ui::use_controller;
use crate::views::shared::{format_timestamp, non_blank};
use dioxus::prelude::*;

fn priority_class(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "pill pill-high",
        TaskPriority::Medium => "pill pill-medium",
        TaskPriority::Low => "pill pill-low",
    }
}

#[component]
pub fn TasksModule(state: Signal<AppState>) -> Element {
    rsx! {
        div { class: "module-row",
            TaskForm { state }
            TaskList { state }
        }
    }
}

#[component]
fn TaskForm(state: Signal<AppState>) -> Element {
    let controller = use_controller();
    let draft = state.read().task_draft.clone();

    let on_submit = {
        let controller = controller.clone();
        move |ev: FormEvent| {
            ev.prevent_default();
            let controller = controller.clone();
            spawn(async move {
                controller.create_task().await;
            });
        }
    };
    let on_title = {
        let controller = controller.clone();
        move |ev: FormEvent| controller.edit_task_draft(|draft| draft.title = ev.value())
    };
    let on_description = {
        let controller = controller.clone();
        move |ev: FormEvent| controller.edit_task_draft(|draft| draft.description = ev.value())
    };
    let on_status = {
        let controller = controller.clone();
        move |ev: FormEvent| {
            if let Some(status) = TaskStatus::parse(&ev.value()) {
                controller.edit_task_draft(|draft| draft.status = status);
            }
        }
    };
    let on_priority = move |ev: FormEvent| {
        if let Some(priority) = TaskPriority::parse(&ev.value()) {
            controller.edit_task_draft(|draft| draft.priority = priority);
        }
    };

    rsx! {
        section { class: "card",
            h2 { class: "section-title", "Create a task" }
            form { class: "stack", onsubmit: on_submit,
                label { class: "field",
                    span { "Title" }
                    input {
                        r#type: "text",
                        value: "{draft.title}",
                        placeholder: "Follow up, send CV, call...",
                        oninput: on_title,
                    }
                }
                label { class: "field",
                    span { "Description" }
                    textarea {
                        rows: "3",
                        value: "{draft.description}",
                        placeholder: "Details for this task...",
                        oninput: on_description,
                    }
                }
                div { class: "field-pair",
                    label { class: "field",
                        span { "Status" }
                        select { value: "{draft.status.as_str()}", onchange: on_status,
                            for status in TaskStatus::ALL {
                                option {
                                    value: "{status.as_str()}",
                                    selected: status == draft.status,
                                    "{status.label()}"
                                }
                            }
                        }
                    }
                    label { class: "field",
                        span { "Priority" }
                        select { value: "{draft.priority.as_str()}", onchange: on_priority,
                            for priority in TaskPriority::ALL {
                                option {
                                    value: "{priority.as_str()}",
                                    selected: priority == draft.priority,
                                    "{priority.label()}"
                                }
                            }
                        }
                    }
                }
                button { class: "btn btn-secondary", r#type: "submit", "Save task" }
            }
        }
    }
}

#[component]
fn TaskList(state: Signal<AppState>) -> Element {
    let tasks = state.read().tasks.clone();
    let loading = tasks.is_loading();

    rsx! {
        section { class: "card",
            div { class: "section-header",
                h2 { class: "section-title", "Your tasks" }
                if loading {
                    span { class: "text-muted", "Loading…" }
                }
            }
            if tasks.items.is_empty() && !loading {
                p { class: "text-muted", "No tasks yet. Create one on the left." }
            }
            ul { class: "item-list",
                for task in tasks.items.iter() {
                    TaskItem { key: "{task.id}", task: task.clone() }
                }
            }
        }
    }
}

#[component]
fn TaskItem(task: Task) -> Element {
    let description = non_blank(&task.description).map(str::to_string);
    let created = format_timestamp(&task.created_at);

    rsx! {
        li { class: "item",
            div { class: "item-header",
                h3 { class: "item-title", "{task.title}" }
                div { class: "pills",
                    span { class: "pill", "{task.status.as_str()}" }
                    span { class: priority_class(task.priority), "{task.priority.as_str()}" }
                }
            }
            if let Some(description) = description {
                p { class: "item-body", "{description}" }
            }
            p { class: "item-meta", "Created: {created}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_pills_are_colour_coded() {
        assert_eq!(priority_class(TaskPriority::High), "pill pill-high");
        assert_eq!(priority_class(TaskPriority::Low), "pill pill-low");
    }
}
