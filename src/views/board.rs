use super::form::{submit_button, Feedback};
use super::{Mount, Teardown};
use crate::dom::{ElementRef, EventKind, Page};
use crate::errors::ClientError;
use crate::models::{Task, TaskStatus};
use crate::state::AppContext;
use crate::ui;
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

/// Local todo board: tasks live only in the list until the view goes away.
pub fn init_board(mount: &Mount) -> Teardown {
    let mut bindings = mount.bindings();
    let (Some(form), Some(input), Some(list)) = (
        mount.element("todoForm"),
        mount.element("newTodo"),
        mount.element("todoList"),
    ) else {
        return bindings;
    };

    let page = mount.page().clone();
    bindings.on(form, EventKind::Submit, move |event| {
        event.prevent_default();
        let title = page.value(input).unwrap_or_default().trim().to_string();
        if !title.is_empty() {
            page.prepend_html(list, &ui::task_item(&Task::titled(title), false));
            page.set_value(input, "");
        }
        async {}
    });

    bind_task_list(&mut bindings, mount.page(), list);
    bindings
}

#[derive(Debug, Clone, Copy)]
struct TaskFields {
    title: Option<ElementRef>,
    detail: Option<ElementRef>,
    date: Option<ElementRef>,
    time: Option<ElementRef>,
    status: Option<ElementRef>,
}

impl TaskFields {
    fn lookup(mount: &Mount) -> Self {
        Self {
            title: mount.element("taskTitle"),
            detail: mount.element("taskDetail"),
            date: mount.element("taskDate"),
            time: mount.element("taskTime"),
            status: mount.element("taskStatus"),
        }
    }

    fn read(&self, page: &Page) -> Result<Task, ClientError> {
        let get = |el: Option<ElementRef>| {
            el.and_then(|el| page.value(el))
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        let title = get(self.title);
        if title.is_empty() {
            return Err(ClientError::validation("A task needs a title."));
        }
        let date = match get(self.date) {
            raw if raw.is_empty() => None,
            raw => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| ClientError::validation("Dates look like 2025-01-31."))?,
            ),
        };
        let time = match get(self.time) {
            raw if raw.is_empty() => None,
            raw => Some(
                NaiveTime::parse_from_str(&raw, "%H:%M")
                    .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
                    .map_err(|_| ClientError::validation("Times look like 14:30."))?,
            ),
        };
        let status = TaskStatus::parse(&get(self.status))
            .ok_or_else(|| ClientError::validation("Unknown task status."))?;

        Ok(Task {
            title,
            detail: get(self.detail),
            date,
            time,
            status,
        })
    }

    fn clear(&self, page: &Page) {
        for el in [self.title, self.detail, self.date, self.time].into_iter().flatten() {
            page.set_value(el, "");
        }
    }
}

/// Dashboard of the accounts variant: tasks are saved for the logged-in user
/// before they are shown.
pub fn init_dashboard(mount: &Mount, ctx: &AppContext) -> Teardown {
    let mut bindings = mount.bindings();
    let (Some(form), Some(list)) = (mount.element("taskForm"), mount.element("taskList")) else {
        return bindings;
    };

    let page = mount.page().clone();
    let feedback = Feedback::new(page.clone(), mount.element("taskMsg"), submit_button(&page, form));
    if ctx.session.current_user().is_none() {
        feedback.say("Log in to save your tasks.");
    }

    let fields = TaskFields::lookup(mount);
    let submit_ctx = ctx.clone();
    bindings.on(form, EventKind::Submit, move |event| {
        event.prevent_default();
        let (page, feedback, ctx) = (page.clone(), feedback.clone(), submit_ctx.clone());
        async move {
            if feedback.is_pending() {
                debug!("task submit ignored while a save is pending");
                return;
            }
            feedback.say("");
            let task = match fields.read(&page) {
                Ok(task) => task,
                Err(err) => {
                    feedback.say(&err.message());
                    return;
                }
            };

            if !feedback.begin() {
                return;
            }
            let result = ctx.tasks.create_for_current_user(&task).await;
            feedback.finish();
            match result {
                Ok(_) => {
                    info!(title = %task.title, "task created");
                    page.prepend_html(list, &ui::task_item(&task, true));
                    fields.clear(&page);
                    feedback.say("Task added.");
                }
                Err(err) => {
                    warn!(%err, "task creation failed");
                    feedback.say(&format!("Could not save the task: {}", err.message()));
                }
            }
        }
    });

    if let Some(logout) = mount.element("logoutBtn") {
        let ctx = ctx.clone();
        bindings.on(logout, EventKind::Click, move |_| {
            ctx.session.sign_out();
            ctx.location.assign("#/login");
            async {}
        });
    }

    bind_task_list(&mut bindings, mount.page(), list);
    bindings
}

/// Delegated clicks on task items: `.remove` drops the item, `.check` mirrors
/// the checkbox into the item's `completed` class.
fn bind_task_list(bindings: &mut Teardown, page: &Page, list: ElementRef) {
    let page = page.clone();
    bindings.on(list, EventKind::Click, move |event| {
        if let Some(item) = page.closest(event.target, ".todo") {
            if page.matches(event.target, ".remove") {
                page.remove(item);
            } else if page.matches(event.target, ".check") {
                let checked = page.is_checked(event.target);
                page.toggle_class(item, "completed", checked);
            }
        }
        async {}
    });
}
