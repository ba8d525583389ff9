use super::{Mount, Teardown};
use crate::dom::{ElementRef, EventKind, Page};
use crate::errors::ClientError;
use crate::state::AppContext;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Ids and messages of one submit-and-redirect form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FormSetup {
    pub form: &'static str,
    pub message: &'static str,
    pub fields: &'static [&'static str],
    pub required: &'static [&'static str],
    pub required_message: &'static str,
    pub success_message: &'static str,
    pub failure_prefix: &'static str,
    pub follow_up: &'static str,
}

/// Trimmed field values keyed by element id. Absent fields read as empty.
#[derive(Debug, Default)]
pub(crate) struct FormValues(HashMap<&'static str, String>);

impl FormValues {
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Where a form reports back to the user. Also tracks whether a request
/// for the form is in flight, so a second submit is ignored until it ends.
#[derive(Clone)]
pub(crate) struct Feedback {
    page: Page,
    message: Option<ElementRef>,
    submit: Option<ElementRef>,
    pending: Arc<AtomicBool>,
}

impl Feedback {
    pub fn new(page: Page, message: Option<ElementRef>, submit: Option<ElementRef>) -> Self {
        Self {
            page,
            message,
            submit,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn say(&self, text: &str) {
        if let Some(message) = self.message {
            self.page.set_text(message, text);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Claims the form for one request and disables its submit button.
    /// Returns `false` when another request already holds it.
    pub fn begin(&self) -> bool {
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        if let Some(submit) = self.submit {
            self.page.set_disabled(submit, true);
        }
        true
    }

    pub fn finish(&self) {
        if let Some(submit) = self.submit {
            self.page.set_disabled(submit, false);
        }
        self.pending.store(false, Ordering::SeqCst);
    }
}

enum Attempt<F> {
    /// A request for this form is still in flight.
    Ignored,
    Incomplete,
    Sent(F),
}

pub(crate) fn submit_button(page: &Page, form: ElementRef) -> Option<ElementRef> {
    page.query(form, r#"button[type="submit"]"#)
}

/// Binds the common submit flow: clear feedback, collect trimmed values,
/// check required fields, run `action` with the submit button disabled, then
/// either announce success and redirect or show the failure.
pub(crate) fn bind_form<A, Fut>(mount: &Mount, ctx: &AppContext, setup: FormSetup, action: A) -> Teardown
where
    A: Fn(FormValues, AppContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ClientError>> + Send + 'static,
{
    let mut bindings = mount.bindings();
    let Some(form) = mount.element(setup.form) else {
        debug!(form = setup.form, "form not in fragment");
        return bindings;
    };

    let page = mount.page().clone();
    let feedback = Feedback::new(page.clone(), mount.element(setup.message), submit_button(&page, form));
    let fields: Vec<(&'static str, Option<ElementRef>)> =
        setup.fields.iter().map(|name| (*name, mount.element(name))).collect();
    let ctx = ctx.clone();

    bindings.on(form, EventKind::Submit, move |event| {
        event.prevent_default();

        let attempt = if feedback.is_pending() {
            Attempt::Ignored
        } else {
            feedback.say("");
            let values = FormValues(
                fields
                    .iter()
                    .map(|(name, el)| {
                        let value = el.and_then(|el| page.value(el)).unwrap_or_default();
                        (*name, value.trim().to_string())
                    })
                    .collect(),
            );
            if !setup.required.iter().all(|name| !values.get(name).is_empty()) {
                Attempt::Incomplete
            } else if feedback.begin() {
                Attempt::Sent(action(values, ctx.clone()))
            } else {
                Attempt::Ignored
            }
        };

        let feedback = feedback.clone();
        let ctx = ctx.clone();
        async move {
            let pending = match attempt {
                Attempt::Ignored => {
                    debug!(form = setup.form, "submit ignored while a request is pending");
                    return;
                }
                Attempt::Incomplete => {
                    feedback.say(setup.required_message);
                    return;
                }
                Attempt::Sent(pending) => pending,
            };

            let result = pending.await;
            feedback.finish();
            match result {
                Ok(()) => {
                    feedback.say(setup.success_message);
                    ctx.navigate_later(setup.follow_up);
                }
                Err(err) => {
                    warn!(form = setup.form, %err, "form submission failed");
                    feedback.say(&format!("{}{}", setup.failure_prefix, err.message()));
                }
            }
        }
    });
    bindings
}
