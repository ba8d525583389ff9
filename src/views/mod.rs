//! View controllers.
//!
//! The router calls [`initialize`] exactly once per render, after the
//! fragment is in place. A controller only touches elements of the render it
//! was given and hands back a [`Teardown`] the router runs before the next
//! swap.

pub mod auth;
pub mod board;
mod form;

use crate::dom::{DomEvent, ElementRef, EventKind, ListenerId, Page, listener};
use crate::routes::ViewKind;
use crate::state::AppContext;
use std::future::Future;

/// The subtree injected for one render.
#[derive(Clone)]
pub struct Mount {
    page: Page,
    generation: u64,
}

impl Mount {
    pub fn new(page: Page, generation: u64) -> Self {
        Self { page, generation }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Looks up an element of this render; `None` once the page has moved on.
    pub fn element(&self, id: &str) -> Option<ElementRef> {
        self.page
            .get_element_by_id(id)
            .filter(|el| el.generation() == self.generation)
    }

    pub fn bindings(&self) -> Teardown {
        Teardown {
            page: self.page.clone(),
            listeners: Vec::new(),
        }
    }
}

/// Listeners a view registered, released together.
pub struct Teardown {
    page: Page,
    listeners: Vec<ListenerId>,
}

impl Teardown {
    pub fn on<F, Fut>(&mut self, el: ElementRef, kind: EventKind, f: F)
    where
        F: Fn(DomEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if let Some(id) = self.page.add_listener(el, kind, listener(f)) {
            self.listeners.push(id);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn run(self) {
        for id in self.listeners {
            self.page.remove_listener(id);
        }
    }
}

pub fn initialize(view: ViewKind, mount: &Mount, ctx: &AppContext) -> Teardown {
    match view {
        ViewKind::Login => auth::init_login(mount, ctx),
        ViewKind::Register => auth::init_register(mount, ctx),
        ViewKind::Recover => auth::init_recover(mount, ctx),
        ViewKind::Home => auth::init_home(mount, ctx),
        ViewKind::Board => board::init_board(mount),
        ViewKind::Dashboard => board::init_dashboard(mount, ctx),
    }
}
