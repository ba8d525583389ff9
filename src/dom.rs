//! Headless document model the router renders into.
//!
//! The page has a single application root. Everything below it is replaced
//! wholesale when a view fragment is injected, and every replacement starts a
//! new *generation*: element handles and listeners from older generations are
//! inert, so a view can never act on nodes it no longer owns.
//!
//! Fragment markup is read with a small tag scanner. It understands elements,
//! attributes, void elements, comments and the five basic entities, which is
//! what the view fragments use. It is not a general HTML parser.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const ROOT: NodeId = 0;
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:\s+[^\s/>="']+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#,
    )
    .expect("tag pattern")
});
static ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s/>="']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).expect("attribute pattern")
});

type NodeId = usize;

/// Handle to an element of one particular render. `stamp` tells apart
/// nodes that reuse the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef {
    generation: u64,
    node: NodeId,
    stamp: u64,
}

impl ElementRef {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Click,
}

#[derive(Debug, Clone)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: ElementRef,
    default_prevented: Arc<AtomicBool>,
}

impl DomEvent {
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }
}

pub type ListenerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
pub type Listener = Arc<dyn Fn(DomEvent) -> ListenerFuture + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// `tag`, `.class`, `tag.class` or `tag[attr=value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    class: Option<String>,
    attr: Option<(String, String)>,
}

impl Selector {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (head, attr) = match raw.split_once('[') {
            Some((head, rest)) => {
                let inner = rest.trim_end_matches(']');
                let attr = inner.split_once('=').map(|(name, value)| {
                    (
                        name.trim().to_string(),
                        value.trim().trim_matches(|c| c == '"' || c == '\'').to_string(),
                    )
                });
                (head, attr)
            }
            None => (raw, None),
        };
        let (tag, class) = match head.split_once('.') {
            Some((tag, class)) => (tag, Some(class.to_string())),
            None => (head, None),
        };
        Self {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            class,
            attr,
        }
    }

    fn matches(&self, node: &Node) -> bool {
        let Some(tag) = node.tag.as_deref() else {
            return false;
        };
        self.tag.as_deref().is_none_or(|want| want == tag)
            && self.class.as_deref().is_none_or(|class| node.has_class(class))
            && self
                .attr
                .as_ref()
                .is_none_or(|(name, value)| node.attrs.get(name) == Some(value))
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    /// `None` for text nodes.
    tag: Option<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    stamp: u64,
}

impl Node {
    fn element(tag: &str, attrs: BTreeMap<String, String>, parent: NodeId) -> Self {
        Self {
            value: attrs.get("value").cloned().unwrap_or_default(),
            checked: attrs.contains_key("checked"),
            disabled: attrs.contains_key("disabled"),
            tag: Some(tag.to_ascii_lowercase()),
            attrs,
            parent: Some(parent),
            ..Self::default()
        }
    }

    fn text(text: String, parent: NodeId) -> Self {
        Self {
            text,
            parent: Some(parent),
            ..Self::default()
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

struct Binding {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    listener: Listener,
}

struct Document {
    generation: u64,
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    next_stamp: u64,
    bindings: Vec<Binding>,
    next_listener: u64,
}

impl Default for Document {
    fn default() -> Self {
        let root = Node {
            tag: Some("div".to_string()),
            attrs: BTreeMap::from([("id".to_string(), "app".to_string())]),
            ..Node::default()
        };
        Self {
            generation: 0,
            nodes: vec![Some(root)],
            free: Vec::new(),
            next_stamp: 0,
            bindings: Vec::new(),
            next_listener: 0,
        }
    }
}

impl Document {
    fn live(&self, el: ElementRef) -> Option<&Node> {
        if el.generation != self.generation {
            return None;
        }
        self.nodes
            .get(el.node)?
            .as_ref()
            .filter(|node| node.tag.is_some() && node.stamp == el.stamp)
    }

    fn live_mut(&mut self, el: ElementRef) -> Option<&mut Node> {
        if el.generation != self.generation {
            return None;
        }
        self.nodes
            .get_mut(el.node)?
            .as_mut()
            .filter(|node| node.tag.is_some() && node.stamp == el.stamp)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)?.as_ref()
    }

    fn handle(&self, node: NodeId) -> ElementRef {
        ElementRef {
            generation: self.generation,
            node,
            stamp: self.node(node).map_or(0, |n| n.stamp),
        }
    }

    /// Stores `node` in a freed slot when there is one.
    fn push(&mut self, mut node: Node) -> NodeId {
        self.next_stamp += 1;
        node.stamp = self.next_stamp;
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Parses `html` and returns the top-level nodes it produced, already
    /// parented to `parent` but not yet linked into its children.
    fn parse_into(&mut self, parent: NodeId, html: &str) -> Vec<NodeId> {
        let mut top = Vec::new();
        let mut stack: Vec<(NodeId, String)> = Vec::new();
        let mut cursor = 0;

        for caps in TAG.captures_iter(html) {
            let Some(whole) = caps.get(0) else { continue };
            self.parse_text(&html[cursor..whole.start()], parent, &mut stack, &mut top);
            cursor = whole.end();

            let Some(name) = caps.get(2) else { continue };
            let name = name.as_str().to_ascii_lowercase();
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());

            if closing {
                if let Some(pos) = stack.iter().rposition(|(_, tag)| *tag == name) {
                    stack.truncate(pos);
                }
                continue;
            }

            let attrs = caps.get(3).map(|m| parse_attrs(m.as_str())).unwrap_or_default();
            let owner = stack.last().map_or(parent, |(id, _)| *id);
            let id = self.push(Node::element(&name, attrs, owner));
            self.link(owner, parent, id, &mut top);

            let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
            if !self_closing && !VOID_TAGS.contains(&name.as_str()) {
                stack.push((id, name));
            }
        }
        self.parse_text(&html[cursor..], parent, &mut stack, &mut top);
        top
    }

    fn parse_text(&mut self, raw: &str, parent: NodeId, stack: &mut [(NodeId, String)], top: &mut Vec<NodeId>) {
        if raw.trim().is_empty() {
            return;
        }
        let owner = stack.last().map_or(parent, |(id, _)| *id);
        let id = self.push(Node::text(unescape(raw.trim()), owner));
        self.link(owner, parent, id, top);
    }

    fn link(&mut self, owner: NodeId, parent: NodeId, id: NodeId, top: &mut Vec<NodeId>) {
        if owner == parent {
            top.push(id);
        } else if let Some(Some(node)) = self.nodes.get_mut(owner) {
            node.children.push(id);
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).and_then(|node| node.parent) {
            if let Some(Some(node)) = self.nodes.get_mut(parent) {
                node.children.retain(|child| *child != id);
            }
        }
        self.drop_subtree(id);
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id).and_then(Option::take) else {
            return;
        };
        self.bindings.retain(|binding| binding.node != id);
        self.free.push(id);
        for child in node.children {
            self.drop_subtree(child);
        }
    }

    fn descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.node(id) {
            for child in &node.children {
                out.push(*child);
                self.descendants(*child, out);
            }
        }
    }

    fn text_content(&self, id: NodeId) -> String {
        let mut ids = vec![id];
        self.descendants(id, &mut ids);
        ids.iter()
            .filter_map(|id| self.node(*id))
            .filter(|node| node.tag.is_none())
            .map(|node| node.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Shared handle to the page document.
#[derive(Clone, Default)]
pub struct Page {
    doc: Arc<Mutex<Document>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    fn doc(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn generation(&self) -> u64 {
        self.doc().generation
    }

    /// Makes `html` the sole content of the application root and starts a new
    /// generation. Returns the new generation.
    pub fn replace_root(&self, html: &str) -> u64 {
        let mut doc = self.doc();
        let children = doc.node(ROOT).map(|root| root.children.clone()).unwrap_or_default();
        for child in children {
            doc.drop_subtree(child);
        }
        doc.bindings.clear();
        doc.nodes.truncate(1);
        doc.free.clear();
        doc.generation += 1;

        let top = doc.parse_into(ROOT, html);
        if let Some(Some(root)) = doc.nodes.get_mut(ROOT) {
            root.children = top;
        }
        doc.generation
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementRef> {
        let doc = self.doc();
        let mut ids = Vec::new();
        doc.descendants(ROOT, &mut ids);
        ids.into_iter()
            .find(|node| {
                doc.node(*node)
                    .is_some_and(|n| n.tag.is_some() && n.attrs.get("id").map(String::as_str) == Some(id))
            })
            .map(|node| doc.handle(node))
    }

    /// Every live element under `scope` matching `selector`, in document order.
    pub fn query_all(&self, scope: ElementRef, selector: &str) -> Vec<ElementRef> {
        let selector = Selector::parse(selector);
        let doc = self.doc();
        if doc.live(scope).is_none() {
            return Vec::new();
        }
        let mut ids = Vec::new();
        doc.descendants(scope.node, &mut ids);
        ids.into_iter()
            .filter(|id| doc.node(*id).is_some_and(|node| selector.matches(node)))
            .map(|id| doc.handle(id))
            .collect()
    }

    pub fn query(&self, scope: ElementRef, selector: &str) -> Option<ElementRef> {
        self.query_all(scope, selector).into_iter().next()
    }

    pub fn matches(&self, el: ElementRef, selector: &str) -> bool {
        let selector = Selector::parse(selector);
        self.doc().live(el).is_some_and(|node| selector.matches(node))
    }

    /// Nearest ancestor-or-self matching `selector`.
    pub fn closest(&self, el: ElementRef, selector: &str) -> Option<ElementRef> {
        let selector = Selector::parse(selector);
        let doc = self.doc();
        doc.live(el)?;
        let mut current = Some(el.node);
        while let Some(id) = current {
            let node = doc.node(id)?;
            if selector.matches(node) {
                return Some(doc.handle(id));
            }
            current = node.parent;
        }
        None
    }

    pub fn contains(&self, el: ElementRef) -> bool {
        self.doc().live(el).is_some()
    }

    pub fn attr(&self, el: ElementRef, name: &str) -> Option<String> {
        self.doc().live(el)?.attrs.get(name).cloned()
    }

    pub fn value(&self, el: ElementRef) -> Option<String> {
        self.doc().live(el).map(|node| node.value.clone())
    }

    pub fn set_value(&self, el: ElementRef, value: impl Into<String>) -> bool {
        self.doc().live_mut(el).map(|node| node.value = value.into()).is_some()
    }

    pub fn text(&self, el: ElementRef) -> Option<String> {
        let doc = self.doc();
        doc.live(el)?;
        Some(doc.text_content(el.node))
    }

    /// Text of everything currently under the application root.
    pub fn root_text(&self) -> String {
        self.doc().text_content(ROOT)
    }

    /// Replaces the element's children with a single text node.
    pub fn set_text(&self, el: ElementRef, text: &str) -> bool {
        let mut doc = self.doc();
        let Some(children) = doc.live(el).map(|node| node.children.clone()) else {
            return false;
        };
        for child in children {
            doc.drop_subtree(child);
        }
        let mut kept = Vec::new();
        if !text.is_empty() {
            kept.push(doc.push(Node::text(text.to_string(), el.node)));
        }
        if let Some(node) = doc.live_mut(el) {
            node.children = kept;
        }
        true
    }

    pub fn is_checked(&self, el: ElementRef) -> bool {
        self.doc().live(el).is_some_and(|node| node.checked)
    }

    pub fn set_checked(&self, el: ElementRef, checked: bool) -> bool {
        self.doc().live_mut(el).map(|node| node.checked = checked).is_some()
    }

    pub fn is_disabled(&self, el: ElementRef) -> bool {
        self.doc().live(el).is_some_and(|node| node.disabled)
    }

    pub fn set_disabled(&self, el: ElementRef, disabled: bool) -> bool {
        self.doc().live_mut(el).map(|node| node.disabled = disabled).is_some()
    }

    pub fn has_class(&self, el: ElementRef, class: &str) -> bool {
        self.doc().live(el).is_some_and(|node| node.has_class(class))
    }

    /// Adds `class` when `on` is true, removes it otherwise.
    pub fn toggle_class(&self, el: ElementRef, class: &str, on: bool) -> bool {
        let mut doc = self.doc();
        let Some(node) = doc.live_mut(el) else {
            return false;
        };
        let mut classes: Vec<String> = node
            .attrs
            .get("class")
            .map(|c| c.split_whitespace().filter(|c| *c != class).map(str::to_string).collect())
            .unwrap_or_default();
        if on {
            classes.push(class.to_string());
        }
        node.attrs.insert("class".to_string(), classes.join(" "));
        true
    }

    /// Parses `html` and inserts it as the first children of `parent`.
    /// Returns the first inserted element.
    pub fn prepend_html(&self, parent: ElementRef, html: &str) -> Option<ElementRef> {
        let mut doc = self.doc();
        doc.live(parent)?;
        let inserted = doc.parse_into(parent.node, html);
        let first = inserted
            .iter()
            .copied()
            .find(|id| doc.node(*id).is_some_and(|node| node.tag.is_some()));
        if let Some(Some(node)) = doc.nodes.get_mut(parent.node) {
            let rest = std::mem::replace(&mut node.children, inserted);
            node.children.extend(rest);
        }
        first.map(|id| doc.handle(id))
    }

    pub fn children(&self, el: ElementRef) -> Vec<ElementRef> {
        let doc = self.doc();
        let Some(node) = doc.live(el) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter(|id| doc.node(**id).is_some_and(|n| n.tag.is_some()))
            .map(|id| doc.handle(*id))
            .collect()
    }

    /// Detaches the element and drops its subtree and listeners.
    pub fn remove(&self, el: ElementRef) -> bool {
        let mut doc = self.doc();
        if doc.live(el).is_none() || el.node == ROOT {
            return false;
        }
        doc.detach(el.node);
        true
    }

    /// Returns `None` when `el` belongs to an older render.
    pub fn add_listener(&self, el: ElementRef, kind: EventKind, listener: Listener) -> Option<ListenerId> {
        let mut doc = self.doc();
        doc.live(el)?;
        doc.next_listener += 1;
        let id = ListenerId(doc.next_listener);
        doc.bindings.push(Binding {
            id,
            node: el.node,
            kind,
            listener,
        });
        Some(id)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut doc = self.doc();
        let before = doc.bindings.len();
        doc.bindings.retain(|binding| binding.id != id);
        doc.bindings.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.doc().bindings.len()
    }

    /// Runs the listeners of `el` and its ancestors, innermost first, and
    /// waits for each to finish. Returns whether a listener prevented the
    /// default action.
    pub async fn dispatch(&self, el: ElementRef, kind: EventKind) -> bool {
        let event = DomEvent {
            kind,
            target: el,
            default_prevented: Arc::new(AtomicBool::new(false)),
        };

        let listeners: Vec<Listener> = {
            let doc = self.doc();
            if doc.live(el).is_none() {
                return false;
            }
            let mut path = Vec::new();
            let mut current = Some(el.node);
            while let Some(id) = current {
                path.push(id);
                current = doc.node(id).and_then(|node| node.parent);
            }
            let listeners = path
                .iter()
                .flat_map(|node| {
                    doc.bindings
                        .iter()
                        .filter(move |binding| binding.node == *node && binding.kind == kind)
                        .map(|binding| Arc::clone(&binding.listener))
                })
                .collect();
            listeners
        };

        for listener in listeners {
            listener(event.clone()).await;
        }
        event.default_prevented.load(Ordering::SeqCst)
    }

    /// Clicks the element the way a user would: checkboxes flip before the
    /// click listeners run, disabled controls ignore the click.
    pub async fn click(&self, el: ElementRef) -> bool {
        {
            let mut doc = self.doc();
            let Some(node) = doc.live_mut(el) else {
                return false;
            };
            if node.disabled {
                return false;
            }
            if node.tag.as_deref() == Some("input")
                && node.attrs.get("type").map(String::as_str) == Some("checkbox")
            {
                node.checked = !node.checked;
            }
        }
        self.dispatch(el, EventKind::Click).await
    }

    pub async fn submit(&self, form: ElementRef) -> bool {
        self.dispatch(form, EventKind::Submit).await
    }
}

/// Wraps an async closure as a [`Listener`].
pub fn listener<F, Fut>(f: F) -> Listener
where
    F: Fn(DomEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |event| Box::pin(f(event)) as ListenerFuture)
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn parse_attrs(raw: &str) -> BTreeMap<String, String> {
    ATTR.captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| unescape(m.as_str()))
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    const FORM: &str = r#"
      <form id="todoForm">
        <input id="newTodo" type="text" value="milk" />
        <button type="submit" disabled>Add</button>
      </form>
      <!-- list -->
      <ul id="todoList"><li class="todo first">Eggs &amp; ham</li></ul>
    "#;

    #[test]
    fn parses_ids_attributes_and_text() {
        let page = Page::new();
        page.replace_root(FORM);

        let input = page.get_element_by_id("newTodo").unwrap();
        assert_eq!(page.value(input).as_deref(), Some("milk"));

        let form = page.get_element_by_id("todoForm").unwrap();
        let button = page.query(form, r#"button[type="submit"]"#).unwrap();
        assert!(page.is_disabled(button));

        let list = page.get_element_by_id("todoList").unwrap();
        let item = page.query(list, ".todo").unwrap();
        assert_eq!(page.text(item).as_deref(), Some("Eggs & ham"));
        assert!(page.matches(item, "li.first"));
        assert!(page.get_element_by_id("missing").is_none());
    }

    #[test]
    fn replacing_root_makes_old_handles_inert() {
        let page = Page::new();
        page.replace_root(FORM);
        let input = page.get_element_by_id("newTodo").unwrap();
        let form = page.get_element_by_id("todoForm").unwrap();
        page.add_listener(form, EventKind::Submit, listener(|_| async {}));
        assert_eq!(page.listener_count(), 1);

        page.replace_root(r#"<p id="other">x</p>"#);
        assert!(!page.contains(input));
        assert!(!page.set_value(input, "bread"));
        assert!(page.add_listener(form, EventKind::Submit, listener(|_| async {})).is_none());
        assert_eq!(page.listener_count(), 0);
        assert!(page.get_element_by_id("newTodo").is_none());
    }

    #[test]
    fn prepend_and_remove_keep_siblings() {
        let page = Page::new();
        page.replace_root(FORM);
        let list = page.get_element_by_id("todoList").unwrap();

        let added = page.prepend_html(list, r#"<li class="todo"><span>Tea</span></li>"#).unwrap();
        let items = page.children(list);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], added);

        assert!(page.remove(added));
        let items = page.children(list);
        assert_eq!(items.len(), 1);
        assert_eq!(page.text(items[0]).as_deref(), Some("Eggs & ham"));
    }

    #[test]
    fn churn_within_one_render_reuses_slots() {
        let page = Page::new();
        page.replace_root(FORM);
        let list = page.get_element_by_id("todoList").unwrap();
        let input = page.get_element_by_id("newTodo").unwrap();
        let baseline = page.doc().nodes.len();

        for round in 0..200 {
            let added = page.prepend_html(list, r#"<li class="todo"><span>Tea</span></li>"#).unwrap();
            assert!(page.remove(added));
            page.set_text(input, &format!("round {round}"));
        }
        assert!(page.doc().nodes.len() <= baseline + 4);
        assert_eq!(page.children(list).len(), 1);
    }

    #[test]
    fn handle_to_removed_node_stays_inert_after_slot_reuse() {
        let page = Page::new();
        page.replace_root(FORM);
        let list = page.get_element_by_id("todoList").unwrap();

        let gone = page.prepend_html(list, r#"<li class="todo">old</li>"#).unwrap();
        page.remove(gone);
        let fresh = page.prepend_html(list, r#"<li class="todo">new</li>"#).unwrap();

        assert_ne!(gone, fresh);
        assert!(!page.contains(gone));
        assert!(!page.set_value(gone, "x"));
        assert_eq!(page.text(fresh).as_deref(), Some("new"));
    }

    #[test]
    fn toggle_class_only_touches_named_class() {
        let page = Page::new();
        page.replace_root(FORM);
        let item = page.query(page.get_element_by_id("todoList").unwrap(), "li").unwrap();

        page.toggle_class(item, "completed", true);
        assert!(page.has_class(item, "completed"));
        assert!(page.has_class(item, "todo"));
        page.toggle_class(item, "completed", false);
        assert!(!page.has_class(item, "completed"));
        assert!(page.has_class(item, "first"));
    }

    #[tokio::test]
    async fn events_bubble_to_ancestor_listeners() {
        let page = Page::new();
        page.replace_root(FORM);
        let list = page.get_element_by_id("todoList").unwrap();
        let item = page.query(list, "li").unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&hits);
        page.add_listener(
            list,
            EventKind::Click,
            listener(move |event| {
                let seen = Arc::clone(&seen);
                async move {
                    event.prevent_default();
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );

        assert!(page.click(item).await);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!page.submit(page.get_element_by_id("todoForm").unwrap()).await);
    }

    #[tokio::test]
    async fn clicking_checkbox_flips_it() {
        let page = Page::new();
        page.replace_root(r#"<input type="checkbox" id="c" class="check">"#);
        let check = page.get_element_by_id("c").unwrap();
        page.click(check).await;
        assert!(page.is_checked(check));
        page.click(check).await;
        assert!(!page.is_checked(check));
    }

    #[test]
    fn escape_round_trips_through_parser() {
        let page = Page::new();
        page.replace_root(&format!("<span id=\"s\">{}</span>", escape("<b>\"x\" & 'y'</b>")));
        let span = page.get_element_by_id("s").unwrap();
        assert_eq!(page.text(span).as_deref(), Some("<b>\"x\" & 'y'</b>"));
    }
}
