//! In-memory document model
//!
//! An arena of elements addressed by [`ElementId`]. Document order is
//! insertion order, which is what every query returns.

use std::collections::{BTreeMap, BTreeSet};

/// Index of an element in its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A single element: tag, classes, attributes, inline styles and content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_string(), value.to_string());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Current form control value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub const fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// The live page: elements plus the window-level state behaviors read
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    scroll_locked: bool,
    scroll_offset: f64,
    viewport_width: u32,
    hidden: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            scroll_locked: false,
            scroll_offset: 0.0,
            viewport_width: 1280,
            hidden: false,
        }
    }

    /// Append a top-level element
    pub fn append(&mut self, element: Element) -> ElementId {
        self.insert(element, None)
    }

    /// Append an element under `parent`
    pub fn append_child(&mut self, parent: ElementId, element: Element) -> ElementId {
        self.insert(element, Some(parent))
    }

    fn insert(&mut self, mut element: Element, parent: Option<ElementId>) -> ElementId {
        element.parent = parent;
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Run `f` on an element if it exists
    pub fn update(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) {
        if let Some(element) = self.get_mut(id) {
            f(element);
        }
    }

    /// All elements matching `predicate`, in document order
    pub fn select(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| predicate(el))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// First element matching `predicate`
    pub fn select_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| predicate(el))
            .map(ElementId)
    }

    /// Descendants of `root` matching `predicate`, in document order
    pub fn select_within(
        &self,
        root: ElementId,
        predicate: impl Fn(&Element) -> bool,
    ) -> Vec<ElementId> {
        self.select(predicate)
            .into_iter()
            .filter(|&id| self.is_descendant(id, root))
            .collect()
    }

    pub fn by_class(&self, class: &str) -> Vec<ElementId> {
        self.select(|el| el.has_class(class))
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.select_first(|el| el.has_class(class))
    }

    /// Element whose `id` attribute equals `id`
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.select_first(|el| el.attr("id") == Some(id))
    }

    /// Whether `id` sits strictly below `ancestor`
    pub fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.get(id).and_then(Element::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.get(parent).and_then(Element::parent);
        }
        false
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    /// Body `overflow: hidden`
    pub const fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub const fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
