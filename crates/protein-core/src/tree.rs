//! The retained view tree.
//!
//! Nodes live in a slot map and refer to each other by [`ViewId`]. The owning
//! direction is parent → children; `parent` links are plain handles used for
//! upward walks and cycle checks.

use slotmap::SlotMap;

use crate::error::{Result, TreeError};
use crate::view::{ButtonView, LabelView, TextFieldView, ViewId, ViewKind, ViewNode};
use crate::{Rect, Vec2};

pub struct ViewTree {
    nodes: SlotMap<ViewId, ViewNode>,
    root: ViewId,
}

impl ViewTree {
    /// Creates a tree whose root is a plain view covering `frame`.
    pub fn new(frame: Rect) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ViewNode::new(ViewKind::Plain).frame(frame));
        Self { nodes, root }
    }

    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a new detached node.
    pub fn insert(&mut self, mut node: ViewNode) -> ViewId {
        // A cloned node carries its source's links and interaction flags; a
        // fresh one starts detached and idle.
        node.parent = None;
        node.children.clear();
        match &mut node.kind {
            ViewKind::Button(b) => {
                b.is_hovering = false;
                b.is_down = false;
            }
            ViewKind::TextField(t) => t.is_focused = false,
            ViewKind::Plain | ViewKind::Label(_) => {}
        }
        self.nodes.insert(node)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(id)
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// True if `ancestor` sits strictly above `node`.
    pub fn is_ancestor(&self, ancestor: ViewId, node: ViewId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// True if `id` is the root or reachable from it.
    pub fn is_attached(&self, id: ViewId) -> bool {
        self.contains(id) && (id == self.root || self.is_ancestor(self.root, id))
    }

    /// Appends `child` to `parent`, detaching it from any previous parent first.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        let index = self.children(parent).len();
        self.insert_subview(parent, child, index)
    }

    /// Like [`ViewTree::add_subview`], but places `child` at `index` (clamped).
    pub fn insert_subview(&mut self, parent: ViewId, child: ViewId, index: usize) -> Result<()> {
        if let Err(e) = self.check_attach(parent, child) {
            log::warn!("add_subview rejected: {e}");
            return Err(e);
        }

        self.remove_from_superview(child);

        let Some(p) = self.nodes.get_mut(parent) else {
            return Err(TreeError::StaleView(parent));
        };
        let index = index.min(p.children.len());
        p.children.insert(index, child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        Ok(())
    }

    fn check_attach(&self, parent: ViewId, child: ViewId) -> Result<()> {
        if !self.contains(parent) {
            return Err(TreeError::StaleView(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::StaleView(child));
        }
        if child == self.root {
            return Err(TreeError::RootView);
        }
        if child == parent {
            return Err(TreeError::SelfParent(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }
        Ok(())
    }

    /// Detaches `id` from its parent. No-op for detached or stale ids.
    pub fn remove_from_superview(&mut self, id: ViewId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.nodes.get_mut(id) {
            n.parent = None;
        }
    }

    /// Detaches `id` and frees it together with every descendant.
    pub fn destroy(&mut self, id: ViewId) -> Result<()> {
        if id == self.root {
            return Err(TreeError::RootView);
        }
        if !self.contains(id) {
            return Err(TreeError::StaleView(id));
        }
        self.remove_from_superview(id);
        for node in self.subtree(id) {
            self.nodes.remove(node);
        }
        Ok(())
    }

    /// `id` followed by all descendants, in paint (pre-)order.
    pub fn subtree(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.nodes.get(cur) else {
                continue;
            };
            out.push(cur);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// The node's frame accumulated through its ancestors.
    pub fn window_frame(&self, id: ViewId) -> Option<Rect> {
        let mut frame = self.nodes.get(id)?.frame;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            let node = self.nodes.get(p)?;
            frame = frame.offset(node.frame.origin());
            cur = node.parent;
        }
        Some(frame)
    }

    /// Deepest, topmost node under `point`, starting from `from`.
    ///
    /// `point` is expressed in the coordinate space of `from`'s parent (window
    /// space when starting at the root). Later siblings are tested first, and a
    /// point outside a node's frame never reaches its children.
    pub fn hit_test(&self, from: ViewId, point: Vec2) -> Option<ViewId> {
        let node = self.nodes.get(from)?;
        if !node.frame.contains(point) {
            return None;
        }
        let local = point - node.frame.origin();
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test(child, local) {
                return Some(hit);
            }
        }
        log::trace!("hit_test: {} {:?} at {:?}", node.kind.name(), from, point);
        Some(from)
    }

    /// Nearest button or text field at or above `hit`, falling back to `hit`.
    pub fn interaction_target(&self, hit: ViewId) -> ViewId {
        let mut cur = Some(hit);
        while let Some(id) = cur {
            match self.nodes.get(id) {
                Some(node) if node.kind.is_interactive() => return id,
                Some(node) => cur = node.parent,
                None => break,
            }
        }
        hit
    }

    pub fn label(&self, id: ViewId) -> Option<&LabelView> {
        match &self.nodes.get(id)?.kind {
            ViewKind::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn label_mut(&mut self, id: ViewId) -> Option<&mut LabelView> {
        match &mut self.nodes.get_mut(id)?.kind {
            ViewKind::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn button(&self, id: ViewId) -> Option<&ButtonView> {
        match &self.nodes.get(id)?.kind {
            ViewKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn button_mut(&mut self, id: ViewId) -> Option<&mut ButtonView> {
        match &mut self.nodes.get_mut(id)?.kind {
            ViewKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn text_field(&self, id: ViewId) -> Option<&TextFieldView> {
        match &self.nodes.get(id)?.kind {
            ViewKind::TextField(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_field_mut(&mut self, id: ViewId) -> Option<&mut TextFieldView> {
        match &mut self.nodes.get_mut(id)?.kind {
            ViewKind::TextField(t) => Some(t),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewTree")
            .field("root", &self.root)
            .field("len", &self.nodes.len())
            .finish()
    }
}
