use std::rc::Rc;

use smallvec::SmallVec;

use crate::render_api::Scene;
use crate::tree::ViewTree;
use crate::{Color, Rect};

slotmap::new_key_type! {
    /// Handle to a node in a [`ViewTree`]. Stays valid until the node is destroyed.
    pub struct ViewId;
}

/// Fired on mouse-up inside the button that received the matching mouse-down.
pub type ClickHandler = Rc<dyn Fn(&mut ViewTree, ViewId)>;
/// Fired with the field's current text when a commit key reaches a focused field.
pub type EnterHandler = Rc<dyn Fn(&mut ViewTree, ViewId, &str)>;
/// Custom painting hook, called with the node's window-space frame.
pub type RenderHandler = Rc<dyn Fn(&ViewNode, Rect, &mut Scene)>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelView {
    pub text: String,
    pub text_color: Color,
}

#[derive(Clone)]
pub struct ButtonView {
    pub title: String,
    pub text_color: Color,
    pub is_hovering: bool,
    pub is_down: bool,
    pub on_click: Option<ClickHandler>,
}

#[derive(Clone)]
pub struct TextFieldView {
    pub text: String,
    pub placeholder: String,
    pub text_color: Color,
    pub is_focused: bool,
    /// Display-only; `text` always stores the real characters.
    pub secure_text_entry: bool,
    pub on_enter: Option<EnterHandler>,
}

#[derive(Clone)]
pub enum ViewKind {
    Plain,
    Label(LabelView),
    Button(ButtonView),
    TextField(TextFieldView),
}

impl ViewKind {
    /// Buttons and text fields take pointer interaction state; everything else
    /// is only a container for hit testing.
    pub fn is_interactive(&self) -> bool {
        matches!(self, ViewKind::Button(_) | ViewKind::TextField(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Plain => "View",
            ViewKind::Label(_) => "Label",
            ViewKind::Button(_) => "Button",
            ViewKind::TextField(_) => "TextField",
        }
    }
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Plain => write!(f, "Plain"),
            ViewKind::Label(l) => f
                .debug_struct("Label")
                .field("text", &l.text)
                .field("text_color", &l.text_color)
                .finish(),
            ViewKind::Button(b) => f
                .debug_struct("Button")
                .field("title", &b.title)
                .field("is_hovering", &b.is_hovering)
                .field("is_down", &b.is_down)
                .field("on_click", &b.on_click.as_ref().map(|_| "<callback>"))
                .finish(),
            ViewKind::TextField(t) => f
                .debug_struct("TextField")
                .field("text", &t.text)
                .field("placeholder", &t.placeholder)
                .field("is_focused", &t.is_focused)
                .field("secure_text_entry", &t.secure_text_entry)
                .field("on_enter", &t.on_enter.as_ref().map(|_| "<callback>"))
                .finish(),
        }
    }
}

/// A single element of the retained tree.
///
/// Nodes are created detached; the parent and child links are only ever
/// written by [`ViewTree`], which keeps them consistent.
#[derive(Clone)]
pub struct ViewNode {
    pub frame: Rect,
    pub background_color: Option<Color>,
    pub kind: ViewKind,
    pub on_render: Option<RenderHandler>,
    pub(crate) parent: Option<ViewId>,
    pub(crate) children: SmallVec<[ViewId; 4]>,
}

impl ViewNode {
    pub fn new(kind: ViewKind) -> Self {
        ViewNode {
            frame: Rect::default(),
            background_color: None,
            kind,
            on_render: None,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn on_render(mut self, f: impl Fn(&ViewNode, Rect, &mut Scene) + 'static) -> Self {
        self.on_render = Some(Rc::new(f));
        self
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn children(&self) -> &[ViewId] {
        &self.children
    }
}

impl std::fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewNode")
            .field("frame", &self.frame)
            .field("background_color", &self.background_color)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}
