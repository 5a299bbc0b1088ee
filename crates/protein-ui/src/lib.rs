#![allow(non_snake_case)]
//! View builders and input routing.
//!
//! Builders return detached [`ViewNode`]s; insert them into a [`ViewTree`] and
//! attach them with [`ViewTree::add_subview`]. A single [`Dispatcher`] per
//! window turns pointer and key events into hover, press, click and focus
//! changes on that tree.
//!
//! ```rust
//! use protein_core::*;
//! use protein_ui::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 320.0, 200.0));
//! let clicks = Rc::new(Cell::new(0));
//! let ok = tree.insert(
//!     Button("OK", {
//!         let clicks = clicks.clone();
//!         move |_, _| clicks.set(clicks.get() + 1)
//!     })
//!     .frame(Rect::new(10.0, 10.0, 80.0, 24.0)),
//! );
//! tree.add_subview(tree.root(), ok).unwrap();
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.dispatch_mouse(&mut tree, Vec2::new(20.0, 20.0), true);
//! dispatcher.dispatch_mouse(&mut tree, Vec2::new(20.0, 20.0), false);
//! assert_eq!(clicks.get(), 1);
//! ```

pub mod dispatcher;
pub mod keyboard;
pub mod textfield;

use std::rc::Rc;

use protein_core::{
    ButtonView, Color, EnterHandler, LabelView, Rect, TextFieldView, ViewId, ViewKind, ViewNode,
    ViewTree,
};

pub use dispatcher::{DispatchConfig, Dispatcher, MouseCallback, MouseOutcome};
pub use keyboard::KeyOutcome;

/// Plain container.
pub fn View(frame: Rect) -> ViewNode {
    ViewNode::new(ViewKind::Plain).frame(frame)
}

pub fn Label(text: impl Into<String>) -> ViewNode {
    ViewNode::new(ViewKind::Label(LabelView {
        text: text.into(),
        text_color: Color::WHITE,
    }))
}

pub fn Button(
    title: impl Into<String>,
    on_click: impl Fn(&mut ViewTree, ViewId) + 'static,
) -> ViewNode {
    ViewNode::new(ViewKind::Button(ButtonView {
        title: title.into(),
        text_color: Color::WHITE,
        is_hovering: false,
        is_down: false,
        on_click: Some(Rc::new(on_click)),
    }))
}

pub fn TextField(
    placeholder: impl Into<String>,
    on_enter: impl Fn(&mut ViewTree, ViewId, &str) + 'static,
) -> ViewNode {
    text_field(placeholder.into(), false, Rc::new(on_enter))
}

/// A text field whose contents paint as bullets.
pub fn SecureTextField(
    placeholder: impl Into<String>,
    on_enter: impl Fn(&mut ViewTree, ViewId, &str) + 'static,
) -> ViewNode {
    text_field(placeholder.into(), true, Rc::new(on_enter))
}

fn text_field(placeholder: String, secure: bool, on_enter: EnterHandler) -> ViewNode {
    ViewNode::new(ViewKind::TextField(TextFieldView {
        text: String::new(),
        placeholder,
        text_color: Color::WHITE,
        is_focused: false,
        secure_text_entry: secure,
        on_enter: Some(on_enter),
    }))
}
