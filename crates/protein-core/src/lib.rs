//! # View tree, input model and render boundary
//!
//! Protein's UI is a retained tree of views owned by a [`ViewTree`]. Nodes
//! are addressed by [`ViewId`] handles into a slot map:
//!
//! ```rust
//! use protein_core::*;
//!
//! let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 640.0, 480.0));
//! let panel = tree.insert(
//!     ViewNode::new(ViewKind::Plain)
//!         .frame(Rect::new(20.0, 20.0, 200.0, 100.0))
//!         .background(Color::from_hex("#202020")),
//! );
//! tree.add_subview(tree.root(), panel).unwrap();
//!
//! // Adding a view under its own descendant is refused and changes nothing.
//! let inner = tree.insert(ViewNode::new(ViewKind::Plain));
//! tree.add_subview(panel, inner).unwrap();
//! assert!(tree.add_subview(inner, panel).is_err());
//! assert_eq!(tree.parent(panel), Some(tree.root()));
//! ```
//!
//! - Children paint in insertion order ([`render::build_scene`]) and are
//!   hit-tested in reverse ([`ViewTree::hit_test`]), so whatever is drawn on
//!   top receives the pointer.
//! - Input arrives already normalized by the window server hook as
//!   [`input::MouseEvent`] and [`input::KeyEvent`].
//! - Interaction state (hover, press, focus) is driven by the dispatcher in
//!   `protein-ui`; this crate only stores it on the nodes.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod keymap;
pub mod render;
pub mod render_api;
pub mod tree;
pub mod view;

pub use color::*;
pub use error::TreeError;
pub use geometry::*;
pub use render_api::*;
pub use tree::*;
pub use view::*;
