//! Back-to-front paint traversal.
//!
//! Children paint in insertion order, so the last-added sibling ends up on
//! top. Hit testing walks the same lists in reverse.

use unicode_segmentation::UnicodeSegmentation;

use crate::render_api::{RenderBackend, Scene, SceneNode};
use crate::tree::ViewTree;
use crate::view::{ViewId, ViewKind};
use crate::{Color, Vec2};

/// Glyph substituted for every grapheme of a secure text field.
pub const SECURE_MASK: char = '\u{2022}';

pub fn build_scene(tree: &ViewTree, root: ViewId) -> Scene {
    let mut scene = Scene {
        clear_color: Color::TRANSPARENT,
        nodes: vec![],
    };
    // Start from the root's parent offset so a subtree paints where it sits.
    let origin = tree
        .parent(root)
        .and_then(|p| tree.window_frame(p))
        .map(|r| r.origin())
        .unwrap_or(Vec2::ZERO);
    walk(tree, root, origin, &mut scene);
    scene
}

pub fn render(tree: &ViewTree, root: ViewId, backend: &mut dyn RenderBackend) {
    let scene = build_scene(tree, root);
    backend.frame(&scene);
}

fn walk(tree: &ViewTree, id: ViewId, parent_origin: Vec2, scene: &mut Scene) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let rect = node.frame.offset(parent_origin);

    scene.nodes.push(SceneNode::PushClip { rect });

    if let Some(bg) = node.background_color {
        scene.nodes.push(SceneNode::Rect { rect, color: bg });
    }

    match &node.kind {
        ViewKind::Plain => {}
        ViewKind::Label(l) => {
            if !l.text.is_empty() {
                scene.nodes.push(SceneNode::Text {
                    rect,
                    text: l.text.clone(),
                    color: l.text_color,
                });
            }
        }
        ViewKind::Button(b) => {
            if !b.title.is_empty() {
                scene.nodes.push(SceneNode::Text {
                    rect,
                    text: b.title.clone(),
                    color: b.text_color,
                });
            }
        }
        ViewKind::TextField(t) => {
            if t.text.is_empty() {
                if !t.placeholder.is_empty() {
                    scene.nodes.push(SceneNode::Text {
                        rect,
                        text: t.placeholder.clone(),
                        color: t.text_color.with_alpha(t.text_color.3 / 2),
                    });
                }
            } else {
                let text = if t.secure_text_entry {
                    mask(&t.text)
                } else {
                    t.text.clone()
                };
                scene.nodes.push(SceneNode::Text {
                    rect,
                    text,
                    color: t.text_color,
                });
            }
        }
    }

    if let Some(on_render) = &node.on_render {
        on_render(node, rect, scene);
    }

    for &child in node.children() {
        walk(tree, child, rect.origin(), scene);
    }

    scene.nodes.push(SceneNode::PopClip);
}

fn mask(text: &str) -> String {
    text.graphemes(true).map(|_| SECURE_MASK).collect()
}
