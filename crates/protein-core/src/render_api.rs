use crate::{Color, Rect};

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

/// Draw commands in paint order. Rects are in window space; clips nest, and a
/// backend intersects each pushed clip with the one below it.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect { rect: Rect, color: Color },
    Text { rect: Rect, text: String, color: Color },
    PushClip { rect: Rect },
    PopClip,
}

/// The GPU side of the render boundary. Nothing it returns flows back into
/// the tree.
pub trait RenderBackend {
    fn configure_surface(&mut self, width: u32, height: u32);
    fn frame(&mut self, scene: &Scene);
}
