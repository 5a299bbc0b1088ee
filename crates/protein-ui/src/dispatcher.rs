//! Pointer routing: hover, press/capture, click counting and click-to-focus.
//!
//! All interaction state lives on [`Dispatcher`], never on globals. Every
//! held [`ViewId`] is re-validated against the tree before use, since any
//! user callback may have detached or destroyed the view it was called for.

use std::rc::Rc;

use protein_core::input::{MouseButton, MouseEvent, MouseEventType};
use protein_core::{Vec2, ViewId, ViewTree};
use web_time::{Duration, Instant};

/// Receives every mouse event the dispatcher processes, with the view it was
/// resolved to. Holding one is what enables raw hook delivery.
pub type MouseCallback = Rc<dyn Fn(&mut ViewTree, &MouseEvent, Option<ViewId>)>;

#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Max gap between two downs counted as one multi-click.
    pub double_click_interval: Duration,
    /// Max pointer travel (points) between downs of a multi-click.
    pub double_click_distance: f32,
    /// Window origin on screen, used to fill `screen_location` for events
    /// synthesized by [`Dispatcher::dispatch_mouse`].
    pub window_origin: Vec2,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            double_click_interval: Duration::from_millis(500),
            double_click_distance: 4.0,
            window_origin: Vec2::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseOutcome {
    /// Nothing was hit, nothing was captured, or dispatch is disabled.
    Unhandled,
    Hovered(Option<ViewId>),
    Pressed(ViewId),
    Dragged(ViewId),
    Released { target: ViewId, clicked: bool },
    /// Passed to the callback without touching view state (other buttons,
    /// scroll, flags).
    Forwarded,
}

impl MouseOutcome {
    pub fn target(self) -> Option<ViewId> {
        match self {
            MouseOutcome::Hovered(t) => t,
            MouseOutcome::Pressed(t) | MouseOutcome::Dragged(t) => Some(t),
            MouseOutcome::Released { target, .. } => Some(target),
            MouseOutcome::Unhandled | MouseOutcome::Forwarded => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ClickRun {
    target: ViewId,
    position: Vec2,
    at: Instant,
    count: i32,
}

pub struct Dispatcher {
    config: DispatchConfig,
    hovered: Option<ViewId>,
    pressed: Option<ViewId>,
    pub(crate) focused: Option<ViewId>,
    button_down: bool,
    clicks: Option<ClickRun>,
    mouse_callback: Option<MouseCallback>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            config,
            hovered: None,
            pressed: None,
            focused: None,
            button_down: false,
            clicks: None,
            mouse_callback: None,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn hovered(&self) -> Option<ViewId> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<ViewId> {
        self.pressed
    }

    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    /// Count of the current multi-click run (0 before any press).
    pub fn click_count(&self) -> i32 {
        self.clicks.map(|c| c.count).unwrap_or(0)
    }

    /// Replaces the mouse callback; `None` turns raw event delivery off.
    pub fn set_mouse_callback(&mut self, callback: Option<MouseCallback>) {
        self.mouse_callback = callback;
    }

    pub fn has_mouse_callback(&self) -> bool {
        self.mouse_callback.is_some()
    }

    /// Feeds the left button's state at `position` (window space).
    pub fn dispatch_mouse(
        &mut self,
        tree: &mut ViewTree,
        position: Vec2,
        is_down: bool,
    ) -> MouseOutcome {
        self.dispatch_mouse_at(tree, position, is_down, Instant::now())
    }

    /// [`Dispatcher::dispatch_mouse`] with an explicit timestamp for click counting.
    pub fn dispatch_mouse_at(
        &mut self,
        tree: &mut ViewTree,
        position: Vec2,
        is_down: bool,
        now: Instant,
    ) -> MouseOutcome {
        let (event_type, outcome) = match (self.button_down, is_down) {
            (false, true) => (
                MouseEventType::LeftMouseDown,
                self.press(tree, position, now),
            ),
            (true, true) => (MouseEventType::LeftMouseDragged, self.drag(tree)),
            (true, false) => (MouseEventType::LeftMouseUp, self.release(tree, position)),
            (false, false) => (MouseEventType::MouseMoved, self.hover(tree, position)),
        };

        if let Some(cb) = self.mouse_callback.clone() {
            let event = MouseEvent {
                event_type,
                screen_location: position + self.config.window_origin,
                window_location: position,
                button_number: 0,
                click_count: self.reported_click_count(event_type),
            };
            cb(tree, &event, outcome.target());
        }
        outcome
    }

    /// Entry point for events forwarded by the window server hook.
    ///
    /// Dropped as [`MouseOutcome::Unhandled`] while no callback is registered.
    /// Only left-button events drive press/hover state; the rest are forwarded
    /// as-is. `click_count` on the delivered event is the dispatcher's own.
    pub fn handle_mouse_event(&mut self, tree: &mut ViewTree, event: MouseEvent) -> MouseOutcome {
        self.handle_mouse_event_at(tree, event, Instant::now())
    }

    pub fn handle_mouse_event_at(
        &mut self,
        tree: &mut ViewTree,
        event: MouseEvent,
        now: Instant,
    ) -> MouseOutcome {
        let Some(cb) = self.mouse_callback.clone() else {
            log::debug!("mouse event {:?} dropped: no callback", event.event_type);
            return MouseOutcome::Unhandled;
        };

        let t = event.event_type;
        let pos = event.window_location;
        let left = t.button() == Some(MouseButton::Left);
        let outcome = if t.is_mouse_click_event() && !left {
            MouseOutcome::Forwarded
        } else if t.is_mouse_down() {
            self.press(tree, pos, now)
        } else if t.is_mouse_drag() {
            self.drag(tree)
        } else if t.is_mouse_up() {
            self.release(tree, pos)
        } else {
            match t {
                MouseEventType::MouseMoved | MouseEventType::MouseEntered => {
                    if self.button_down {
                        self.drag(tree)
                    } else {
                        self.hover(tree, pos)
                    }
                }
                MouseEventType::MouseExited => {
                    self.set_hovered(tree, None);
                    MouseOutcome::Hovered(None)
                }
                _ => MouseOutcome::Forwarded,
            }
        };

        let click_count = if outcome == MouseOutcome::Forwarded {
            event.click_count
        } else {
            self.reported_click_count(t)
        };
        let delivered = MouseEvent {
            click_count,
            ..event
        };
        cb(tree, &delivered, outcome.target());
        outcome
    }

    fn reported_click_count(&self, t: MouseEventType) -> i32 {
        if t.is_mouse_down() || t.is_mouse_up() {
            self.click_count()
        } else {
            0
        }
    }

    fn press(&mut self, tree: &mut ViewTree, pos: Vec2, now: Instant) -> MouseOutcome {
        self.prune(tree);
        self.button_down = true;

        // A down without a matching up (the release landed outside the
        // window) drops the old capture without clicking.
        if let Some(old) = self.pressed.take() {
            if let Some(b) = tree.button_mut(old) {
                b.is_down = false;
            }
            log::debug!("press while {old:?} still captured; releasing it");
        }

        let target = tree
            .hit_test(tree.root(), pos)
            .map(|hit| tree.interaction_target(hit));
        self.set_hovered(tree, target);

        // Click-to-focus: a field takes focus, anything else drops it.
        let field = target.filter(|t| tree.text_field(*t).is_some());
        self.set_focused(tree, field);

        let Some(target) = target else {
            log::debug!("press at {pos:?} hit nothing");
            self.clicks = None;
            return MouseOutcome::Unhandled;
        };

        let count = match self.clicks {
            Some(run)
                if run.target == target
                    && now.duration_since(run.at) <= self.config.double_click_interval
                    && run.position.distance(pos) <= self.config.double_click_distance =>
            {
                run.count + 1
            }
            _ => 1,
        };
        self.clicks = Some(ClickRun {
            target,
            position: pos,
            at: now,
            count,
        });

        self.pressed = Some(target);
        if let Some(b) = tree.button_mut(target) {
            b.is_down = true;
        }
        log::debug!("press {target:?} (click {count})");
        MouseOutcome::Pressed(target)
    }

    /// Moves while pressed stay with the captured view; no re-hit-testing.
    fn drag(&mut self, tree: &mut ViewTree) -> MouseOutcome {
        self.prune(tree);
        match self.pressed {
            Some(target) => MouseOutcome::Dragged(target),
            None => MouseOutcome::Unhandled,
        }
    }

    fn release(&mut self, tree: &mut ViewTree, pos: Vec2) -> MouseOutcome {
        self.button_down = false;
        self.prune(tree);

        let Some(target) = self.pressed.take() else {
            self.hover(tree, pos);
            return MouseOutcome::Unhandled;
        };

        let mut handler = None;
        let inside = tree
            .window_frame(target)
            .is_some_and(|frame| frame.contains(pos));
        if let Some(b) = tree.button_mut(target) {
            b.is_down = false;
            if inside {
                handler = b.on_click.clone();
            }
        }

        let clicked = handler.is_some();
        if let Some(on_click) = handler {
            log::debug!("click {target:?}");
            on_click(tree, target);
        }

        // The handler may have rearranged the tree; hover is recomputed from
        // scratch at the release point.
        self.hover(tree, pos);
        MouseOutcome::Released { target, clicked }
    }

    fn hover(&mut self, tree: &mut ViewTree, pos: Vec2) -> MouseOutcome {
        self.prune(tree);

        if let Some(run) = self.clicks {
            if run.position.distance(pos) > self.config.double_click_distance {
                self.clicks = None;
            }
        }

        let target = tree
            .hit_test(tree.root(), pos)
            .map(|hit| tree.interaction_target(hit));
        self.set_hovered(tree, target);
        MouseOutcome::Hovered(target)
    }

    fn set_hovered(&mut self, tree: &mut ViewTree, target: Option<ViewId>) {
        if self.hovered == target {
            return;
        }
        if let Some(old) = self.hovered {
            if let Some(b) = tree.button_mut(old) {
                b.is_hovering = false;
            }
        }
        if let Some(new) = target {
            if let Some(b) = tree.button_mut(new) {
                b.is_hovering = true;
            }
        }
        log::debug!("hover {:?} -> {:?}", self.hovered, target);
        self.hovered = target;
    }

    /// Moves focus to `field` (already known to be a text field) or clears it.
    pub(crate) fn set_focused(&mut self, tree: &mut ViewTree, field: Option<ViewId>) {
        if self.focused == field {
            return;
        }
        if let Some(old) = self.focused {
            if let Some(f) = tree.text_field_mut(old) {
                f.is_focused = false;
            }
        }
        if let Some(new) = field {
            if let Some(f) = tree.text_field_mut(new) {
                f.is_focused = true;
            }
        }
        log::debug!("focus {:?} -> {:?}", self.focused, field);
        self.focused = field;
    }

    /// Focuses an attached text field. Returns false (and leaves focus alone)
    /// for anything else.
    pub fn focus(&mut self, tree: &mut ViewTree, id: ViewId) -> bool {
        if !tree.is_attached(id) || tree.text_field(id).is_none() {
            return false;
        }
        self.set_focused(tree, Some(id));
        true
    }

    pub fn resign_focus(&mut self, tree: &mut ViewTree) {
        self.set_focused(tree, None);
    }

    /// Drops references to views that are no longer attached, clearing the
    /// flags they carried if the node still exists.
    pub(crate) fn prune(&mut self, tree: &mut ViewTree) {
        if let Some(id) = self.hovered.filter(|id| !tree.is_attached(*id)) {
            if let Some(b) = tree.button_mut(id) {
                b.is_hovering = false;
            }
            log::debug!("dropping detached hover target {id:?}");
            self.hovered = None;
        }
        if let Some(id) = self.pressed.filter(|id| !tree.is_attached(*id)) {
            if let Some(b) = tree.button_mut(id) {
                b.is_down = false;
            }
            log::debug!("dropping detached pressed target {id:?}");
            self.pressed = None;
        }
        if let Some(id) = self.focused.filter(|id| !tree.is_attached(*id)) {
            if let Some(f) = tree.text_field_mut(id) {
                f.is_focused = false;
            }
            log::debug!("dropping detached focus {id:?}");
            self.focused = None;
        }
        if self.clicks.is_some_and(|run| !tree.is_attached(run.target)) {
            self.clicks = None;
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .field("focused", &self.focused)
            .field("button_down", &self.button_down)
            .field("clicks", &self.clicks)
            .field("mouse_callback", &self.mouse_callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
