//! Key routing to the focused text field.

use protein_core::input::{KeyEvent, ModifierFlags};
use protein_core::keymap::{self, KEY_TAB};
use protein_core::{ViewId, ViewTree};

use crate::dispatcher::Dispatcher;
use crate::textfield;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No text field has focus.
    Unhandled,
    /// Consumed by the focused field without changing it.
    Accepted,
    Edited,
    /// A commit key reached the field and its `on_enter` (if any) ran.
    Committed,
    FocusMoved(Option<ViewId>),
}

impl Dispatcher {
    pub fn route_key_event(
        &mut self,
        tree: &mut ViewTree,
        key_code: u16,
        is_down: bool,
        is_repeat: bool,
        flags: ModifierFlags,
    ) -> KeyOutcome {
        self.handle_key_event(
            tree,
            KeyEvent {
                key_code,
                is_down,
                is_repeat,
                flags,
            },
        )
    }

    pub fn handle_key_event(&mut self, tree: &mut ViewTree, event: KeyEvent) -> KeyOutcome {
        self.prune(tree);
        let Some(field) = self.focused else {
            return KeyOutcome::Unhandled;
        };

        if !event.is_down || keymap::is_modifier_key(event.key_code) {
            return KeyOutcome::Accepted;
        }

        if event.key_code == KEY_TAB {
            if event.is_repeat {
                return KeyOutcome::Accepted;
            }
            let backwards = event.flags.contains(ModifierFlags::SHIFT);
            let next = self.next_field(tree, field, backwards);
            self.set_focused(tree, next);
            return KeyOutcome::FocusMoved(next);
        }

        if keymap::is_commit_key(event.key_code) {
            let Some(f) = tree.text_field(field) else {
                return KeyOutcome::Unhandled;
            };
            let handler = f.on_enter.clone();
            let text = f.text.clone();
            log::debug!("commit {field:?}");
            if let Some(on_enter) = handler {
                on_enter(tree, field, &text);
            }
            return KeyOutcome::Committed;
        }

        let Some(f) = tree.text_field_mut(field) else {
            return KeyOutcome::Unhandled;
        };

        if keymap::is_delete_key(event.key_code) {
            return if textfield::delete_backward(&mut f.text) {
                KeyOutcome::Edited
            } else {
                KeyOutcome::Accepted
            };
        }

        if event.flags.is_shortcut() {
            return KeyOutcome::Accepted;
        }

        match keymap::character_for(event.key_code, event.flags) {
            Some(c) if textfield::insert_char(&mut f.text, c) => KeyOutcome::Edited,
            _ => {
                log::trace!("key {:#x} produced no text", event.key_code);
                KeyOutcome::Accepted
            }
        }
    }

    /// Next attached text field in paint order, wrapping around.
    fn next_field(&self, tree: &ViewTree, from: ViewId, backwards: bool) -> Option<ViewId> {
        let fields: Vec<ViewId> = tree
            .subtree(tree.root())
            .into_iter()
            .filter(|id| tree.text_field(*id).is_some())
            .collect();
        let at = fields.iter().position(|id| *id == from)?;
        let n = fields.len();
        let next = if backwards { (at + n - 1) % n } else { (at + 1) % n };
        Some(fields[next])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Button, SecureTextField, TextField};
    use protein_core::keymap::{KEY_DELETE, KEY_KEYPAD_ENTER, KEY_RETURN};
    use protein_core::{Rect, Vec2};
    use std::cell::RefCell;
    use std::rc::Rc;

    const KEY_A: u16 = 0x00;
    const KEY_B: u16 = 0x0B;
    const KEY_LEFT_SHIFT: u16 = 0x38;

    fn setup() -> (ViewTree, Dispatcher, ViewId) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let field = tree.insert(TextField("name", |_, _, _| {}).frame(Rect::new(0.0, 0.0, 100.0, 20.0)));
        tree.add_subview(tree.root(), field).unwrap();
        (tree, Dispatcher::new(), field)
    }

    fn press(d: &mut Dispatcher, tree: &mut ViewTree, code: u16, flags: ModifierFlags) -> KeyOutcome {
        d.route_key_event(tree, code, true, false, flags)
    }

    fn text(tree: &ViewTree, id: ViewId) -> &str {
        &tree.text_field(id).unwrap().text
    }

    #[test]
    fn test_no_focus_is_unhandled() {
        let (mut tree, mut d, field) = setup();
        assert_eq!(press(&mut d, &mut tree, KEY_A, ModifierFlags::empty()), KeyOutcome::Unhandled);
        assert_eq!(text(&tree, field), "");

        tree.text_field_mut(field).unwrap().text = "keep".into();
        assert_eq!(press(&mut d, &mut tree, KEY_DELETE, ModifierFlags::empty()), KeyOutcome::Unhandled);
        assert_eq!(press(&mut d, &mut tree, KEY_RETURN, ModifierFlags::empty()), KeyOutcome::Unhandled);
        assert_eq!(text(&tree, field), "keep");
    }

    #[test]
    fn test_typing_and_delete() {
        let (mut tree, mut d, field) = setup();
        assert!(d.focus(&mut tree, field));
        assert_eq!(press(&mut d, &mut tree, KEY_A, ModifierFlags::empty()), KeyOutcome::Edited);
        assert_eq!(press(&mut d, &mut tree, KEY_B, ModifierFlags::SHIFT), KeyOutcome::Edited);
        assert_eq!(text(&tree, field), "aB");

        assert_eq!(press(&mut d, &mut tree, KEY_DELETE, ModifierFlags::empty()), KeyOutcome::Edited);
        assert_eq!(text(&tree, field), "a");
        press(&mut d, &mut tree, KEY_DELETE, ModifierFlags::empty());
        assert_eq!(press(&mut d, &mut tree, KEY_DELETE, ModifierFlags::empty()), KeyOutcome::Accepted);
        assert_eq!(text(&tree, field), "");
    }

    #[test]
    fn test_key_up_and_modifiers_are_swallowed() {
        let (mut tree, mut d, field) = setup();
        d.focus(&mut tree, field);
        assert_eq!(
            d.route_key_event(&mut tree, KEY_A, false, false, ModifierFlags::empty()),
            KeyOutcome::Accepted
        );
        assert_eq!(press(&mut d, &mut tree, KEY_LEFT_SHIFT, ModifierFlags::SHIFT), KeyOutcome::Accepted);
        // Arrow keys have no text.
        assert_eq!(press(&mut d, &mut tree, 0x7B, ModifierFlags::empty()), KeyOutcome::Accepted);
        assert_eq!(text(&tree, field), "");
    }

    #[test]
    fn test_repeats_type_again() {
        let (mut tree, mut d, field) = setup();
        d.focus(&mut tree, field);
        d.route_key_event(&mut tree, KEY_A, true, false, ModifierFlags::empty());
        d.route_key_event(&mut tree, KEY_A, true, true, ModifierFlags::empty());
        assert_eq!(text(&tree, field), "aa");
    }

    #[test]
    fn test_shortcuts_do_not_type() {
        let (mut tree, mut d, field) = setup();
        d.focus(&mut tree, field);
        assert_eq!(press(&mut d, &mut tree, KEY_A, ModifierFlags::COMMAND), KeyOutcome::Accepted);
        assert_eq!(press(&mut d, &mut tree, KEY_A, ModifierFlags::CONTROL), KeyOutcome::Accepted);
        assert_eq!(text(&tree, field), "");
        // Delete still works with a shortcut modifier held.
        tree.text_field_mut(field).unwrap().text = "xy".into();
        press(&mut d, &mut tree, KEY_DELETE, ModifierFlags::COMMAND);
        assert_eq!(text(&tree, field), "x");
    }

    #[test]
    fn test_commit_fires_on_enter_with_text() {
        let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let commits = Rc::new(RefCell::new(Vec::new()));
        let field = tree.insert(TextField("name", {
            let commits = commits.clone();
            move |_: &mut ViewTree, _: ViewId, text: &str| commits.borrow_mut().push(text.to_string())
        }));
        tree.add_subview(tree.root(), field).unwrap();
        let mut d = Dispatcher::new();
        d.focus(&mut tree, field);

        press(&mut d, &mut tree, KEY_A, ModifierFlags::empty());
        assert_eq!(press(&mut d, &mut tree, KEY_RETURN, ModifierFlags::empty()), KeyOutcome::Committed);
        assert_eq!(press(&mut d, &mut tree, KEY_KEYPAD_ENTER, ModifierFlags::empty()), KeyOutcome::Committed);
        assert_eq!(*commits.borrow(), vec!["a".to_string(), "a".to_string()]);
        // Commit leaves text and focus alone.
        assert_eq!(text(&tree, field), "a");
        assert_eq!(d.focused(), Some(field));
    }

    #[test]
    fn test_on_enter_may_remove_its_field() {
        let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let field = tree.insert(TextField("x", |tree: &mut ViewTree, me: ViewId, _: &str| {
            tree.remove_from_superview(me)
        }));
        tree.add_subview(tree.root(), field).unwrap();
        let mut d = Dispatcher::new();
        d.focus(&mut tree, field);

        assert_eq!(press(&mut d, &mut tree, KEY_RETURN, ModifierFlags::empty()), KeyOutcome::Committed);
        assert_eq!(press(&mut d, &mut tree, KEY_A, ModifierFlags::empty()), KeyOutcome::Unhandled);
        assert_eq!(d.focused(), None);
        assert!(!tree.text_field(field).unwrap().is_focused);
        assert_eq!(text(&tree, field), "");
    }

    #[test]
    fn test_secure_field_stores_real_text() {
        let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let field = tree.insert(SecureTextField("Password", |_, _, _| {}));
        tree.add_subview(tree.root(), field).unwrap();
        let mut d = Dispatcher::new();
        d.focus(&mut tree, field);
        for code in [KEY_A, KEY_B] {
            press(&mut d, &mut tree, code, ModifierFlags::empty());
        }
        assert_eq!(text(&tree, field), "ab");
        assert!(tree.text_field(field).unwrap().secure_text_entry);
    }

    #[test]
    fn test_tab_cycles_fields_in_paint_order() {
        let mut tree = ViewTree::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let root = tree.root();
        let mut fields = Vec::new();
        for i in 0..3 {
            let f = tree.insert(
                TextField("f", |_, _, _| {}).frame(Rect::new(0.0, 30.0 * i as f32, 100.0, 20.0)),
            );
            tree.add_subview(root, f).unwrap();
            fields.push(f);
        }
        let button = tree.insert(Button("ok", |_, _| {}).frame(Rect::new(200.0, 0.0, 50.0, 20.0)));
        tree.add_subview(root, button).unwrap();

        let mut d = Dispatcher::new();
        d.focus(&mut tree, fields[0]);
        assert_eq!(press(&mut d, &mut tree, KEY_TAB, ModifierFlags::empty()), KeyOutcome::FocusMoved(Some(fields[1])));
        assert!(!tree.text_field(fields[0]).unwrap().is_focused);
        assert!(tree.text_field(fields[1]).unwrap().is_focused);
        press(&mut d, &mut tree, KEY_TAB, ModifierFlags::empty());
        assert_eq!(press(&mut d, &mut tree, KEY_TAB, ModifierFlags::empty()), KeyOutcome::FocusMoved(Some(fields[0])));
        assert_eq!(press(&mut d, &mut tree, KEY_TAB, ModifierFlags::SHIFT), KeyOutcome::FocusMoved(Some(fields[2])));

        // Detached fields drop out of the cycle.
        tree.remove_from_superview(fields[0]);
        assert_eq!(press(&mut d, &mut tree, KEY_TAB, ModifierFlags::empty()), KeyOutcome::FocusMoved(Some(fields[1])));
        assert_eq!(text(&tree, fields[1]), "");
    }

    #[test]
    fn test_focus_api() {
        let (mut tree, mut d, field) = setup();
        let button = tree.insert(Button("ok", |_, _| {}));
        tree.add_subview(tree.root(), button).unwrap();
        let loose = tree.insert(TextField("loose", |_, _, _| {}));

        assert!(!d.focus(&mut tree, button));
        assert!(!d.focus(&mut tree, loose));
        assert_eq!(d.focused(), None);

        assert!(d.focus(&mut tree, field));
        assert!(tree.text_field(field).unwrap().is_focused);
        d.resign_focus(&mut tree);
        assert_eq!(d.focused(), None);
        assert!(!tree.text_field(field).unwrap().is_focused);

        // Clicking a field focuses it; typing then lands there.
        d.dispatch_mouse(&mut tree, Vec2::new(5.0, 5.0), true);
        d.dispatch_mouse(&mut tree, Vec2::new(5.0, 5.0), false);
        press(&mut d, &mut tree, KEY_A, ModifierFlags::empty());
        assert_eq!(text(&tree, field), "a");
    }
}
