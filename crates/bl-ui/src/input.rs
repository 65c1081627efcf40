use egui::Key;
use bl_core::{Action, Event, KeyMap};

/// Arrow keys step one line, page keys jump one buffer.
pub fn default_key_map() -> KeyMap<Key> {
    let mut keys = KeyMap::new();
    keys.register(Key::ArrowDown, Action::LineDown);
    keys.register(Key::ArrowUp, Action::LineUp);
    keys.register(Key::PageDown, Action::JumpDown);
    keys.register(Key::PageUp, Action::JumpUp);
    keys
}

/// Scroll events for the key presses and releases in `events`.
///
/// The platform's own key repeat is dropped: holding a key is driven by the
/// session's repeat timer. Losing window focus releases any held key, since its
/// key-up goes to another window.
pub fn scroll_events(events: &[egui::Event], keys: &KeyMap<Key>) -> Vec<Event> {
    events
        .iter()
        .filter_map(|e| match e {
            egui::Event::Key { key, pressed, repeat: false, .. } => keys.translate(key, *pressed),
            egui::Event::WindowFocused(false) => Some(Event::FocusLost),
            _ => None,
        })
        .collect()
}
