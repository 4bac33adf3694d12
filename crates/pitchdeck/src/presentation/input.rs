use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

/// A navigation request, whether it came from the keyboard or the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    Jump(usize),
    Exit,
}

/// Map a key press inside the overlay to a command.
pub fn command_for_key(key: egui::Key) -> Option<Command> {
    match key {
        egui::Key::ArrowRight | egui::Key::N | egui::Key::Space | egui::Key::PageDown => {
            Some(Command::Next)
        }
        egui::Key::ArrowLeft | egui::Key::P | egui::Key::PageUp | egui::Key::Backspace => {
            Some(Command::Previous)
        }
        egui::Key::Home => Some(Command::First),
        egui::Key::End => Some(Command::Last),
        egui::Key::Escape => Some(Command::Exit),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct HubState {
    next_id: u64,
    attached: Vec<(u64, String)>,
}

/// The window-wide keyboard listener table.
///
/// An overlay that wants every key press calls [`KeyboardHub::attach`] and
/// keeps the returned guard for as long as it is visible. The app shell asks
/// [`KeyboardHub::is_captured`] each frame to decide whether key presses go to
/// the overlay or to the page underneath. `Rc` keeps this on the UI thread.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    state: Rc<RefCell<HubState>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, owner: &str) -> ListenerGuard {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.attached.push((id, owner.to_string()));
        log::debug!("keyboard listener {id} attached for \"{owner}\"");
        ListenerGuard {
            id,
            hub: self.clone(),
        }
    }

    pub fn is_captured(&self) -> bool {
        !self.state.borrow().attached.is_empty()
    }

    #[cfg(test)]
    pub fn attached_count(&self) -> usize {
        self.state.borrow().attached.len()
    }

    fn detach(&self, id: u64) {
        let mut state = self.state.borrow_mut();
        if let Some(pos) = state.attached.iter().position(|(i, _)| *i == id) {
            let (_, owner) = state.attached.remove(pos);
            log::debug!("keyboard listener {id} detached for \"{owner}\"");
        }
    }
}

/// Holds one keyboard listener attached; detaches it on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    hub: KeyboardHub,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.hub.detach(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_keys() {
        for key in [
            egui::Key::ArrowRight,
            egui::Key::N,
            egui::Key::Space,
            egui::Key::PageDown,
        ] {
            assert_eq!(command_for_key(key), Some(Command::Next), "{key:?}");
        }
    }

    #[test]
    fn test_backward_keys() {
        for key in [
            egui::Key::ArrowLeft,
            egui::Key::P,
            egui::Key::PageUp,
            egui::Key::Backspace,
        ] {
            assert_eq!(command_for_key(key), Some(Command::Previous), "{key:?}");
        }
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(command_for_key(egui::Key::Escape), Some(Command::Exit));
        assert_eq!(command_for_key(egui::Key::Home), Some(Command::First));
        assert_eq!(command_for_key(egui::Key::End), Some(Command::Last));
        assert_eq!(command_for_key(egui::Key::ArrowDown), None);
        assert_eq!(command_for_key(egui::Key::D), None);
    }

    #[test]
    fn test_guard_detaches_on_drop() {
        let hub = KeyboardHub::new();
        assert!(!hub.is_captured());

        let first = hub.attach("Overview");
        let second = hub.attach("Team");
        assert_eq!(hub.attached_count(), 2);

        drop(first);
        assert_eq!(hub.attached_count(), 1);
        assert!(hub.is_captured());

        drop(second);
        assert!(!hub.is_captured());
    }

    #[test]
    fn test_clones_share_the_table() {
        let hub = KeyboardHub::new();
        let view = hub.clone();
        let _guard = hub.attach("Financials");
        assert!(view.is_captured());
    }
}
