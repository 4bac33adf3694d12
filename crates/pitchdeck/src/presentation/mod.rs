pub mod chrome;
pub mod input;

use crate::deck::{DeckError, Slide, SlideDeck};

use chrome::Chrome;
use input::{Command, KeyboardHub, ListenerGuard, command_for_key};

/// Runtime state of one presentation. The keyboard listener lives inside
/// `Open`, so it is attached exactly as long as the overlay is.
#[derive(Debug)]
enum Session {
    Closed,
    Open {
        index: usize,
        _keyboard: ListenerGuard,
    },
}

/// Full-screen slideshow state machine for a single host page's deck.
///
/// States are `Closed` and `Open(index)`. `enter` always starts at the first
/// slide, `next`/`previous` clamp at the deck edges, `jump` rejects indices
/// outside the deck, and `exit` (or dropping the controller) closes the
/// session and releases the keyboard.
///
/// A malformed deck (no slides, or duplicate ids) is accepted but leaves the
/// controller inert: `enter` does nothing.
#[derive(Debug)]
pub struct PresentationController<C> {
    deck: SlideDeck<C>,
    defect: Option<DeckError>,
    keyboard: KeyboardHub,
    session: Session,
}

impl<C> PresentationController<C> {
    pub fn new(deck: SlideDeck<C>, keyboard: &KeyboardHub) -> Self {
        let defect = deck.validate().err();
        if let Some(ref err) = defect {
            log::warn!("presentation disabled: {err}");
        }
        Self {
            deck,
            defect,
            keyboard: keyboard.clone(),
            session: Session::Closed,
        }
    }

    pub fn deck(&self) -> &SlideDeck<C> {
        &self.deck
    }

    pub fn defect(&self) -> Option<&DeckError> {
        self.defect.as_ref()
    }

    pub fn can_enter(&self) -> bool {
        self.defect.is_none()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.session, Session::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.session {
            Session::Open { index, .. } => Some(index),
            Session::Closed => None,
        }
    }

    pub fn current_slide(&self) -> Option<&Slide<C>> {
        self.current_index().and_then(|i| self.deck.get(i))
    }

    pub fn chrome(&self) -> Option<Chrome> {
        self.current_index().map(|i| Chrome::derive(&self.deck, i))
    }

    pub fn enter(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        if !self.can_enter() {
            log::debug!(
                "ignoring enter on malformed deck \"{}\"",
                self.deck.page_name()
            );
            return false;
        }
        self.session = Session::Open {
            index: 0,
            _keyboard: self.keyboard.attach(self.deck.page_name()),
        };
        log::debug!(
            "presentation \"{}\" opened ({} slides)",
            self.deck.page_name(),
            self.deck.len()
        );
        true
    }

    pub fn exit(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.session = Session::Closed;
        log::debug!("presentation \"{}\" closed", self.deck.page_name());
        true
    }

    pub fn next(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        let last = self.deck.len().saturating_sub(1);
        self.set_index((index + 1).min(last))
    }

    pub fn previous(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        self.set_index(index.saturating_sub(1))
    }

    pub fn jump(&mut self, target: usize) -> bool {
        if !self.is_open() {
            return false;
        }
        if target >= self.deck.len() {
            log::debug!(
                "rejecting jump to slide {target} in \"{}\" ({} slides)",
                self.deck.page_name(),
                self.deck.len()
            );
            return false;
        }
        self.set_index(target)
    }

    pub fn first(&mut self) -> bool {
        self.jump(0)
    }

    pub fn last(&mut self) -> bool {
        self.jump(self.deck.len().saturating_sub(1))
    }

    /// Apply a navigation command. Returns whether the state changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::First => self.first(),
            Command::Last => self.last(),
            Command::Jump(target) => self.jump(target),
            Command::Exit => self.exit(),
        }
    }

    /// Handle a key press while the overlay is open. Returns the command the
    /// key was consumed as, or `None` when closed or the key is unbound.
    pub fn handle_key(&mut self, key: eframe::egui::Key) -> Option<Command> {
        if !self.is_open() {
            return None;
        }
        let command = command_for_key(key)?;
        self.apply(command);
        Some(command)
    }

    fn set_index(&mut self, target: usize) -> bool {
        match &mut self.session {
            Session::Open { index, .. } if *index != target => {
                log::trace!(
                    "\"{}\": slide {} -> {}",
                    self.deck.page_name(),
                    *index + 1,
                    target + 1
                );
                *index = target;
                true
            }
            _ => false,
        }
    }
}

impl<C> Drop for PresentationController<C> {
    fn drop(&mut self) {
        if self.is_open() {
            log::debug!(
                "presentation \"{}\" unmounted while open",
                self.deck.page_name()
            );
        }
    }
}
