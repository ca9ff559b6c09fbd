use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Modal animation phases. The CSS transition does the visual work; the
/// phases exist so the overlay is mounted before it fades in and stays
/// mounted until it has faded out.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

pub const OPEN_DELAY_MS: u32 = 10;
pub const CLOSE_DELAY_MS: u32 = 300;

impl ModalPhase {
    pub fn is_mounted(&self) -> bool {
        !matches!(self, ModalPhase::Closed)
    }

    pub fn overlay_class(&self) -> &'static str {
        match self {
            ModalPhase::Open => "opacity-100",
            _ => "opacity-0",
        }
    }

    pub fn panel_class(&self) -> &'static str {
        match self {
            ModalPhase::Open => "scale-100",
            _ => "scale-95",
        }
    }
}

/// Handle for one modal. Each transition replaces the pending timer, and
/// dropping the old `Timeout` cancels it, so rapid open/close toggling
/// always lands in a consistent phase.
#[derive(Clone)]
pub struct ModalHandle {
    phase: UseStateHandle<ModalPhase>,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl ModalHandle {
    pub fn phase(&self) -> ModalPhase {
        *self.phase
    }

    pub fn open(&self) {
        self.phase.set(ModalPhase::Opening);
        let phase = self.phase.clone();
        let timer = Timeout::new(OPEN_DELAY_MS, move || phase.set(ModalPhase::Open));
        *self.pending.borrow_mut() = Some(timer);
    }

    pub fn close(&self) {
        self.phase.set(ModalPhase::Closing);
        let phase = self.phase.clone();
        let timer = Timeout::new(CLOSE_DELAY_MS, move || phase.set(ModalPhase::Closed));
        *self.pending.borrow_mut() = Some(timer);
    }
}

#[hook]
pub fn use_modal() -> ModalHandle {
    let phase = use_state(ModalPhase::default);
    let pending = use_mut_ref(|| None::<Timeout>);
    ModalHandle { phase, pending }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_closed_is_unmounted() {
        assert!(!ModalPhase::Closed.is_mounted());
        assert!(ModalPhase::Opening.is_mounted());
        assert!(ModalPhase::Open.is_mounted());
        assert!(ModalPhase::Closing.is_mounted());
    }

    #[test]
    fn classes_track_phase() {
        assert_eq!(ModalPhase::Open.overlay_class(), "opacity-100");
        assert_eq!(ModalPhase::Opening.overlay_class(), "opacity-0");
        assert_eq!(ModalPhase::Closing.overlay_class(), "opacity-0");
        assert_eq!(ModalPhase::Open.panel_class(), "scale-100");
        assert_eq!(ModalPhase::Closing.panel_class(), "scale-95");
    }
}
