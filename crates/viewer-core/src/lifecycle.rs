//! One-shot async asset slots that tolerate teardown while pending.
//!
//! Every load is tagged with a [`LoadTicket`]. A completion carrying an old
//! ticket, or arriving after teardown, is dropped without touching the slot.

use crate::error::ViewerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub enum LoadPhase<T> {
    Idle,
    Pending(LoadTicket),
    Ready(T),
    Failed(ViewerError),
    TornDown,
}

#[derive(Debug)]
pub struct AssetSlot<T> {
    name: String,
    phase: LoadPhase<T>,
    next_ticket: u64,
}

impl<T> AssetSlot<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: LoadPhase::Idle,
            next_ticket: 0,
        }
    }

    /// Starts a load. Any earlier pending ticket becomes stale.
    pub fn begin(&mut self) -> Result<LoadTicket, ViewerError> {
        if self.is_torn_down() {
            return Err(ViewerError::TornDown);
        }
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.phase = LoadPhase::Pending(ticket);
        log::debug!("[load] {} pending (ticket {})", self.name, ticket.0);
        Ok(ticket)
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        matches!(self.phase, LoadPhase::Pending(t) if t == ticket)
    }

    /// Stores `value` if `ticket` is current. Otherwise hands it back so the
    /// caller can release it.
    pub fn resolve(&mut self, ticket: LoadTicket, value: T) -> Result<(), T> {
        if !self.is_current(ticket) {
            log::debug!("[load] {} dropping stale result (ticket {})", self.name, ticket.0);
            return Err(value);
        }
        log::info!("[load] {} ready", self.name);
        self.phase = LoadPhase::Ready(value);
        Ok(())
    }

    pub fn fail(&mut self, ticket: LoadTicket, err: ViewerError) -> bool {
        if !self.is_current(ticket) {
            log::debug!("[load] {} dropping stale failure (ticket {})", self.name, ticket.0);
            return false;
        }
        log::error!("[load] {}: {}", self.name, err);
        self.phase = LoadPhase::Failed(err);
        true
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.phase {
            LoadPhase::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match &mut self.phase {
            LoadPhase::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.phase, LoadPhase::TornDown)
    }

    pub fn error(&self) -> Option<&ViewerError> {
        match &self.phase {
            LoadPhase::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Final state. Returns the ready value, if any, for the caller to release.
    pub fn teardown(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.phase, LoadPhase::TornDown) {
            LoadPhase::Ready(v) => Some(v),
            _ => None,
        }
    }
}
