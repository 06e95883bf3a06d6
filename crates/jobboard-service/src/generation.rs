use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed to a search when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter of started searches. A response is only worth rendering
/// while its ticket is still the latest one issued.
#[derive(Debug, Default)]
pub struct SearchGeneration {
    latest: AtomicU64,
}

impl SearchGeneration {
    pub fn new() -> Self { Self::default() }

    pub fn begin(&self) -> Ticket { Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1) }

    pub fn is_current(&self, ticket: Ticket) -> bool { self.latest.load(Ordering::SeqCst) == ticket.0 }
}
