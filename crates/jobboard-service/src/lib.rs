pub mod board;
pub mod generation;
pub mod snapshot;

pub use board::JobBoard;
pub use generation::{SearchGeneration, Ticket};
pub use snapshot::SnapshotSource;
