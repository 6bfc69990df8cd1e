//! Producer/consumer synchronization state.

mod slot;
pub(crate) use slot::{AtomicSlot,SlotState};

mod sync_state;
pub(crate) use sync_state::SyncState;

mod diagnostics;
pub use diagnostics::Diagnostics;
pub(crate) use diagnostics::AtomicDiagnostics;
