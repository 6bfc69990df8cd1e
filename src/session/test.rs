//! These are functions to peek within the `Session`.
//! All fields are `pub(super)` to ensure other parts
//! of `pullbridge` cannot do funky stuff with `Session`
//! internals.
//!
//! These functions effectively re-expose them as `pub(crate)`.
//! They are only for testing purposes.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	session::Session,
	state::SlotState,
	transport::{Transport,TransportAdapter},
};
use std::sync::{Arc,Weak};

//---------------------------------------------------------------------------------------------------- Session Impl (test-only)
impl<T: Transport> Session<T> {
	fn adapter(&self) -> &Arc<TransportAdapter> {
		&self.open.as_ref().unwrap().adapter
	}

	pub(crate) fn slot_states(&self) -> Vec<SlotState> {
		let sync = &self.adapter().buffers().sync;
		(0..sync.len()).map(|i| sync.slot(i)).collect()
	}

	pub(crate) fn ready(&self) -> bool {
		self.adapter().buffers().sync.ready()
	}

	pub(crate) fn active_index(&self) -> usize {
		self.adapter().buffers().sync.active_index()
	}

	pub(crate) fn upmix(&self) -> bool {
		self.open.as_ref().unwrap().upmix
	}

	pub(crate) fn stall_threshold(&self) -> std::time::Duration {
		self.open.as_ref().unwrap().waiter.stall_threshold()
	}

	pub(crate) fn promoted(&self) -> bool {
		self.open.as_ref().unwrap().promotion.is_some()
	}

	/// Observe the buffers being freed without keeping them alive.
	pub(crate) fn weak_adapter(&self) -> Weak<TransportAdapter> {
		Arc::downgrade(self.adapter())
	}
}
