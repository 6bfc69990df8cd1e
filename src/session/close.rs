//! `Session::close()` and `Drop`.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	macros::{error2,info2},
	session::{PlaybackState,Session},
	transport::Transport,
};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- Close
impl<T: Transport> Session<T> {
	#[cold]
	#[inline(never)]
	/// Stop the transport, then free everything.
	///
	/// The transport is stopped synchronously before
	/// anything is freed: once this returns the hardware
	/// will never pull from this session's buffers again.
	///
	/// Calling this on a closed session does nothing.
	pub fn close(&mut self) {
		let Some(opened) = self.open.take() else {
			return;
		};

		info2!("Session - closing stream {} ({})", opened.handle, self.state);

		// Ordering matters: stop, destroy, then free.
		self.transport.stop(opened.handle);
		self.transport.destroy(opened.handle);

		self.last = opened.adapter.diagnostics().snapshot(opened.stalls);

		// The slot states are left alone: a transport that kept
		// the adapter may still be holding a `Pull` on one of them.
		match Arc::into_inner(opened.adapter) {
			// Buffers are freed here.
			Some(adapter) => drop(adapter),
			None => error2!("Session - transport kept a reference to stream {} after destroy(), buffers leaked until it drops it", opened.handle),
		}

		if let Some(promotion) = opened.promotion {
			promotion.demote();
		}

		self.state = PlaybackState::Closed;
		info2!("Session - closed");
	}
}

//---------------------------------------------------------------------------------------------------- Drop
impl<T: Transport> Drop for Session<T> {
	#[cold]
	#[inline(never)]
	fn drop(&mut self) {
		self.close();
	}
}
