//! Producer side operations of an opened `Session`.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	buffer::mono_to_stereo,
	error::TransportError,
	macros::{contract,debug2,error2,info2,trace2},
	session::{opened,PlaybackState,Session},
	state::SlotState,
	transport::Transport,
};

//---------------------------------------------------------------------------------------------------- Producer
impl<T: Transport> Session<T> {
	/// The buffer to fill next.
	///
	/// Blocks until that buffer has been pulled by the transport.
	/// Calling this again before [`Session::commit`] returns the
	/// same buffer, with whatever was already written to it.
	///
	/// Fill the whole slice, it is handed over as-is.
	///
	/// # Panics
	/// If the session is not [`PlaybackState::Opened`] or [`PlaybackState::Playing`].
	pub fn get_buffer(&mut self) -> &mut [u8] {
		let state = self.state;
		contract!(
			matches!(state, PlaybackState::Opened | PlaybackState::Playing),
			"get_buffer() on a {state} session",
		);

		let opened = opened(&mut self.open, state, "get_buffer");
		let sync = &opened.adapter.buffers().sync;

		let wakeup = opened.adapter.wakeup();
		let mut stalled = false;

		let index = loop {
			// The consumer may be replaying the slot
			// (`Consumed`) between the check and the claim.
			if let Ok(index) = sync.begin_fill() {
				break index;
			}
			stalled |= opened.waiter.until(wakeup, "get_buffer", || sync.active_fillable());
		};

		// One stall per call, however many waits it took.
		if stalled {
			opened.stalls += 1;
		}

		let len = opened.producer_bytes();
		let slot = opened.adapter.buffers().slot(index);

		// SAFETY: the slot is `Filling`, which the consumer
		// never reads, and `&mut self` is held while it is written.
		let bytes = unsafe { slot.as_mut_slice() };
		&mut bytes[..len]
	}

	/// Hand the filled buffer over to the transport.
	///
	/// When double-buffered, this first blocks until the
	/// previously committed buffer has been pulled.
	///
	/// The first commit after [`Session::open`] starts the transport.
	///
	/// This does nothing when [`PlaybackState::Paused`].
	///
	/// # Errors
	/// If the transport fails to start. The committed
	/// audio is discarded, the session stays [`PlaybackState::Opened`]
	/// and committing again retries.
	///
	/// # Panics
	/// If the session is closed, or [`Session::get_buffer`]
	/// was not called since the last commit.
	pub fn commit(&mut self) -> Result<(), TransportError> {
		let state = self.state;
		contract!(state != PlaybackState::Closed, "commit() on a closed session");

		if state == PlaybackState::Paused {
			trace2!("Session - commit() while paused, ignoring");
			return Ok(());
		}

		let opened = opened(&mut self.open, state, "commit");
		let sync = &opened.adapter.buffers().sync;
		let index = sync.active_index();
		let slot = sync.slot(index);

		contract!(slot == SlotState::Filling, "commit() without get_buffer(), slot {index} is {slot}");

		if opened.upmix {
			// SAFETY: still `Filling`.
			let bytes = unsafe { opened.adapter.buffers().slot(index).as_mut_slice() };
			mono_to_stereo(bytes, opened.format.encoding);
		}

		if sync.other_ready() && opened.waiter.until(opened.adapter.wakeup(), "commit", || !sync.other_ready()) {
			opened.stalls += 1;
		}

		let committed = sync.mark_ready();
		debug_assert_eq!(committed, Ok(index));
		trace2!("Session - committed slot {index}");

		if state == PlaybackState::Opened {
			let handle = opened.handle;
			let format = opened.format;

			if let Err(error) = self.transport.start(handle, format.frame_rate, format.channels.is_stereo()) {
				error2!("Session - failed to start stream {handle}: {error}");
				// Nothing was ever pulled, so nothing can be mid-pull.
				opened.adapter.buffers().sync.reset();
				return Err(error);
			}

			self.state = PlaybackState::Playing;
			info2!("Session - started stream {handle}");
		}

		Ok(())
	}

	/// Block until every committed buffer has been pulled.
	///
	/// Returns immediately when [`PlaybackState::Paused`].
	///
	/// # Panics
	/// If the session is closed.
	pub fn wait(&mut self) {
		let state = self.state;
		contract!(state != PlaybackState::Closed, "wait() on a closed session");

		if state == PlaybackState::Paused {
			return;
		}

		let opened = opened(&mut self.open, state, "wait");
		let sync = &opened.adapter.buffers().sync;

		if sync.ready() && opened.waiter.until(opened.adapter.wakeup(), "wait", || !sync.ready()) {
			opened.stalls += 1;
		}
	}

	/// Stop the transport, keeping every buffer as-is.
	///
	/// Committed buffers are pulled after [`Session::resume`].
	/// Pausing a paused session does nothing.
	///
	/// # Panics
	/// If the session is not [`PlaybackState::Playing`] or [`PlaybackState::Paused`].
	pub fn pause(&mut self) {
		let state = self.state;
		contract!(
			matches!(state, PlaybackState::Playing | PlaybackState::Paused),
			"pause() on a {state} session",
		);

		if state == PlaybackState::Paused {
			return;
		}

		let handle = opened(&mut self.open, state, "pause").handle;
		self.transport.stop(handle);
		self.state = PlaybackState::Paused;
		debug2!("Session - paused stream {handle}");
	}

	/// Restart a paused transport.
	///
	/// Resuming a playing session does nothing.
	///
	/// # Errors
	/// If the transport fails to restart, the session stays paused.
	///
	/// # Panics
	/// If the session is not [`PlaybackState::Playing`] or [`PlaybackState::Paused`].
	pub fn resume(&mut self) -> Result<(), TransportError> {
		let state = self.state;
		contract!(
			matches!(state, PlaybackState::Playing | PlaybackState::Paused),
			"resume() on a {state} session",
		);

		if state == PlaybackState::Playing {
			return Ok(());
		}

		let opened = opened(&mut self.open, state, "resume");
		let handle = opened.handle;
		let format = opened.format;

		self.transport.start(handle, format.frame_rate, format.channels.is_stereo())?;
		self.state = PlaybackState::Playing;
		debug2!("Session - resumed stream {handle}");
		Ok(())
	}
}
