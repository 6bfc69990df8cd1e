//! `Session::open()`.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	buffer,
	config::STALL_FACTOR,
	error::OpenError,
	format::{negotiate,AudioFormat,Channels},
	macros::{contract,debug2,info2},
	session::{Opened,PlaybackState,Promotion,Session,Waiter},
	transport::{Transport,TransportAdapter},
};
use crossbeam::sync::Parker;
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- Open
impl<T: Transport> Session<T> {
	#[cold]
	#[inline(never)]
	/// Negotiate a format, allocate buffers and set up the transport stream.
	///
	/// On success the session is [`PlaybackState::Opened`] and the
	/// format the hardware will play is returned. The transport is
	/// started by the first [`Session::commit`].
	///
	/// [`Config::encoding`](crate::config::Config::encoding)
	/// overrides the encoding of `requested`.
	///
	/// # Errors
	/// On any error, everything created so far is released and
	/// the session stays [`PlaybackState::Closed`]. It is safe
	/// to try again, e.g. with a different format.
	///
	/// # Panics
	/// If the session is not closed.
	pub fn open(&mut self, requested: AudioFormat) -> Result<AudioFormat, OpenError> {
		contract!(self.state == PlaybackState::Closed, "open() on a {} session", self.state);

		let config = self.config;
		let mut requested = requested;
		if let Some(encoding) = config.encoding {
			requested.encoding = encoding;
		}

		let format = negotiate(requested, &self.transport.capabilities())?;
		let upmix = requested.channels == Channels::Mono && format.channels == Channels::Stereo;
		debug2!("Session - requested: {requested}, negotiated: {format}, upmix: {upmix}");

		// From here on, every early return drops what was built so far.
		let parker = Parker::new();
		let buffers = buffer::allocate(&format, config.frame_count, config.double_buffered, config.alignment)?;
		let buffer_bytes = buffers.buffer_bytes();

		let adapter = Arc::new(TransportAdapter::new(
			buffers,
			format,
			config.underrun_policy,
			parker.unparker().clone(),
		));

		let handle = self.transport.create_stream(buffer_bytes)?;

		if let Err(error) = self.transport.register_callback(handle, Arc::clone(&adapter)) {
			self.transport.destroy(handle);
			return Err(error.into());
		}

		self.transport.set_gain(handle, config.gain);

		let stall_threshold = config
			.stall_threshold
			.unwrap_or_else(|| format.duration_of(config.frame_count) * STALL_FACTOR);

		// Last, nothing after this can fail and need a demotion.
		let promotion = if config.realtime_priority {
			Promotion::promote(&format, config.frame_count)
		} else {
			None
		};

		self.open = Some(Opened {
			format,
			upmix,
			handle,
			adapter,
			waiter: Waiter::new(parker, config.wait_strategy, config.poll_interval, stall_threshold),
			stalls: 0,
			promotion,
		});
		self.state = PlaybackState::Opened;

		info2!("Session - opened stream {handle}, {format}, {buffer_bytes} bytes per buffer, stall threshold: {stall_threshold:?}");
		Ok(format)
	}
}
