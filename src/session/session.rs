//! The playback session.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::Config,
	format::AudioFormat,
	session::{Promotion,Waiter},
	state::Diagnostics,
	transport::{Transport,TransportAdapter,StreamHandle},
};
use std::sync::Arc;
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- PlaybackState
/// Where a [`Session`] is in its lifecycle.
///
/// ```text
/// Closed -> Opened -> Playing <-> Paused
///    ^                   |          |
///    +-------------------+----------+
/// ```
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackState {
	#[default]
	/// No buffers, no transport stream.
	Closed,
	/// Buffers and stream exist, nothing committed yet.
	Opened,
	/// The transport is pulling.
	Playing,
	/// The transport is stopped, buffers are kept.
	Paused,
}

//---------------------------------------------------------------------------------------------------- Session
/// A push-to-pull audio output.
///
/// The mixer (producer) fills buffers with [`Session::get_buffer`]
/// and hands them over with [`Session::commit`]. The [`Transport`]
/// (consumer) pulls them on the hardware's clock.
///
/// ```rust
/// # use pullbridge::{*,config::*,format::*,transport::*};
/// let mut session = Session::new(DummyTransport::default(), Config::SINGLE_BUFFERED);
/// assert_eq!(session.state(), PlaybackState::Closed);
///
/// let format = session.open(AudioFormat::DEFAULT).unwrap();
/// assert_eq!(format, AudioFormat::DEFAULT);
///
/// for _ in 0..3 {
///     session.get_buffer().fill(0);
///     session.commit().unwrap();
/// }
/// assert_eq!(session.state(), PlaybackState::Playing);
///
/// session.close();
/// assert_eq!(session.state(), PlaybackState::Closed);
/// ```
///
/// ## Contract
/// Calling an operation in the wrong state (e.g. [`Session::commit`]
/// on a closed session) is a programmer error and panics.
///
/// ## Drop
/// Dropping an opened [`Session`] closes it.
#[derive(Debug)]
pub struct Session<T: Transport> {
	pub(super) transport: T,
	pub(super) config: Config,
	pub(super) state: PlaybackState,
	/// `Some` in every state but `Closed`.
	pub(super) open: Option<Opened>,
	/// Counters of the last closed stream.
	pub(super) last: Diagnostics,
}

/// Everything that exists between `open()` and `close()`.
#[derive(Debug)]
pub(super) struct Opened {
	/// What the hardware plays.
	pub(super) format: AudioFormat,
	/// Mono was requested, stereo was negotiated.
	pub(super) upmix: bool,
	pub(super) handle: StreamHandle,
	/// The transport holds the other strong reference.
	pub(super) adapter: Arc<TransportAdapter>,
	pub(super) waiter: Waiter,
	pub(super) stalls: u64,
	/// `Some` if `open()` promoted its thread.
	pub(super) promotion: Option<Promotion>,
}

impl Opened {
	/// Bytes the producer writes per buffer.
	pub(super) fn producer_bytes(&self) -> usize {
		let bytes = self.adapter.buffer_bytes();
		if self.upmix { bytes / 2 } else { bytes }
	}
}

/// Access the [`Opened`] state or fail the contract.
#[track_caller]
pub(super) fn opened<'a>(open: &'a mut Option<Opened>, state: PlaybackState, operation: &str) -> &'a mut Opened {
	match open.as_mut() {
		Some(opened) => opened,
		None => panic!("pullbridge contract violation: {operation}() on a {state} session"),
	}
}

//---------------------------------------------------------------------------------------------------- Session Impl
impl<T: Transport> Session<T> {
	#[cold]
	#[inline(never)]
	/// Create a closed session that will use `transport`.
	///
	/// Nothing is allocated until [`Session::open`].
	pub fn new(transport: T, config: Config) -> Self {
		Self {
			transport,
			config,
			state: PlaybackState::Closed,
			open: None,
			last: Diagnostics::default(),
		}
	}

	#[inline]
	#[must_use]
	/// The current [`PlaybackState`].
	pub const fn state(&self) -> PlaybackState {
		self.state
	}

	#[inline]
	#[must_use]
	/// The negotiated hardware format, `None` if closed.
	pub fn format(&self) -> Option<AudioFormat> {
		self.open.as_ref().map(|o| o.format)
	}

	#[inline]
	#[must_use]
	/// Length of the slice [`Session::get_buffer`] returns, `None` if closed.
	///
	/// This is half the hardware buffer when mono
	/// audio is being duplicated into stereo.
	pub fn buffer_bytes(&self) -> Option<usize> {
		self.open.as_ref().map(Opened::producer_bytes)
	}

	#[inline]
	#[must_use]
	/// The [`Config`] used by the next [`Session::open`].
	pub const fn config(&self) -> &Config {
		&self.config
	}

	/// Replace the [`Config`].
	///
	/// This only takes effect on the next [`Session::open`].
	pub fn set_config(&mut self, config: Config) {
		self.config = config;
	}

	#[inline]
	#[must_use]
	/// The [`Transport`].
	pub const fn transport(&self) -> &T {
		&self.transport
	}

	#[must_use]
	/// Playback counters.
	///
	/// If the session is closed, these are the
	/// counters of the last stream it had open.
	pub fn diagnostics(&self) -> Diagnostics {
		match self.open.as_ref() {
			Some(o) => o.adapter.diagnostics().snapshot(o.stalls),
			None => self.last,
		}
	}
}
