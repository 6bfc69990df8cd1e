//! The hardware side of the bridge.
//!
//! This file defines what a pull-style audio transport must
//! provide. The hardware owns the playback clock and calls back
//! into [`TransportAdapter::on_pull`] whenever it wants more data.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	config::Gain,
	error::TransportError,
	format::CapabilityTable,
	transport::TransportAdapter,
};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- StreamHandle
/// Opaque handle to a hardware stream.
///
/// Only meaningful to the [`Transport`] that created it,
/// and invalid after [`Transport::destroy`].
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq,PartialOrd,Ord)]
pub struct StreamHandle(u32);

impl StreamHandle {
	#[inline]
	#[must_use]
	/// Wrap a transport specific stream id.
	pub const fn new(id: u32) -> Self {
		Self(id)
	}

	#[inline]
	#[must_use]
	/// The transport specific stream id.
	pub const fn get(self) -> u32 {
		self.0
	}
}

impl std::fmt::Display for StreamHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

//---------------------------------------------------------------------------------------------------- Transport
/// A pull-style audio output.
///
/// # Safety Notes
/// Implementors are expected to uphold these invariants,
/// the [`Session`](crate::Session) relies on them:
///
/// 1. The registered [`TransportAdapter`] is only ever
///    called through [`TransportAdapter::on_pull`], from
///    whatever context the hardware likes, one pull at a time
/// 2. [`Transport::stop`] is synchronous: when it returns, no pull
///    is running and none will start until the next [`Transport::start`]
/// 3. [`Transport::destroy`] drops every reference to the adapter
///    registered with that handle before returning
pub trait Transport {
	/// Encodings this transport can play.
	fn capabilities(&self) -> CapabilityTable;

	/// Allocate a stream that pulls up to `buffer_bytes` at a time.
	///
	/// # Errors
	/// [`TransportError::HandlesExhausted`] if no stream slots are left,
	/// anything else if the hardware cannot provide a stream.
	fn create_stream(&mut self, buffer_bytes: usize) -> Result<StreamHandle, TransportError>;

	/// Set the pull callback context of `handle`.
	///
	/// # Errors
	/// If `handle` is invalid or the adapter's format cannot be played.
	fn register_callback(
		&mut self,
		handle: StreamHandle,
		adapter: Arc<TransportAdapter>,
	) -> Result<(), TransportError>;

	/// Set the output gain of `handle`.
	///
	/// Invalid handles are ignored.
	fn set_gain(&mut self, handle: StreamHandle, gain: Gain);

	/// Start pulling on the hardware clock.
	///
	/// Starting an already started stream does nothing.
	///
	/// # Errors
	/// If the hardware stream could not be started.
	fn start(&mut self, handle: StreamHandle, frame_rate: u32, stereo: bool) -> Result<(), TransportError>;

	/// Stop pulling.
	///
	/// This must block until the hardware guarantees
	/// no pull is in flight and none will happen.
	///
	/// Stopping a stopped stream does nothing.
	fn stop(&mut self, handle: StreamHandle);

	/// Release `handle` and the adapter registered with it.
	///
	/// Implies [`Transport::stop`].
	fn destroy(&mut self, handle: StreamHandle);
}
