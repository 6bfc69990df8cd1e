//! The consumer side of the bridge.
//!
//! [`TransportAdapter::on_pull`] is what the hardware calls.
//! It may run in an interrupt-like context, so it:
//! - never blocks or parks
//! - never allocates
//! - touches nothing but atomics and the buffers
//! - finishes in bounded time (at most 3 CAS operations)
//!
//! Dropping a [`Pull`] that claimed a slot releases it (1 atomic swap)
//! and checks whether the producer is parked. Only if it is, with
//! [`WaitStrategy::Park`](crate::config::WaitStrategy::Park), the
//! producer is unparked, which briefly takes the parker's internal
//! mutex. With [`WaitStrategy::Poll`](crate::config::WaitStrategy::Poll)
//! the consumer never touches a lock.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	buffer::{AlignedBuffer,BufferSet},
	config::UnderrunPolicy,
	format::AudioFormat,
	macros::trace2,
	state::AtomicDiagnostics,
};
use crossbeam::sync::Unparker;
use std::sync::atomic::{fence,AtomicBool,Ordering};

//---------------------------------------------------------------------------------------------------- Wakeup
/// The consumer's way of waking a parked producer.
///
/// The producer raises `parked` before parking and re-checks its
/// condition after, the consumer publishes its release before reading
/// `parked`. The `SeqCst` fences on both sides guarantee that either the
/// producer sees the release or the consumer sees the flag.
#[derive(Debug)]
pub(crate) struct Wakeup {
	unparker: Unparker,
	parked: AtomicBool,
}

impl Wakeup {
	pub(crate) const fn new(unparker: Unparker) -> Self {
		Self {
			unparker,
			parked: AtomicBool::new(false),
		}
	}

	/// Producer: about to park (`true`) or done parking (`false`).
	#[inline]
	pub(crate) fn set_parked(&self, parked: bool) {
		self.parked.store(parked, Ordering::Relaxed);
		fence(Ordering::SeqCst);
	}

	#[cfg(test)]
	pub(crate) fn is_parked(&self) -> bool {
		self.parked.load(Ordering::Relaxed)
	}

	/// Consumer: unpark the producer if it is (about to be) parked.
	#[inline]
	pub(crate) fn wake(&self) {
		fence(Ordering::SeqCst);
		if self.parked.load(Ordering::Relaxed) {
			self.unparker.unpark();
		}
	}
}

//---------------------------------------------------------------------------------------------------- TransportAdapter
/// What a [`Transport`](crate::transport::Transport) pulls audio from.
///
/// One of these is created per opened [`Session`](crate::Session)
/// and handed to the transport, which keeps it until the stream
/// is destroyed. The buffers are freed when both sides let go of it.
#[derive(Debug)]
pub struct TransportAdapter {
	buffers: BufferSet,
	format: AudioFormat,
	policy: UnderrunPolicy,
	diagnostics: AtomicDiagnostics,
	/// Wakes the producer when a slot is released.
	wakeup: Wakeup,
}

impl TransportAdapter {
	pub(crate) fn new(
		buffers: BufferSet,
		format: AudioFormat,
		policy: UnderrunPolicy,
		unparker: Unparker,
	) -> Self {
		Self {
			buffers,
			format,
			policy,
			diagnostics: AtomicDiagnostics::default(),
			wakeup: Wakeup::new(unparker),
		}
	}

	#[inline]
	#[must_use]
	/// Size in bytes of every buffer.
	pub fn buffer_bytes(&self) -> usize {
		self.buffers.buffer_bytes()
	}

	#[inline]
	#[must_use]
	/// The format the buffers are in (what the hardware plays).
	pub const fn format(&self) -> AudioFormat {
		self.format
	}

	#[inline]
	pub(crate) const fn buffers(&self) -> &BufferSet {
		&self.buffers
	}

	#[inline]
	pub(crate) const fn diagnostics(&self) -> &AtomicDiagnostics {
		&self.diagnostics
	}

	#[inline]
	pub(crate) const fn wakeup(&self) -> &Wakeup {
		&self.wakeup
	}

	/// Hand the hardware up to `requested_bytes` of audio.
	///
	/// If a committed buffer is waiting, it is claimed
	/// (its ready flag is cleared right away) and the returned [`Pull`]
	/// holds `min(requested_bytes, buffer_bytes)` of it.
	///
	/// Otherwise this is an underrun: the [`Pull`] holds the same amount
	/// of stale or silent bytes (depending on [`UnderrunPolicy`]) and
	/// reports `0` delivered bytes. The bytes are never uninitialized
	/// or freed memory.
	///
	/// The slot can be refilled once the [`Pull`] is dropped,
	/// so copy out of it before returning control to the hardware.
	///
	/// A `requested_bytes` of `0` returns an empty [`Pull`] and changes nothing.
	pub fn on_pull(&self, requested_bytes: usize) -> Pull<'_> {
		let len = requested_bytes.min(self.buffers.buffer_bytes());

		if len == 0 {
			return Pull::silence(self, 0);
		}

		let sync = &self.buffers.sync;

		if let Some(index) = sync.claim() {
			trace2!("TransportAdapter - on_pull({requested_bytes}), delivering slot {index}");
			self.diagnostics.delivered(len);
			return Pull {
				adapter: self,
				buffer: self.buffers.slot(index),
				claimed: Some(index),
				len,
				delivered: len,
			};
		}

		self.diagnostics.underrun();

		let stale = match self.policy {
			UnderrunPolicy::Stale => sync.claim_stale(),
			UnderrunPolicy::Silence => None,
		};

		match stale {
			Some(index) => {
				trace2!("TransportAdapter - on_pull({requested_bytes}), underrun, replaying slot {index}");
				Pull {
					adapter: self,
					buffer: self.buffers.slot(index),
					claimed: Some(index),
					len,
					delivered: 0,
				}
			},
			None => {
				trace2!("TransportAdapter - on_pull({requested_bytes}), underrun, silence");
				Pull::silence(self, len)
			},
		}
	}
}

//---------------------------------------------------------------------------------------------------- Pull
/// Bytes handed to the hardware by [`TransportAdapter::on_pull`].
///
/// This dereferences to the bytes to play. While it
/// lives, the producer cannot write to the buffer behind it.
#[derive(Debug)]
pub struct Pull<'a> {
	adapter: &'a TransportAdapter,
	buffer: &'a AlignedBuffer,
	/// The slot to release on drop, `None` for silence.
	claimed: Option<usize>,
	len: usize,
	delivered: usize,
}

impl<'a> Pull<'a> {
	fn silence(adapter: &'a TransportAdapter, len: usize) -> Self {
		Self {
			adapter,
			buffer: adapter.buffers.silence(),
			claimed: None,
			len,
			delivered: 0,
		}
	}
}

impl Pull<'_> {
	#[inline]
	#[must_use]
	/// Bytes of freshly committed audio, `0` on underrun.
	pub const fn delivered(&self) -> usize {
		self.delivered
	}

	#[inline]
	#[must_use]
	/// Did this pull find nothing committed?
	pub const fn is_underrun(&self) -> bool {
		self.delivered == 0 && self.len != 0
	}
}

impl std::ops::Deref for Pull<'_> {
	type Target = [u8];

	#[inline]
	fn deref(&self) -> &[u8] {
		// SAFETY: the slot is `Consumed` so the producer
		// won't write it until we release it, or this is
		// the silence buffer, which is never written.
		let bytes = unsafe { self.buffer.as_slice() };
		&bytes[..self.len]
	}
}

impl AsRef<[u8]> for Pull<'_> {
	#[inline]
	fn as_ref(&self) -> &[u8] {
		self
	}
}

impl Drop for Pull<'_> {
	#[inline]
	fn drop(&mut self) {
		if let Some(index) = self.claimed {
			self.adapter.buffers.sync.release(index);
			self.adapter.wakeup.wake();
		}
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		buffer::allocate,
		format::{Channels,SampleEncoding},
		state::SlotState,
	};
	use crossbeam::sync::Parker;
	use pretty_assertions::assert_eq;

	const FORMAT: AudioFormat = AudioFormat::new(SampleEncoding::Pcm8, Channels::Mono, 8_000);

	fn adapter(double_buffered: bool, policy: UnderrunPolicy) -> (TransportAdapter, Parker) {
		let parker = Parker::new();
		let buffers = allocate(&FORMAT, 64, double_buffered, 32).unwrap();
		let adapter = TransportAdapter::new(buffers, FORMAT, policy, parker.unparker().clone());
		(adapter, parker)
	}

	/// Producer side fill + commit, without a session.
	fn commit(adapter: &TransportAdapter, byte: u8) {
		let sync = &adapter.buffers().sync;
		let index = sync.begin_fill().unwrap();
		// SAFETY: slot is `Filling`.
		unsafe { adapter.buffers().slot(index).as_mut_slice() }.fill(byte);
		sync.mark_ready().unwrap();
	}

	#[test]
	fn delivers_then_releases() {
		let (a, _p) = adapter(false, UnderrunPolicy::Stale);
		commit(&a, 0xAA);

		let pull = a.on_pull(64);
		assert_eq!(&*pull, &[0xAA; 64][..]);
		assert_eq!(pull.delivered(), 64);
		assert!(!pull.is_underrun());
		assert!(!a.buffers().sync.ready());
		assert_eq!(a.buffers().sync.slot(0), SlotState::Consumed);

		drop(pull);
		assert_eq!(a.buffers().sync.slot(0), SlotState::Empty);
	}

	#[test]
	fn shorter_and_longer_requests() {
		let (a, _p) = adapter(false, UnderrunPolicy::Stale);
		commit(&a, 1);
		assert_eq!(a.on_pull(10).len(), 10);

		commit(&a, 2);
		let pull = a.on_pull(1000);
		assert_eq!(pull.len(), 64);
		assert_eq!(pull.delivered(), 64);
	}

	#[test]
	fn zero_request() {
		let (a, _p) = adapter(false, UnderrunPolicy::Stale);
		commit(&a, 1);
		let pull = a.on_pull(0);
		assert!(pull.is_empty());
		assert!(!pull.is_underrun());
		drop(pull);
		// Still waiting.
		assert!(a.buffers().sync.ready());
		assert_eq!(a.diagnostics().snapshot(0).pulls, 0);
	}

	#[test]
	fn underrun_before_commit_is_silent() {
		for policy in [UnderrunPolicy::Stale, UnderrunPolicy::Silence] {
			let (a, _p) = adapter(true, policy);
			let pull = a.on_pull(64);
			assert_eq!(&*pull, &[0; 64][..]);
			assert_eq!(pull.delivered(), 0);
			assert!(pull.is_underrun());
		}
	}

	#[test]
	fn stale_replays_last() {
		let (a, _p) = adapter(false, UnderrunPolicy::Stale);
		commit(&a, 7);
		drop(a.on_pull(64));

		let pull = a.on_pull(64);
		assert!(pull.is_underrun());
		assert_eq!(&*pull, &[7; 64][..]);
		drop(pull);

		let d = a.diagnostics().snapshot(0);
		assert_eq!(d.pulls, 2);
		assert_eq!(d.underruns, 1);
		assert_eq!(d.delivered_bytes, 64);
	}

	#[test]
	fn stale_never_reads_a_slot_being_filled() {
		let (a, _p) = adapter(false, UnderrunPolicy::Stale);
		commit(&a, 7);
		drop(a.on_pull(64));

		// Producer starts refilling.
		let index = a.buffers().sync.begin_fill().unwrap();
		// SAFETY: slot is `Filling`.
		unsafe { a.buffers().slot(index).as_mut_slice() }.fill(9);

		let pull = a.on_pull(64);
		assert_eq!(&*pull, &[0; 64][..]);
		assert_eq!(a.buffers().sync.slot(0), SlotState::Filling);
	}

	#[test]
	fn release_wakes_only_a_parked_producer() {
		let (a, parker) = adapter(false, UnderrunPolicy::Stale);
		commit(&a, 1);

		// Nobody parked: the release is atomics only.
		drop(a.on_pull(64));
		assert!(!a.wakeup().is_parked());

		commit(&a, 2);
		a.wakeup().set_parked(true);
		drop(a.on_pull(64));

		// The token from the release ends this right away.
		let now = std::time::Instant::now();
		parker.park_timeout(std::time::Duration::from_secs(30));
		assert!(now.elapsed() < std::time::Duration::from_secs(10));
		a.wakeup().set_parked(false);
	}

	#[test]
	fn silence_policy_ignores_stale() {
		let (a, _p) = adapter(false, UnderrunPolicy::Silence);
		commit(&a, 7);
		drop(a.on_pull(64));
		assert_eq!(&*a.on_pull(64), &[0; 64][..]);
	}
}
