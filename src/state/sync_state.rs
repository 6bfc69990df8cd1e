//! The producer/consumer handshake.
//!
//! Each buffer slot has an [`AtomicSlot`] and the producer keeps an
//! `active` index of the slot it fills next. A slot being `Ready`
//! is the `ready` flag: only the producer raises it (`Filling -> Ready`)
//! and only the consumer lowers it (`Ready -> Consumed`).
//!
//! No locks, every access is a single atomic word.
//!
//! INVARIANT: at most 1 slot is `Ready` at any instant.
//! The producer only raises a flag after the previous
//! one was lowered (back-pressure is enforced by the caller,
//! see `other_ready()`).

//---------------------------------------------------------------------------------------------------- Use
use crate::state::{AtomicSlot,SlotState};
use std::sync::atomic::{AtomicUsize,Ordering};

//---------------------------------------------------------------------------------------------------- SyncState
#[derive(Debug)]
pub(crate) struct SyncState {
	/// Only `slots[..len]` is used.
	slots: [AtomicSlot; 2],
	/// `1` or `2`.
	len: usize,
	/// The slot the producer fills next.
	///
	/// Written by the producer only, after the slot it
	/// leaves has been marked `Ready`.
	active: AtomicUsize,
	/// The slot the consumer claimed last.
	///
	/// Written by the consumer only.
	last: AtomicUsize,
}

impl SyncState {
	pub(crate) const fn new(double_buffered: bool) -> Self {
		Self {
			slots: [AtomicSlot::EMPTY, AtomicSlot::EMPTY],
			len: if double_buffered { 2 } else { 1 },
			active: AtomicUsize::new(0),
			last: AtomicUsize::new(0),
		}
	}

	#[cfg(test)]
	pub(crate) const fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub(crate) fn active_index(&self) -> usize {
		self.active.load(Ordering::Acquire)
	}

	#[inline]
	pub(crate) fn slot(&self, index: usize) -> SlotState {
		self.slots[index].load(Ordering::Acquire)
	}

	/// Is any slot waiting to be pulled?
	pub(crate) fn ready(&self) -> bool {
		self.slots[..self.len]
			.iter()
			.any(|s| s.load(Ordering::Acquire) == SlotState::Ready)
	}

	//------------------------------------------------------------------ Producer
	/// Start (or continue) filling the active slot.
	///
	/// Returns the slot index, or the state that
	/// prevents the producer from writing to it.
	pub(crate) fn begin_fill(&self) -> Result<usize, SlotState> {
		let index = self.active_index();
		match self.slots[index].transition(SlotState::Empty, SlotState::Filling, Ordering::Acquire) {
			Ok(()) | Err(SlotState::Filling) => Ok(index),
			Err(state) => Err(state),
		}
	}

	/// Can the producer start writing the active slot without waiting?
	pub(crate) fn active_fillable(&self) -> bool {
		matches!(self.slot(self.active_index()), SlotState::Empty | SlotState::Filling)
	}

	/// Is the slot that was committed before the active one still `Ready`?
	///
	/// Always `false` when single-buffered, the only
	/// slot is gated by `begin_fill()` instead.
	pub(crate) fn other_ready(&self) -> bool {
		if self.len == 1 {
			return false;
		}
		self.slots[self.active_index() ^ 1].load(Ordering::Acquire) == SlotState::Ready
	}

	/// `Filling -> Ready` for the active slot, then flip `active`.
	///
	/// Returns the committed slot index, or the
	/// state it was in if it was not being filled.
	pub(crate) fn mark_ready(&self) -> Result<usize, SlotState> {
		let index = self.active_index();
		self.slots[index].transition(SlotState::Filling, SlotState::Ready, Ordering::Release)?;

		if self.len == 2 {
			self.active.store(index ^ 1, Ordering::Release);
		}

		Ok(index)
	}

	//------------------------------------------------------------------ Consumer
	/// `Ready -> Consumed`, returns the claimed slot.
	pub(crate) fn claim(&self) -> Option<usize> {
		for index in 0..self.len {
			if self.slots[index].transition(SlotState::Ready, SlotState::Consumed, Ordering::Acquire).is_ok() {
				self.last.store(index, Ordering::Relaxed);
				return Some(index);
			}
		}
		None
	}

	/// `Empty -> Consumed` on the last claimed slot.
	///
	/// Fails if the producer is refilling it.
	pub(crate) fn claim_stale(&self) -> Option<usize> {
		let index = self.last.load(Ordering::Relaxed);
		self.slots[index]
			.transition(SlotState::Empty, SlotState::Consumed, Ordering::Acquire)
			.ok()
			.map(|()| index)
	}

	/// `Consumed -> Empty`.
	pub(crate) fn release(&self, index: usize) {
		let previous = self.slots[index].swap(SlotState::Empty, Ordering::Release);
		debug_assert_eq!(previous, SlotState::Consumed);
	}

	//------------------------------------------------------------------ Close
	/// Force every slot back to `Empty`.
	///
	/// INVARIANT: only valid while the transport cannot pull
	/// (never started, stopped, or destroyed).
	pub(crate) fn reset(&self) {
		for slot in &self.slots {
			slot.store(SlotState::Empty, Ordering::Release);
		}
		self.active.store(0, Ordering::Release);
		self.last.store(0, Ordering::Relaxed);
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn states(s: &SyncState) -> Vec<SlotState> {
		(0..s.len()).map(|i| s.slot(i)).collect()
	}

	#[test]
	fn single_cycle() {
		let s = SyncState::new(false);
		assert_eq!(s.len(), 1);
		assert!(!s.ready());

		assert_eq!(s.begin_fill(), Ok(0));
		// Re-entering a fill is fine.
		assert_eq!(s.begin_fill(), Ok(0));
		assert_eq!(s.claim(), None);

		assert_eq!(s.mark_ready(), Ok(0));
		assert_eq!(s.active_index(), 0);
		assert!(s.ready());
		assert_eq!(s.begin_fill(), Err(SlotState::Ready));

		assert_eq!(s.claim(), Some(0));
		assert!(!s.ready());
		assert_eq!(s.begin_fill(), Err(SlotState::Consumed));

		s.release(0);
		assert_eq!(states(&s), vec![SlotState::Empty]);
		assert_eq!(s.begin_fill(), Ok(0));
	}

	#[test]
	fn double_cycle() {
		let s = SyncState::new(true);
		assert_eq!(s.begin_fill(), Ok(0));
		assert_eq!(s.mark_ready(), Ok(0));
		assert_eq!(s.active_index(), 1);

		// B can be filled while A waits.
		assert_eq!(s.begin_fill(), Ok(1));
		assert_eq!(states(&s), vec![SlotState::Ready, SlotState::Filling]);
		assert!(s.other_ready());

		assert_eq!(s.claim(), Some(0));
		assert!(!s.other_ready());
		assert_eq!(s.mark_ready(), Ok(1));
		assert_eq!(s.active_index(), 0);
		assert_eq!(states(&s), vec![SlotState::Consumed, SlotState::Ready]);

		// A is still being read.
		assert_eq!(s.begin_fill(), Err(SlotState::Consumed));
		s.release(0);
		assert_eq!(s.begin_fill(), Ok(0));
	}

	#[test]
	fn mark_ready_requires_fill() {
		let s = SyncState::new(true);
		assert_eq!(s.mark_ready(), Err(SlotState::Empty));
		assert_eq!(s.active_index(), 0);
	}

	#[test]
	fn stale_claims() {
		let s = SyncState::new(false);
		// Never filled, but empty: stale is allowed (zeroed memory).
		assert_eq!(s.claim_stale(), Some(0));
		s.release(0);

		assert_eq!(s.begin_fill(), Ok(0));
		assert_eq!(s.claim_stale(), None);
		assert_eq!(s.mark_ready(), Ok(0));
		assert_eq!(s.claim_stale(), None);
	}

	#[test]
	fn reset() {
		let s = SyncState::new(true);
		s.begin_fill().unwrap();
		s.mark_ready().unwrap();
		s.begin_fill().unwrap();
		s.reset();
		assert_eq!(states(&s), vec![SlotState::Empty, SlotState::Empty]);
		assert_eq!(s.active_index(), 0);
		assert!(!s.ready());
	}
}
