//! Per-buffer slot state.

//---------------------------------------------------------------------------------------------------- Use
use std::sync::atomic::{AtomicU8,Ordering};
use strum::{AsRefStr,Display,IntoStaticStr};

//---------------------------------------------------------------------------------------------------- SlotState
/// Where a single buffer slot is in its cycle.
///
/// ```text
/// Empty -> Filling -> Ready -> Consumed -> Empty
///          (producer)          (consumer)
/// ```
///
/// A `Consumed` slot is one the transport is reading
/// right now, it returns to `Empty` once the pull is dropped.
/// The consumer can also claim an `Empty` slot directly
/// to replay it on underrun.
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[derive(AsRefStr,Display,IntoStaticStr)]
#[repr(u8)]
pub(crate) enum SlotState {
	/// Nobody is touching it.
	Empty = 0,
	/// The producer holds it mutably.
	Filling = 1,
	/// Completely written, waiting for a pull.
	Ready = 2,
	/// The consumer holds it immutably.
	Consumed = 3,
}

impl SlotState {
	const fn from_u8(u: u8) -> Self {
		match u {
			0 => Self::Empty,
			1 => Self::Filling,
			2 => Self::Ready,
			_ => Self::Consumed,
		}
	}
}

//---------------------------------------------------------------------------------------------------- AtomicSlot
/// A [`SlotState`] readable and writable from both sides as a single word.
pub(crate) struct AtomicSlot(AtomicU8);

impl AtomicSlot {
	/// A fresh, empty slot.
	#[allow(clippy::declare_interior_mutable_const)]
	pub(crate) const EMPTY: Self = Self(AtomicU8::new(SlotState::Empty as u8));

	#[inline]
	pub(crate) fn load(&self, ordering: Ordering) -> SlotState {
		SlotState::from_u8(self.0.load(ordering))
	}

	#[inline]
	pub(crate) fn store(&self, state: SlotState, ordering: Ordering) {
		self.0.store(state as u8, ordering);
	}

	#[inline]
	pub(crate) fn swap(&self, state: SlotState, ordering: Ordering) -> SlotState {
		SlotState::from_u8(self.0.swap(state as u8, ordering))
	}

	#[inline]
	/// Transition `current -> new`, returns the actual state on failure.
	pub(crate) fn transition(
		&self,
		current: SlotState,
		new: SlotState,
		success: Ordering,
	) -> Result<(), SlotState> {
		self.0
			.compare_exchange(current as u8, new as u8, success, Ordering::Acquire)
			.map(|_| ())
			.map_err(SlotState::from_u8)
	}
}

impl std::fmt::Debug for AtomicSlot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("AtomicSlot")
			.field(&self.load(Ordering::Relaxed))
			.finish()
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
#[allow(clippy::borrow_interior_mutable_const)]
mod tests {
	use super::*;

	#[test]
	fn u8_mapping() {
		for state in [SlotState::Empty, SlotState::Filling, SlotState::Ready, SlotState::Consumed] {
			assert_eq!(SlotState::from_u8(state as u8), state);
		}
	}

	#[test]
	fn transition() {
		let slot = AtomicSlot::EMPTY;
		assert_eq!(slot.transition(SlotState::Ready, SlotState::Consumed, Ordering::AcqRel), Err(SlotState::Empty));
		assert_eq!(slot.transition(SlotState::Empty, SlotState::Filling, Ordering::AcqRel), Ok(()));
		assert_eq!(slot.load(Ordering::Relaxed), SlotState::Filling);
		assert_eq!(slot.swap(SlotState::Ready, Ordering::Release), SlotState::Filling);
	}
}
