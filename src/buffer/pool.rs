//! Buffer allocation.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	buffer::{AlignedBuffer,Role},
	error::AllocationFailure,
	format::AudioFormat,
	macros::debug2,
	state::SyncState,
};

//---------------------------------------------------------------------------------------------------- BufferSet
/// The 1 or 2 sample buffers of a session,
/// plus the state that coordinates access to them.
///
/// The extra `silence` buffer is never written,
/// it backs underruns that cannot replay a stale buffer.
#[derive(Debug)]
pub(crate) struct BufferSet {
	slots: Vec<AlignedBuffer>,
	silence: AlignedBuffer,
	pub(crate) sync: SyncState,
}

impl BufferSet {
	#[inline]
	/// Size of every buffer in bytes.
	pub(crate) fn buffer_bytes(&self) -> usize {
		self.silence.len()
	}

	#[cfg(test)]
	/// `1` or `2`.
	pub(crate) fn len(&self) -> usize {
		self.slots.len()
	}

	#[inline]
	pub(crate) fn slot(&self, index: usize) -> &AlignedBuffer {
		&self.slots[index]
	}

	#[inline]
	pub(crate) const fn silence(&self) -> &AlignedBuffer {
		&self.silence
	}
}

//---------------------------------------------------------------------------------------------------- Allocate
#[cold]
#[inline(never)]
/// Allocate the buffers for `frame_count` frames of `format`.
///
/// Every buffer is the same size, aligned to
/// `alignment` bytes and zero-filled (silence).
///
/// If any allocation fails, those that succeeded
/// are dropped (freed) before returning.
pub(crate) fn allocate(
	format: &AudioFormat,
	frame_count: usize,
	double_buffered: bool,
	alignment: usize,
) -> Result<BufferSet, AllocationFailure> {
	let Some(bytes) = format.buffer_bytes(frame_count) else {
		return Err(AllocationFailure::TooLarge);
	};

	let roles: &[Role] = if double_buffered { &[Role::A, Role::B] } else { &[Role::A] };

	let mut slots = Vec::with_capacity(roles.len());
	for role in roles {
		slots.push(AlignedBuffer::new(bytes, alignment, *role)?);
	}
	let silence = AlignedBuffer::new(bytes, alignment, Role::Silence)?;

	debug2!("BufferSet - allocated {} x {bytes} bytes, align: {alignment}", slots.len());

	Ok(BufferSet {
		slots,
		silence,
		sync: SyncState::new(double_buffered),
	})
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::format::{Channels,SampleEncoding};

	const FORMAT: AudioFormat = AudioFormat::new(SampleEncoding::Pcm16, Channels::Stereo, 44_100);

	#[test]
	fn single() {
		let set = allocate(&FORMAT, 256, false, 32).unwrap();
		assert_eq!(set.len(), 1);
		assert_eq!(set.sync.len(), 1);
		assert_eq!(set.buffer_bytes(), 1024);
		assert_eq!(set.slot(0).role(), Role::A);
		assert_eq!(set.silence().role(), Role::Silence);
	}

	#[test]
	fn double() {
		let set = allocate(&FORMAT, 256, true, 64).unwrap();
		assert_eq!(set.len(), 2);
		assert_eq!(set.sync.len(), 2);
		assert_eq!(set.slot(1).role(), Role::B);
		for i in 0..2 {
			let slot = set.slot(i);
			assert_eq!(slot.len(), 1024);
			assert_eq!(slot.as_ptr() as usize % 64, 0);
			// SAFETY: nobody else has access.
			assert!(unsafe { slot.as_slice() }.iter().all(|b| *b == 0));
		}
	}

	#[test]
	fn adpcm_rounds_up() {
		let format = AudioFormat::new(SampleEncoding::Adpcm4, Channels::Mono, 22_050);
		assert_eq!(allocate(&format, 5, false, 32).unwrap().buffer_bytes(), 3);
	}

	#[test]
	fn failures() {
		assert_eq!(allocate(&FORMAT, 0, true, 32).unwrap_err(), AllocationFailure::ZeroSized);
		assert_eq!(
			allocate(&FORMAT, 256, true, 24).unwrap_err(),
			AllocationFailure::InvalidAlignment { align: 24 },
		);
		assert_eq!(allocate(&FORMAT, usize::MAX, true, 32).unwrap_err(), AllocationFailure::TooLarge);
	}
}
