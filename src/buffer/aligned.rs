//! Aligned, zero-filled byte buffers.

//---------------------------------------------------------------------------------------------------- Use
use crate::error::AllocationFailure;
use std::{
	alloc::Layout,
	ptr::NonNull,
};
use strum::{AsRefStr,Display,IntoStaticStr};

//---------------------------------------------------------------------------------------------------- Role
/// Which buffer this is within a [`BufferSet`](crate::buffer::BufferSet).
#[derive(Copy,Clone,Debug,Hash,PartialEq,Eq)]
#[derive(AsRefStr,Display,IntoStaticStr)]
pub(crate) enum Role {
	/// First (or only) buffer.
	A,
	/// Second buffer, when double-buffered.
	B,
	/// Never written, handed out on underrun.
	Silence,
}

//---------------------------------------------------------------------------------------------------- AlignedBuffer
/// A fixed-length heap region with a guaranteed alignment.
///
/// The memory is zeroed on creation, which is
/// silence for every [`SampleEncoding`](crate::format::SampleEncoding).
///
/// This type hands out slices through `unsafe` functions,
/// the caller proves exclusive/shared access through the
/// slot state machine (see `state/sync_state.rs`).
pub(crate) struct AlignedBuffer {
	ptr: NonNull<u8>,
	layout: Layout,
	role: Role,
}

// SAFETY: the buffer is plain bytes, access is
// coordinated by `SyncState` (one writer xor readers).
unsafe impl Send for AlignedBuffer {}
// SAFETY: see above.
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
	#[cold]
	#[inline(never)]
	/// Allocate `len` zeroed bytes aligned to `align`.
	pub(crate) fn new(len: usize, align: usize, role: Role) -> Result<Self, AllocationFailure> {
		if len == 0 {
			return Err(AllocationFailure::ZeroSized);
		}

		let Ok(layout) = Layout::from_size_align(len, align) else {
			return if align.is_power_of_two() {
				Err(AllocationFailure::TooLarge)
			} else {
				Err(AllocationFailure::InvalidAlignment { align })
			};
		};

		// SAFETY: `layout` is non-zero sized.
		let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
		let Some(ptr) = NonNull::new(ptr) else {
			return Err(AllocationFailure::OutOfMemory { bytes: len });
		};

		Ok(Self { ptr, layout, role })
	}

	#[inline]
	pub(crate) const fn len(&self) -> usize {
		self.layout.size()
	}

	#[cfg(test)]
	pub(crate) const fn role(&self) -> Role {
		self.role
	}

	#[cfg(test)]
	pub(crate) fn as_ptr(&self) -> *const u8 {
		self.ptr.as_ptr()
	}

	#[inline]
	/// # Safety
	/// Nobody may hold a slice from `as_mut_slice()` for as long as this lives.
	pub(crate) unsafe fn as_slice(&self) -> &[u8] {
		std::slice::from_raw_parts(self.ptr.as_ptr(), self.len())
	}

	#[inline]
	#[allow(clippy::mut_from_ref)]
	/// # Safety
	/// The caller must be the only one accessing
	/// this buffer for as long as the slice lives.
	pub(crate) unsafe fn as_mut_slice(&self) -> &mut [u8] {
		std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len())
	}
}

impl Drop for AlignedBuffer {
	fn drop(&mut self) {
		// SAFETY: allocated in `new()` with this exact layout.
		unsafe { std::alloc::dealloc(self.ptr.as_ptr(), self.layout) };
	}
}

impl std::fmt::Debug for AlignedBuffer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AlignedBuffer")
			.field("ptr", &self.ptr)
			.field("len", &self.len())
			.field("align", &self.layout.align())
			.field("role", &self.role)
			.finish()
	}
}
