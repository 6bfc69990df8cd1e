//---------------------------------------------------------------------------------------------------- AllocationFailure
/// A buffer or transport handle could not be allocated.
///
/// Anything allocated before the failure has been released.
#[derive(thiserror::Error,Copy,Clone,Debug,PartialEq,Eq)]
pub enum AllocationFailure {
	#[error("buffer size is zero")]
	/// The buffer would be `0` bytes (e.g. `frame_count == 0`).
	ZeroSized,

	#[error("buffer size overflows")]
	/// The buffer size does not fit in memory.
	TooLarge,

	#[error("buffer alignment `{align}` is not a power of two")]
	/// The alignment is invalid.
	InvalidAlignment {
		/// The requested alignment.
		align: usize,
	},

	#[error("out of memory allocating {bytes} bytes")]
	/// The allocator returned nothing.
	OutOfMemory {
		/// How many bytes were requested.
		bytes: usize,
	},

	#[error("no free transport stream handles")]
	/// The transport has no free stream slots.
	Handle,
}
