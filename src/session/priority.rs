//! Real-time priority for the producer thread.

//---------------------------------------------------------------------------------------------------- Use
use crate::{
	format::AudioFormat,
	macros::{debug2,warn2},
};
use audio_thread_priority::{
	demote_current_thread_from_real_time,
	promote_current_thread_to_real_time,
	RtPriorityHandle,
};

//---------------------------------------------------------------------------------------------------- Promotion
/// The thread that called `open()` was promoted to real-time.
///
/// Dropping this does not demote, call [`Promotion::demote`].
pub(super) struct Promotion(RtPriorityHandle);

impl Promotion {
	#[cold]
	#[inline(never)]
	/// Promote the current thread for buffers of `frame_count` frames in `format`.
	///
	/// Failing to promote (e.g. no `RLIMIT_RTPRIO`) is not
	/// fatal, the session plays at normal priority.
	pub(super) fn promote(format: &AudioFormat, frame_count: usize) -> Option<Self> {
		let frames = u32::try_from(frame_count).unwrap_or(u32::MAX);

		match promote_current_thread_to_real_time(frames, format.frame_rate) {
			Ok(handle) => {
				debug2!("Promotion - producer thread is now real-time ({frames} frames @ {}Hz)", format.frame_rate);
				Some(Self(handle))
			},
			Err(e) => {
				warn2!("Promotion - could not promote producer thread: {e}");
				None
			},
		}
	}

	#[cold]
	#[inline(never)]
	/// Restore the thread's previous scheduling.
	pub(super) fn demote(self) {
		match demote_current_thread_from_real_time(self.0) {
			Ok(()) => debug2!("Promotion - producer thread demoted"),
			Err(e) => warn2!("Promotion - could not demote producer thread: {e}"),
		}
	}
}

impl std::fmt::Debug for Promotion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Promotion")
	}
}
