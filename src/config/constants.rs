//! Default values.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Constants
/// Frames per buffer.
pub const DEFAULT_FRAME_COUNT: usize = 2048;

/// Buffer alignment in bytes, a DMA/cache-line boundary.
pub const DEFAULT_ALIGNMENT: usize = 32;

/// Longest the producer sleeps between checks while waiting on the consumer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A producer wait longer than this many buffer
/// durations is reported as a stall.
pub(crate) const STALL_FACTOR: u32 = 4;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn alignment_is_power_of_two() {
		assert!(DEFAULT_ALIGNMENT.is_power_of_two());
	}

	#[test]
	fn frame_count_is_even() {
		// 4-bit encodings pack 2 mono frames per byte.
		assert_eq!(DEFAULT_FRAME_COUNT % 2, 0);
	}
}
