//! Counters.

//---------------------------------------------------------------------------------------------------- Use
use std::sync::atomic::{AtomicU64,Ordering};

//---------------------------------------------------------------------------------------------------- Diagnostics
/// A snapshot of a session's counters.
///
/// None of these are errors, they exist to diagnose
/// glitchy playback.
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
	/// How many times the transport pulled (including underruns).
	pub pulls: u64,
	/// Total bytes handed to the transport from committed buffers.
	pub delivered_bytes: u64,
	/// Pulls that found no committed buffer.
	pub underruns: u64,
	/// Producer waits that exceeded the stall threshold.
	pub stalls: u64,
}

//---------------------------------------------------------------------------------------------------- AtomicDiagnostics
/// The consumer side counters, updated from the transport callback.
#[derive(Debug,Default)]
pub(crate) struct AtomicDiagnostics {
	pulls: AtomicU64,
	delivered_bytes: AtomicU64,
	underruns: AtomicU64,
}

impl AtomicDiagnostics {
	#[inline]
	pub(crate) fn delivered(&self, bytes: usize) {
		self.pulls.fetch_add(1, Ordering::Relaxed);
		self.delivered_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
	}

	#[inline]
	pub(crate) fn underrun(&self) {
		self.pulls.fetch_add(1, Ordering::Relaxed);
		self.underruns.fetch_add(1, Ordering::Relaxed);
	}

	/// Snapshot, `stalls` is filled in by the producer.
	pub(crate) fn snapshot(&self, stalls: u64) -> Diagnostics {
		Diagnostics {
			pulls: self.pulls.load(Ordering::Relaxed),
			delivered_bytes: self.delivered_bytes.load(Ordering::Relaxed),
			underruns: self.underruns.load(Ordering::Relaxed),
			stalls,
		}
	}
}
