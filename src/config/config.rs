//! Session configuration.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;
use crate::{
	config::{
		Gain,UnderrunPolicy,WaitStrategy,
		DEFAULT_ALIGNMENT,DEFAULT_FRAME_COUNT,DEFAULT_POLL_INTERVAL,
	},
	format::SampleEncoding,
};

#[allow(unused_imports)] // docs
use crate::Session;

//---------------------------------------------------------------------------------------------------- Config
/// Configuration for a [`Session`].
///
/// This is read once, during [`Session::open`], by the format
/// negotiation and buffer allocation steps. Changing it
/// after a session is opened has no effect until the next `open`.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
	/// Force this encoding instead of the one passed to [`Session::open`].
	///
	/// e.g. `Some(SampleEncoding::Adpcm4)` to ask for 4-bit
	/// companded audio even if the mixer requests linear PCM.
	///
	/// Negotiation still falls back if the transport does not support it.
	pub encoding: Option<SampleEncoding>,

	/// Use two buffers (fill one while the other plays)
	/// instead of a single shared one.
	pub double_buffered: bool,

	/// Output gain handed to the transport.
	pub gain: Gain,

	/// How many frames each buffer holds.
	///
	/// Must be non-zero.
	pub frame_count: usize,

	/// Byte alignment of each buffer.
	///
	/// Must be a power of two.
	pub alignment: usize,

	/// What to hand the transport when it pulls too early.
	pub underrun_policy: UnderrunPolicy,

	/// How the producer blocks on back-pressure.
	pub wait_strategy: WaitStrategy,

	/// Upper bound on a single sleep/park while waiting.
	pub poll_interval: Duration,

	/// Waiting longer than this is logged and counted as a stall.
	///
	/// Waits are never aborted, the transport is expected
	/// to drain eventually.
	///
	/// `None` derives a bound from the playback time of one buffer.
	pub stall_threshold: Option<Duration>,

	/// Promote the thread calling [`Session::open`] to real-time
	/// priority until [`Session::close`].
	///
	/// That thread should be the one producing audio.
	/// If the OS refuses, a warning is logged and the
	/// session plays at normal priority.
	pub realtime_priority: bool,
}

impl Config {
	/// A reasonable default [`Config`].
	///
	/// ```rust
	/// # use pullbridge::config::*;
	/// # use std::time::Duration;
	/// assert_eq!(Config::DEFAULT, Config {
	///     encoding:        None,
	///     double_buffered: true,
	///     gain:            Gain::MAX,
	///     frame_count:     2048,
	///     alignment:       32,
	///     underrun_policy: UnderrunPolicy::Stale,
	///     wait_strategy:   WaitStrategy::Park,
	///     poll_interval:   Duration::from_millis(5),
	///     stall_threshold: None,
	///     realtime_priority: false,
	/// });
	/// ```
	pub const DEFAULT: Self = Self {
		encoding:        None,
		double_buffered: true,
		gain:            Gain::DEFAULT,
		frame_count:     DEFAULT_FRAME_COUNT,
		alignment:       DEFAULT_ALIGNMENT,
		underrun_policy: UnderrunPolicy::Stale,
		wait_strategy:   WaitStrategy::Park,
		poll_interval:   DEFAULT_POLL_INTERVAL,
		stall_threshold: None,
		realtime_priority: false,
	};

	/// [`Config::DEFAULT`], single-buffered.
	pub const SINGLE_BUFFERED: Self = Self {
		double_buffered: false,
		..Self::DEFAULT
	};
}

impl Default for Config {
	fn default() -> Self {
		Self::DEFAULT
	}
}
