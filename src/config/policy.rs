//---------------------------------------------------------------------------------------------------- Use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- UnderrunPolicy
/// What the transport is handed when it pulls
/// before the producer has a buffer ready.
///
/// Either way, the pull reports `0` delivered bytes
/// and the underrun counter is incremented.
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum UnderrunPolicy {
	#[default]
	/// Replay the last buffer the transport consumed.
	///
	/// If that buffer is being refilled at that
	/// moment, silence is returned instead.
	Stale,
	/// Always return silence.
	Silence,
}

//---------------------------------------------------------------------------------------------------- WaitStrategy
/// How the producer blocks while waiting on the consumer.
#[derive(Copy,Clone,Debug,Default,Hash,PartialEq,Eq,PartialOrd,Ord)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum WaitStrategy {
	#[default]
	/// Park the thread, the consumer wakes it up
	/// as soon as it releases a buffer.
	///
	/// `poll_interval` still bounds each park.
	Park,
	/// Sleep `poll_interval`, check, repeat.
	///
	/// For environments where the consumer
	/// cannot signal the producer at all.
	Poll,
}
