//! Transport constants.

//---------------------------------------------------------------------------------------------------- Constants
/// How many streams [`DummyTransport`](crate::transport::DummyTransport)
/// can have open at once.
pub const MAX_STREAMS: usize = 4;

/// Name of the [`DummyTransport`](crate::transport::DummyTransport) pull thread.
pub(crate) const DUMMY_THREAD_NAME: &str = "pullbridge::DummyTransport";
