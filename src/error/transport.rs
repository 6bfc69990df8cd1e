//! Transport errors.

//---------------------------------------------------------------------------------------------------- TransportError
/// Error that occurs when creating, registering
/// or starting a stream on the audio hardware.
///
/// Transports will generally have the same
/// errors, so instead of being generic per backend,
/// each one will just conform to this enum.
#[derive(thiserror::Error,Clone,Debug,PartialEq,Eq)]
pub enum TransportError {
	#[error("audio hardware/server is unavailable")]
	/// The audio hardware/server is unavailable.
	DeviceUnavailable,

	#[error("audio format is invalid or unsupported by the transport")]
	/// The format the stream was set up with cannot be played.
	InvalidFormat,

	#[error("stream handle is invalid")]
	/// The handle was never created or was already destroyed.
	InvalidHandle,

	#[error("no free stream handles")]
	/// Every stream slot is in use.
	HandlesExhausted,

	#[error("audio stream was closed")]
	/// The stream was closed underneath us.
	StreamClosed,

	#[error("unknown error: {0}")]
	/// An unknown or very specific error occurred.
	///
	/// The `str` will contain more information.
	Unknown(std::borrow::Cow<'static, str>),
}
