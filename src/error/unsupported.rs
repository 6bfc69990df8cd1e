//---------------------------------------------------------------------------------------------------- Use
use crate::format::AudioFormat;

//---------------------------------------------------------------------------------------------------- UnsupportedFormat
/// No encoding the transport accepts can carry the requested format.
///
/// Retrying with the same parameters will fail again.
#[derive(thiserror::Error,Copy,Clone,Debug,PartialEq,Eq)]
#[error("unsupported audio format: {requested}")]
pub struct UnsupportedFormat {
	/// The format that was asked for.
	pub requested: AudioFormat,
}
