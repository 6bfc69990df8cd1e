//---------------------------------------------------------------------------------------------------- Use
use crate::error::{AllocationFailure,TransportError,UnsupportedFormat};

//---------------------------------------------------------------------------------------------------- OpenError
#[allow(unused_imports)] // docs
use crate::Session;

/// Every way [`Session::open`] can fail.
///
/// When this is returned, the session is still closed and
/// nothing it allocated along the way is still alive.
/// The caller may retry with different parameters.
#[derive(thiserror::Error,Clone,Debug,PartialEq,Eq)]
pub enum OpenError {
	#[error("{0}")]
	/// Format negotiation failed.
	UnsupportedFormat(#[from] UnsupportedFormat),

	#[error("allocation failure: {0}")]
	/// Buffer or stream handle allocation failed.
	Allocation(#[from] AllocationFailure),

	#[error("transport init failure: {0}")]
	/// The hardware stream could not be created or set up.
	TransportInit(TransportError),
}

impl From<TransportError> for OpenError {
	fn from(error: TransportError) -> Self {
		match error {
			TransportError::HandlesExhausted => Self::Allocation(AllocationFailure::Handle),
			error => Self::TransportInit(error),
		}
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exhausted_handles_are_allocation_failures() {
		assert_eq!(
			OpenError::from(TransportError::HandlesExhausted),
			OpenError::Allocation(AllocationFailure::Handle),
		);
		assert_eq!(
			OpenError::from(TransportError::DeviceUnavailable),
			OpenError::TransportInit(TransportError::DeviceUnavailable),
		);
	}
}
