//! Errors that can occur.
//!
//! Only [`Session::open`](crate::Session::open) (and starting
//! the transport) can fail, everything after that is either
//! absorbed (underruns) or a programmer error (panics).

mod unsupported;
pub use unsupported::UnsupportedFormat;

mod allocation;
pub use allocation::AllocationFailure;

mod transport;
pub use transport::TransportError;

mod open;
pub use open::OpenError;
