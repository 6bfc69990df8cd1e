//! Push-to-pull audio output bridge.
//!
//! A mixer produces audio when it wants to (push), audio hardware
//! consumes it on its own clock (pull). [`Session`] sits in between:
//!
//! - [`Session::open`] negotiates a format the [`Transport`](transport::Transport)
//!   can play, allocates 1 or 2 aligned buffers and registers
//!   a [`TransportAdapter`](transport::TransportAdapter) with the transport
//! - the mixer fills buffers with [`Session::get_buffer`] and hands
//!   them over with [`Session::commit`], which blocks while the
//!   hardware is still behind (back-pressure)
//! - the transport calls [`TransportAdapter::on_pull`](transport::TransportAdapter::on_pull)
//!   from whatever context it likes, which never blocks and never allocates
//! - [`Session::close`] stops the transport before freeing anything
//!
//! When the hardware pulls before anything was committed (underrun)
//! it gets the last buffer again or silence, never garbage.
//!
//! ```rust
//! use pullbridge::{Session,config::Config,format::AudioFormat,transport::DummyTransport};
//!
//! let mut session = Session::new(DummyTransport::default(), Config::DEFAULT);
//! let format = session.open(AudioFormat::DEFAULT).unwrap();
//!
//! for _ in 0..4 {
//!     let buffer = session.get_buffer();
//!     buffer.fill(0); // mix here
//!     session.commit().unwrap();
//! }
//!
//! session.wait();
//! session.close();
//! ```

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
    missing_docs,
)]

#![forbid(
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    exported_private_dependencies,
    for_loops_over_fallibles,
    large_assignments,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
	unreachable_pub,
    single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
mod session;
pub use session::{Session,PlaybackState};

mod state;
pub use state::Diagnostics;

pub mod config;
pub mod error;
pub mod format;
pub mod transport;

//---------------------------------------------------------------------------------------------------- Private Usage
mod buffer;
mod macros;

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests;
