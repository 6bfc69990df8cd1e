//! Sample buffer allocation.

mod aligned;
pub(crate) use aligned::{AlignedBuffer,Role};

mod pool;
pub(crate) use pool::{allocate,BufferSet};

mod upmix;
pub(crate) use upmix::mono_to_stereo;
