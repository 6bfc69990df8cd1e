//! Audio formats, transport capabilities and format negotiation.

mod encoding;
pub use encoding::SampleEncoding;

mod channels;
pub use channels::Channels;

mod audio_format;
pub use audio_format::AudioFormat;

mod capability;
pub use capability::{Capability,CapabilityTable,ChannelSupport,RateSupport};

mod negotiate;
pub use negotiate::negotiate;
