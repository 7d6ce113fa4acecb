//! Media probing and session management.

pub mod probe;
pub mod session;

pub use probe::{FfprobeProber, MediaProber, MediaProperties};
pub use session::MediaSession;
