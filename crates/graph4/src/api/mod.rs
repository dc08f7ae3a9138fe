//! High-level encoder API.

mod builder;
mod error;

pub use builder::Graph4Encoder;
pub use error::{EncodeError, ParseOptionError};
