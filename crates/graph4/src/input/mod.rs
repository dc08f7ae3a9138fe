//! Borrowed source pixels and the transparency rule applied to them.

mod source;
mod transparency;

pub use source::{ChannelLayout, SourceImage};
pub use transparency::Transparency;
