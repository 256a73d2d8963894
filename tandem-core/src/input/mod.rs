//! Controller-side input encoding

pub mod encoder;

pub use encoder::InputEncoder;
