//! # Text Encoders
//!
//! The `Encoder` seam plus the ONNX sentence model and the hashing fallback.

pub mod encoder;
pub mod hashing;
pub mod manager;
pub mod text;

pub use encoder::{encode_batch, Encoder, FnEncoder};
pub use hashing::HashEncoder;
pub use manager::{load, EncoderKind, Models};
