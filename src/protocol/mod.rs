//! Protocol Layer: Portable Binary Externalization
//!
//! Prinsip desain:
//! - Big-endian: Layout identik di semua arsitektur host
//! - Fixed-width: Tidak ada tag tipe, tidak ada padding antar field
//! - Sticky validity: Decoder tidak pernah panic pada input malformed

mod decoder;
mod dump;
mod encoder;
pub mod format;

pub use decoder::ByteInStream;
pub use dump::{ByteDump, DumpStyle};
pub use encoder::ByteOutStream;
