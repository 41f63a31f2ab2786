//! bdex - Portable Binary Externalization Streams
//!
//! Arsitektur:
//! - Output stream: append-only encoder, tidak bisa gagal
//! - Input stream: zero-copy decoder dengan sticky validity
//! - Wire format: big-endian, fixed-width, tanpa padding
//! - Versioned streaming: tag versi 1 byte untuk value type
//!
//! ```
//! use bdex::protocol::{ByteInStream, ByteOutStream};
//!
//! let mut out = ByteOutStream::new();
//! out.put_length(128).put_i8(-2);
//!
//! let mut input = ByteInStream::new(out.data());
//! assert_eq!(input.get_length(), Some(128));
//! assert_eq!(input.get_i8(), Some(-2));
//! assert!(input.is_valid() && input.is_empty());
//! ```

pub mod core;
pub mod error;
pub mod protocol;
pub mod streamable;

pub use error::{Result, StreamError};
pub use protocol::{ByteInStream, ByteOutStream};
pub use streamable::Streamable;
