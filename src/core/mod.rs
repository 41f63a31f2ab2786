//! Core module: File-backed buffer untuk stream
//!
//! Prinsip desain:
//! - Zero-Copy: Decoder membaca langsung dari mmap region
//! - Borrowing: Lifetime decoder terikat ke mapping

mod mapped;

pub use mapped::{write_stream, MappedFile};
