//! Error types untuk boundary stream (check/finish/decode/file I/O).
//!
//! Operasi `get_*`/`put_*` sendiri tidak pernah mengembalikan error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error saat membuka atau memetakan file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream sudah invalid (byte habis, input malformed, atau invalidate manual)
    #[error("stream invalid at byte {cursor} of {length}")]
    Invalid { cursor: usize, length: usize },

    /// Semua field terbaca tapi masih ada byte tersisa
    #[error("{remaining} trailing byte(s) left unread at offset {cursor}")]
    TrailingBytes { cursor: usize, remaining: usize },

    /// Tag versi yang tidak didukung oleh tipe target
    #[error("unsupported version {0}")]
    UnsupportedVersion(u8),
}

pub type Result<T> = std::result::Result<T, StreamError>;
