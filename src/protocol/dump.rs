//! Diagnostic dump untuk isi buffer stream
//!
//! Format: satu baris per 8 byte, diawali newline, offset hex 4 digit dan tab.
//! Hanya untuk debugging, bukan bagian dari wire format.

use std::fmt;

const BYTES_PER_ROW: usize = 8;

/// Representasi per byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpStyle {
    /// 8 digit biner, misal `00000011`
    #[default]
    Binary,
    /// 2 digit hex, misal `03`
    Hex,
}

/// Wrapper `Display` untuk slice byte
#[derive(Debug, Clone, Copy)]
pub struct ByteDump<'a> {
    bytes: &'a [u8],
    style: DumpStyle,
}

impl<'a> ByteDump<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            style: DumpStyle::Binary,
        }
    }

    pub fn with_style(mut self, style: DumpStyle) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for ByteDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.bytes.chunks(BYTES_PER_ROW).enumerate() {
            write!(f, "\n{:04x}\t", row * BYTES_PER_ROW)?;
            for (i, byte) in chunk.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                match self.style {
                    DumpStyle::Binary => write!(f, "{:08b}", byte)?,
                    DumpStyle::Hex => write!(f, "{:02x}", byte)?,
                }
            }
        }
        Ok(())
    }
}
