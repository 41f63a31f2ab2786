//! Input stream: zero-copy big-endian decoder
//!
//! Decoder hanya meminjam buffer milik caller (`&'a [u8]`), tidak pernah
//! meng-copy atau memodifikasinya.
//!
//! State machine:
//! - Valid-NonEmpty → Valid-Empty: `get_*` sukses sampai cursor == length
//! - Valid-* → Invalid: `get_*` tanpa cukup byte, atau `invalidate()`
//! - Invalid bersifat sticky: semua `get_*` berikutnya no-op, cursor diam

use std::fmt;

use super::dump::ByteDump;
use super::format::{
    read_be, sign_extend, LONG_LENGTH_FLAG, LONG_LENGTH_SIZE, SIZEOF_FLOAT32, SIZEOF_FLOAT64,
    SIZEOF_INT16, SIZEOF_INT24, SIZEOF_INT32, SIZEOF_INT40, SIZEOF_INT48, SIZEOF_INT56,
    SIZEOF_INT64, SIZEOF_INT8,
};
use crate::error::{Result, StreamError};

/// Generate `get_x` / `get_array_x` untuk integer signed.
macro_rules! get_signed {
    ($(#[$doc:meta])* $get:ident, $get_array:ident, $carrier:ty, $width:expr) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $get(&mut self) -> Option<$carrier> {
            let bytes = self.take($width)?;
            Some(sign_extend(read_be(bytes), $width) as $carrier)
        }

        /// Isi seluruh `values`; jumlah elemen = `values.len()`.
        #[inline]
        pub fn $get_array(&mut self, values: &mut [$carrier]) -> Option<()> {
            let bytes = self.take_array(values.len(), $width)?;
            for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact($width)) {
                *value = sign_extend(read_be(chunk), $width) as $carrier;
            }
            Some(())
        }
    };
}

/// Generate `get_x` / `get_array_x` untuk integer unsigned.
macro_rules! get_unsigned {
    ($(#[$doc:meta])* $get:ident, $get_array:ident, $carrier:ty, $width:expr) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $get(&mut self) -> Option<$carrier> {
            let bytes = self.take($width)?;
            Some(read_be(bytes) as $carrier)
        }

        /// Isi seluruh `values`; jumlah elemen = `values.len()`.
        #[inline]
        pub fn $get_array(&mut self, values: &mut [$carrier]) -> Option<()> {
            let bytes = self.take_array(values.len(), $width)?;
            for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact($width)) {
                *value = read_be(chunk) as $carrier;
            }
            Some(())
        }
    };
}

/// Non-owning input stream dengan cursor dan validity flag
///
/// Setiap `get_*` mengembalikan `None` tepat ketika stream sudah invalid
/// atau menjadi invalid karena byte tidak cukup. Cursor tidak pernah maju
/// melewati titik kegagalan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteInStream<'a> {
    buffer: &'a [u8],
    cursor: usize,
    valid: bool,
}

impl Default for ByteInStream<'_> {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl<'a> ByteInStream<'a> {
    /// Membuat decoder dari buffer
    #[inline(always)]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            valid: true,
        }
    }

    /// Buffer asli milik caller (bukan copy)
    #[inline(always)]
    pub fn data(&self) -> &'a [u8] {
        self.buffer
    }

    #[inline(always)]
    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    /// Offset byte berikutnya yang akan dibaca
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Remaining bytes
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cursor == self.buffer.len()
    }

    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Paksa stream menjadi invalid secara permanen
    pub fn invalidate(&mut self) {
        if self.valid {
            tracing::trace!(cursor = self.cursor, length = self.length(), "stream invalidated");
        }
        self.valid = false;
    }

    /// `Err(StreamError::Invalid)` jika stream sudah invalid
    pub fn check(&self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(StreamError::Invalid {
                cursor: self.cursor,
                length: self.length(),
            })
        }
    }

    /// Seperti `check`, tapi juga menuntut seluruh buffer sudah dibaca
    pub fn finish(&self) -> Result<()> {
        self.check()?;
        if !self.is_empty() {
            return Err(StreamError::TrailingBytes {
                cursor: self.cursor,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Ambil `count` byte dan majukan cursor, atau invalidate tanpa
    /// memajukan cursor.
    #[inline(always)]
    fn take(&mut self, count: usize) -> Option<&'a [u8]> {
        if !self.valid {
            return None;
        }
        if count > self.remaining() {
            self.exhausted(count);
            return None;
        }
        let buffer = self.buffer;
        let start = self.cursor;
        self.cursor += count;
        Some(&buffer[start..self.cursor])
    }

    #[inline(always)]
    fn take_array(&mut self, count: usize, width: usize) -> Option<&'a [u8]> {
        match count.checked_mul(width) {
            Some(total) => self.take(total),
            None => {
                if self.valid {
                    self.exhausted(usize::MAX);
                }
                None
            }
        }
    }

    #[cold]
    fn exhausted(&mut self, needed: usize) {
        tracing::debug!(
            cursor = self.cursor,
            length = self.length(),
            needed,
            "byte stream exhausted, marking invalid"
        );
        self.valid = false;
    }

    get_signed!(
        /// 1 byte, sign-extended
        get_i8, get_array_i8, i8, SIZEOF_INT8
    );
    get_unsigned!(get_u8, get_array_u8, u8, SIZEOF_INT8);
    get_signed!(get_i16, get_array_i16, i16, SIZEOF_INT16);
    get_unsigned!(get_u16, get_array_u16, u16, SIZEOF_INT16);
    get_signed!(
        /// 3 byte, sign-extended ke `i32`
        get_i24, get_array_i24, i32, SIZEOF_INT24
    );
    get_unsigned!(
        /// 3 byte, zero-extended ke `u32`
        get_u24, get_array_u24, u32, SIZEOF_INT24
    );
    get_signed!(get_i32, get_array_i32, i32, SIZEOF_INT32);
    get_unsigned!(get_u32, get_array_u32, u32, SIZEOF_INT32);
    get_signed!(get_i40, get_array_i40, i64, SIZEOF_INT40);
    get_unsigned!(get_u40, get_array_u40, u64, SIZEOF_INT40);
    get_signed!(get_i48, get_array_i48, i64, SIZEOF_INT48);
    get_unsigned!(get_u48, get_array_u48, u64, SIZEOF_INT48);
    get_signed!(get_i56, get_array_i56, i64, SIZEOF_INT56);
    get_unsigned!(get_u56, get_array_u56, u64, SIZEOF_INT56);
    get_signed!(get_i64, get_array_i64, i64, SIZEOF_INT64);
    get_unsigned!(get_u64, get_array_u64, u64, SIZEOF_INT64);

    #[inline(always)]
    pub fn get_f32(&mut self) -> Option<f32> {
        let bytes = self.take(SIZEOF_FLOAT32)?;
        Some(f32::from_bits(read_be(bytes) as u32))
    }

    #[inline]
    pub fn get_array_f32(&mut self, values: &mut [f32]) -> Option<()> {
        let bytes = self.take_array(values.len(), SIZEOF_FLOAT32)?;
        for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(SIZEOF_FLOAT32)) {
            *value = f32::from_bits(read_be(chunk) as u32);
        }
        Some(())
    }

    #[inline(always)]
    pub fn get_f64(&mut self) -> Option<f64> {
        let bytes = self.take(SIZEOF_FLOAT64)?;
        Some(f64::from_bits(read_be(bytes)))
    }

    #[inline]
    pub fn get_array_f64(&mut self, values: &mut [f64]) -> Option<()> {
        let bytes = self.take_array(values.len(), SIZEOF_FLOAT64)?;
        for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(SIZEOF_FLOAT64)) {
            *value = f64::from_bits(read_be(chunk));
        }
        Some(())
    }

    /// Baca length variabel (1 atau 4 byte).
    ///
    /// Byte pertama di-peek dulu; jika format panjang tapi kurang dari 4
    /// byte tersisa, stream invalid dan cursor tetap di awal field.
    #[inline]
    pub fn get_length(&mut self) -> Option<usize> {
        if !self.valid {
            return None;
        }
        let first = match self.buffer.get(self.cursor) {
            Some(&byte) => byte,
            None => {
                self.exhausted(SIZEOF_INT8);
                return None;
            }
        };
        if first & LONG_LENGTH_FLAG == 0 {
            self.cursor += SIZEOF_INT8;
            return Some(usize::from(first));
        }
        let bytes = self.take(LONG_LENGTH_SIZE)?;
        let value = read_be(bytes) as u32 & !(u32::from(LONG_LENGTH_FLAG) << 24);
        Some(value as usize)
    }

    /// Tag versi 1 byte; 0 tidak diperlakukan khusus di level ini
    #[inline(always)]
    pub fn get_version(&mut self) -> Option<u8> {
        self.take(SIZEOF_INT8).map(|bytes| bytes[0])
    }

    /// Length diikuti byte UTF-8. Payload bukan UTF-8 valid dianggap
    /// input malformed dan meng-invalidate stream.
    ///
    /// Jika gagal, cursor dikembalikan ke awal field string.
    pub fn get_string(&mut self) -> Option<String> {
        let start = self.cursor;
        let bytes = self.get_length().and_then(|length| self.take(length));
        let Some(bytes) = bytes else {
            self.cursor = start;
            return None;
        };
        match std::str::from_utf8(bytes) {
            Ok(s) => Some(s.to_owned()),
            Err(e) => {
                tracing::debug!(cursor = start, error = %e, "string payload is not UTF-8");
                self.cursor = start;
                self.valid = false;
                None
            }
        }
    }
}

impl fmt::Display for ByteInStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ByteDump::new(self.buffer), f)
    }
}
