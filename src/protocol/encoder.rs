//! Output stream: append-only big-endian encoder
//!
//! Semua `put_*` selalu berhasil dan hanya menambah byte di akhir buffer.
//! Tidak ada state invalid di sisi encoder.

use std::fmt;

use super::dump::ByteDump;
use super::format::{
    length_size, write_be, LONG_LENGTH_FLAG, MAX_LENGTH, SIZEOF_FLOAT32, SIZEOF_FLOAT64,
    SIZEOF_INT16, SIZEOF_INT24, SIZEOF_INT32, SIZEOF_INT40, SIZEOF_INT48, SIZEOF_INT56,
    SIZEOF_INT64, SIZEOF_INT8,
};

/// Generate pasangan `put_x` / `put_array_x` untuk satu lebar integer.
///
/// `$carrier` adalah tipe native yang menampung nilai, `$width` jumlah
/// byte di wire. Nilai di-cast ke `u64` (sign-extend untuk signed) lalu
/// dipotong ke `$width` byte terendah.
macro_rules! put_integer {
    ($(#[$doc:meta])* $put:ident, $put_array:ident, $carrier:ty, $width:expr) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $put(&mut self, value: $carrier) -> &mut Self {
            write_be(&mut self.buffer, value as u64, $width);
            self
        }

        #[inline]
        pub fn $put_array(&mut self, values: &[$carrier]) -> &mut Self {
            self.buffer.reserve(values.len() * $width);
            for &value in values {
                write_be(&mut self.buffer, value as u64, $width);
            }
            self
        }
    };
}

/// Growable output stream
///
/// Buffer dimiliki penuh oleh encoder; `data()` dan `length()` adalah
/// snapshot yang valid sampai `put_*` berikutnya.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteOutStream {
    buffer: Vec<u8>,
}

impl ByteOutStream {
    /// Membuat encoder kosong
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Membuat encoder dengan kapasitas awal
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Pastikan ada ruang untuk `additional` byte tanpa realokasi
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(additional);
    }

    /// Reset encoder untuk reuse (kapasitas dipertahankan)
    #[inline(always)]
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    #[inline(always)]
    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    put_integer!(
        /// 1 byte; `-1` ditulis sebagai `0xFF`
        put_i8, put_array_i8, i8, SIZEOF_INT8
    );
    put_integer!(put_u8, put_array_u8, u8, SIZEOF_INT8);
    put_integer!(put_i16, put_array_i16, i16, SIZEOF_INT16);
    put_integer!(put_u16, put_array_u16, u16, SIZEOF_INT16);
    put_integer!(
        /// 3 byte terendah dari `value`; byte tertinggi dibuang
        put_i24, put_array_i24, i32, SIZEOF_INT24
    );
    put_integer!(put_u24, put_array_u24, u32, SIZEOF_INT24);
    put_integer!(put_i32, put_array_i32, i32, SIZEOF_INT32);
    put_integer!(put_u32, put_array_u32, u32, SIZEOF_INT32);
    put_integer!(
        /// 5 byte terendah dari `value`
        put_i40, put_array_i40, i64, SIZEOF_INT40
    );
    put_integer!(put_u40, put_array_u40, u64, SIZEOF_INT40);
    put_integer!(put_i48, put_array_i48, i64, SIZEOF_INT48);
    put_integer!(put_u48, put_array_u48, u64, SIZEOF_INT48);
    put_integer!(put_i56, put_array_i56, i64, SIZEOF_INT56);
    put_integer!(put_u56, put_array_u56, u64, SIZEOF_INT56);
    put_integer!(put_i64, put_array_i64, i64, SIZEOF_INT64);
    put_integer!(put_u64, put_array_u64, u64, SIZEOF_INT64);

    /// IEEE-754 single, bit pattern big-endian
    #[inline(always)]
    pub fn put_f32(&mut self, value: f32) -> &mut Self {
        write_be(&mut self.buffer, u64::from(value.to_bits()), SIZEOF_FLOAT32);
        self
    }

    #[inline]
    pub fn put_array_f32(&mut self, values: &[f32]) -> &mut Self {
        self.buffer.reserve(values.len() * SIZEOF_FLOAT32);
        for &value in values {
            self.put_f32(value);
        }
        self
    }

    /// IEEE-754 double, bit pattern big-endian
    #[inline(always)]
    pub fn put_f64(&mut self, value: f64) -> &mut Self {
        write_be(&mut self.buffer, value.to_bits(), SIZEOF_FLOAT64);
        self
    }

    #[inline]
    pub fn put_array_f64(&mut self, values: &[f64]) -> &mut Self {
        self.buffer.reserve(values.len() * SIZEOF_FLOAT64);
        for &value in values {
            self.put_f64(value);
        }
        self
    }

    /// Length variabel: 1 byte untuk `0..=127`, selain itu 4 byte BE
    /// dengan bit tertinggi byte pertama di-set.
    ///
    /// `length` di atas `MAX_LENGTH` tidak bisa direpresentasikan; bit 31
    /// ke atas dibuang.
    #[inline]
    pub fn put_length(&mut self, length: usize) -> &mut Self {
        debug_assert!(length <= MAX_LENGTH, "length {} exceeds 31 bits", length);
        if length_size(length) == SIZEOF_INT8 {
            self.buffer.push(length as u8);
        } else {
            let start = self.buffer.len();
            write_be(&mut self.buffer, (length & MAX_LENGTH) as u64, SIZEOF_INT32);
            self.buffer[start] |= LONG_LENGTH_FLAG;
        }
        self
    }

    /// Tag versi 1 byte. Versi 0 reserved, tapi tetap ditulis apa adanya.
    #[inline(always)]
    pub fn put_version(&mut self, version: u8) -> &mut Self {
        self.buffer.push(version);
        self
    }

    /// Length (dalam byte) diikuti byte UTF-8 string
    pub fn put_string(&mut self, value: &str) -> &mut Self {
        self.put_length(value.len());
        self.put_array_u8(value.as_bytes())
    }
}

impl fmt::Display for ByteOutStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ByteDump::new(&self.buffer), f)
    }
}
