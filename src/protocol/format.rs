//! Wire Format: Big-Endian Fixed-Width Layout
//!
//! Layout per field (tanpa padding, tanpa tag tipe):
//! ┌──────────────┬───────────────────────────────────────────┐
//! │ Int8..Int64  │ N/8 bytes, most-significant byte first    │
//! │ Float32/64   │ IEEE-754 bit pattern, 4/8 bytes, BE       │
//! │ Array<T>     │ count × width(T), count disepakati luar   │
//! │ Length       │ 1 byte (0..=127) atau 4 bytes BE | 0x80.. │
//! │ Version      │ 1 byte unsigned (1..=255, 0 reserved)     │
//! └──────────────┴───────────────────────────────────────────┘
//!
//! Encoder dan decoder hanya berbagi konstanta dan helper di file ini.

pub const SIZEOF_INT64: usize = 8;
pub const SIZEOF_INT56: usize = 7;
pub const SIZEOF_INT48: usize = 6;
pub const SIZEOF_INT40: usize = 5;
pub const SIZEOF_INT32: usize = 4;
pub const SIZEOF_INT24: usize = 3;
pub const SIZEOF_INT16: usize = 2;
pub const SIZEOF_INT8: usize = 1;
pub const SIZEOF_FLOAT64: usize = 8;
pub const SIZEOF_FLOAT32: usize = 4;

/// Nilai terbesar yang masih muat di length format pendek (1 byte)
pub const MAX_SHORT_LENGTH: usize = 127;
/// Bit kontinuasi di byte pertama length format panjang
pub const LONG_LENGTH_FLAG: u8 = 0x80;
/// Ukuran length format panjang
pub const LONG_LENGTH_SIZE: usize = 4;
/// Length terbesar yang bisa direpresentasikan (31 bit)
pub const MAX_LENGTH: usize = 0x7FFF_FFFF;

/// Versi terkecil yang valid; 0 reserved
pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = u8::MAX;

/// Append `width` byte terendah dari `value`, big-endian.
///
/// Byte di atas `width` dibuang (truncation), jadi caller bertanggung
/// jawab memastikan nilai muat.
#[inline(always)]
pub fn write_be(buf: &mut Vec<u8>, value: u64, width: usize) {
    debug_assert!((1..=8).contains(&width));
    buf.extend_from_slice(&value.to_be_bytes()[8 - width..]);
}

/// Gabungkan sampai 8 byte big-endian menjadi `u64` (zero-extended)
#[inline(always)]
pub fn read_be(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Sign-extend nilai `width` byte ke `i64`
#[inline(always)]
pub fn sign_extend(value: u64, width: usize) -> i64 {
    let shift = 64 - 8 * width as u32;
    ((value << shift) as i64) >> shift
}

/// Jumlah byte yang dipakai `put_length` untuk `length`
#[inline(always)]
pub fn length_size(length: usize) -> usize {
    if length <= MAX_SHORT_LENGTH {
        SIZEOF_INT8
    } else {
        LONG_LENGTH_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_be_truncates_high_bytes() {
        let mut buf = Vec::new();
        write_be(&mut buf, 0x1122_3344_5566_7788, SIZEOF_INT24);
        assert_eq!(buf, [0x66, 0x77, 0x88]);

        buf.clear();
        write_be(&mut buf, 0x0102, SIZEOF_INT64);
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0x01, 0x02]);
    }

    #[test]
    fn test_read_be() {
        assert_eq!(read_be(&[]), 0);
        assert_eq!(read_be(&[0xAB]), 0xAB);
        assert_eq!(read_be(&[0x01, 0x02, 0x03, 0x04, 0x05]), 0x01_0203_0405);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFF_FFFF, SIZEOF_INT24), -1);
        assert_eq!(sign_extend(0x7F_FFFF, SIZEOF_INT24), 0x7F_FFFF);
        assert_eq!(sign_extend(0x80_0000_0000, SIZEOF_INT40), -(1i64 << 39));
        assert_eq!(sign_extend(u64::MAX, SIZEOF_INT64), -1);
    }

    #[test]
    fn test_length_size_boundary() {
        assert_eq!(length_size(0), 1);
        assert_eq!(length_size(127), 1);
        assert_eq!(length_size(128), 4);
        assert_eq!(length_size(MAX_LENGTH), 4);
    }
}
