//! Property-based tests untuk round-trip dan exhaustion.

use proptest::prelude::*;

use bdex::protocol::format::length_size;
use bdex::protocol::{ByteInStream, ByteOutStream};

proptest! {
    #[test]
    fn i24_roundtrip(v in -(1i32 << 23)..(1i32 << 23)) {
        let mut o = ByteOutStream::new();
        o.put_i24(v);
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_i24(), Some(v));
        prop_assert!(x.is_valid() && x.is_empty());
    }

    #[test]
    fn i40_roundtrip(v in -(1i64 << 39)..(1i64 << 39)) {
        let mut o = ByteOutStream::new();
        o.put_i40(v);
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_i40(), Some(v));
        prop_assert!(x.is_valid() && x.is_empty());
    }

    #[test]
    fn u56_roundtrip(v in 0u64..(1u64 << 56)) {
        let mut o = ByteOutStream::new();
        o.put_u56(v);
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_u56(), Some(v));
        prop_assert!(x.is_valid() && x.is_empty());
    }

    #[test]
    fn i64_roundtrip(v in any::<i64>()) {
        let mut o = ByteOutStream::new();
        o.put_i64(v);
        prop_assert_eq!(o.data(), &v.to_be_bytes()[..]);
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_i64(), Some(v));
    }

    #[test]
    fn f64_preserves_bits(v in any::<f64>()) {
        let mut o = ByteOutStream::new();
        o.put_f64(v);
        let mut x = ByteInStream::new(o.data());
        // Bandingkan bit pattern supaya NaN ikut teruji
        prop_assert_eq!(x.get_f64().map(f64::to_bits), Some(v.to_bits()));
    }

    #[test]
    fn f32_preserves_bits(v in any::<f32>()) {
        let mut o = ByteOutStream::new();
        o.put_f32(v);
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_f32().map(f32::to_bits), Some(v.to_bits()));
    }

    #[test]
    fn length_roundtrip(v in 0usize..=0x7FFF_FFFF) {
        let mut o = ByteOutStream::new();
        o.put_length(v).put_u8(0xFE);
        prop_assert_eq!(o.length(), length_size(v) + 1);

        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_length(), Some(v));
        prop_assert_eq!(x.get_u8(), Some(0xFE));
        prop_assert!(x.is_valid() && x.is_empty());
    }

    #[test]
    fn array_i48_roundtrip(values in prop::collection::vec(-(1i64 << 47)..(1i64 << 47), 0..200)) {
        let mut o = ByteOutStream::new();
        o.put_array_i48(&values);
        prop_assert_eq!(o.length(), values.len() * 6);

        let mut decoded = vec![0i64; values.len()];
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_array_i48(&mut decoded), Some(()));
        prop_assert_eq!(decoded, values);
        prop_assert!(x.is_empty());
    }

    #[test]
    fn string_roundtrip(s in ".*") {
        let mut o = ByteOutStream::new();
        o.put_string(&s);
        let mut x = ByteInStream::new(o.data());
        prop_assert_eq!(x.get_string(), Some(s));
        prop_assert!(x.is_valid() && x.is_empty());
    }

    /// Read yang melebihi sisa buffer meng-invalidate tanpa memajukan cursor
    #[test]
    fn exhaustion_is_sticky(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        skip in 0usize..32
    ) {
        let skip = skip.min(bytes.len());
        let mut x = ByteInStream::new(&bytes);
        let mut prefix = vec![0u8; skip];
        prop_assert_eq!(x.get_array_u8(&mut prefix), Some(()));

        let remaining = bytes.len() - skip;
        let mut too_many = vec![0u8; remaining + 1];
        prop_assert_eq!(x.get_array_u8(&mut too_many), None);
        prop_assert!(!x.is_valid());
        prop_assert_eq!(x.cursor(), skip);

        prop_assert_eq!(x.get_u8(), None);
        prop_assert_eq!(x.get_length(), None);
        prop_assert_eq!(x.cursor(), skip);
    }

    /// Decoder atas buffer identik menghasilkan urutan read identik
    #[test]
    fn reads_are_deterministic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let copy = bytes.clone();
        let mut a = ByteInStream::new(&bytes);
        let mut b = ByteInStream::new(&copy);
        loop {
            let (va, vb) = (a.get_length(), b.get_length());
            prop_assert_eq!(va, vb);
            prop_assert_eq!(a.cursor(), b.cursor());
            if va.is_none() || a.is_empty() {
                break;
            }
        }
        prop_assert_eq!(a.is_valid(), b.is_valid());
    }
}
