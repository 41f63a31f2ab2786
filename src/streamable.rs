//! Versioned streaming untuk value type
//!
//! Value type mengimplementasikan `Streamable`: `stream_out` menulis field
//! sesuai versi, `stream_in` membaca field sesuai versi. Tag versi sendiri
//! ditulis/dibaca oleh `stream_out_versioned` / `stream_in_versioned`.

use crate::error::{Result, StreamError};
use crate::protocol::format::MIN_VERSION;
use crate::protocol::{ByteInStream, ByteOutStream};

pub trait Streamable {
    /// Versi format terbaru yang didukung tipe ini
    const MAX_VERSION: u8;

    fn is_version_supported(version: u8) -> bool {
        (MIN_VERSION..=Self::MAX_VERSION).contains(&version)
    }

    /// Tulis field dengan format `version`. Tag versi tidak ditulis.
    /// Versi yang tidak didukung membiarkan stream tanpa perubahan.
    fn stream_out(&self, stream: &mut ByteOutStream, version: u8);

    /// Baca field dengan format `version`. Tag versi tidak dibaca.
    ///
    /// Jika stream sudah invalid, tidak ada efek. Versi yang tidak didukung
    /// meng-invalidate stream tanpa mengubah `self`. Jika stream menjadi
    /// invalid di tengah, `self` tetap valid tapi nilainya tidak terdefinisi.
    fn stream_in(&mut self, stream: &mut ByteInStream<'_>, version: u8);
}

/// Tulis tag `MAX_VERSION` lalu field dalam format tersebut
pub fn stream_out_versioned<T: Streamable>(value: &T, stream: &mut ByteOutStream) {
    stream.put_version(T::MAX_VERSION);
    value.stream_out(stream, T::MAX_VERSION);
}

/// Baca tag versi lalu dispatch ke `stream_in`
pub fn stream_in_versioned<T: Streamable>(value: &mut T, stream: &mut ByteInStream<'_>) {
    let Some(version) = stream.get_version() else {
        return;
    };
    if !T::is_version_supported(version) {
        tracing::debug!(version, max = T::MAX_VERSION, "unsupported version tag");
        stream.invalidate();
        return;
    }
    value.stream_in(stream, version);
}

/// Encode `value` dengan tag versi ke buffer baru
pub fn encode<T: Streamable>(value: &T) -> Vec<u8> {
    let mut stream = ByteOutStream::new();
    stream_out_versioned(value, &mut stream);
    stream.into_bytes()
}

/// Decode satu value bertag versi yang mengisi seluruh `bytes`
pub fn decode<T: Streamable + Default>(bytes: &[u8]) -> Result<T> {
    let mut stream = ByteInStream::new(bytes);
    let Some(version) = stream.get_version() else {
        return Err(StreamError::Invalid {
            cursor: stream.cursor(),
            length: stream.length(),
        });
    };
    if !T::is_version_supported(version) {
        return Err(StreamError::UnsupportedVersion(version));
    }
    let mut value = T::default();
    value.stream_in(&mut stream, version);
    stream.finish()?;
    Ok(value)
}

macro_rules! streamable_scalar {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl Streamable for $ty {
                const MAX_VERSION: u8 = 1;

                #[inline]
                fn stream_out(&self, stream: &mut ByteOutStream, _version: u8) {
                    stream.$put(*self);
                }

                #[inline]
                fn stream_in(&mut self, stream: &mut ByteInStream<'_>, _version: u8) {
                    if let Some(value) = stream.$get() {
                        *self = value;
                    }
                }
            }
        )*
    };
}

streamable_scalar! {
    i8 => put_i8, get_i8;
    u8 => put_u8, get_u8;
    i16 => put_i16, get_i16;
    u16 => put_u16, get_u16;
    i32 => put_i32, get_i32;
    u32 => put_u32, get_u32;
    i64 => put_i64, get_i64;
    u64 => put_u64, get_u64;
    f32 => put_f32, get_f32;
    f64 => put_f64, get_f64;
}

impl Streamable for bool {
    const MAX_VERSION: u8 = 1;

    fn stream_out(&self, stream: &mut ByteOutStream, _version: u8) {
        stream.put_u8(u8::from(*self));
    }

    fn stream_in(&mut self, stream: &mut ByteInStream<'_>, _version: u8) {
        if let Some(byte) = stream.get_u8() {
            *self = byte != 0;
        }
    }
}

impl Streamable for String {
    const MAX_VERSION: u8 = 1;

    fn stream_out(&self, stream: &mut ByteOutStream, _version: u8) {
        stream.put_string(self);
    }

    fn stream_in(&mut self, stream: &mut ByteInStream<'_>, _version: u8) {
        if let Some(value) = stream.get_string() {
            *self = value;
        }
    }
}

/// Length diikuti tiap elemen dengan versi yang sama
impl<T: Streamable + Default> Streamable for Vec<T> {
    const MAX_VERSION: u8 = T::MAX_VERSION;

    fn stream_out(&self, stream: &mut ByteOutStream, version: u8) {
        if !Self::is_version_supported(version) {
            return;
        }
        stream.put_length(self.len());
        for item in self {
            item.stream_out(stream, version);
        }
    }

    /// `self` hanya diganti jika seluruh elemen terbaca
    fn stream_in(&mut self, stream: &mut ByteInStream<'_>, version: u8) {
        if !Self::is_version_supported(version) {
            stream.invalidate();
            return;
        }
        let Some(length) = stream.get_length() else {
            return;
        };
        // Length dari wire tidak dipercaya untuk pre-alokasi
        let mut items = Vec::with_capacity(length.min(stream.remaining()));
        for _ in 0..length {
            let mut item = T::default();
            item.stream_in(stream, version);
            if !stream.is_valid() {
                return;
            }
            items.push(item);
        }
        *self = items;
    }
}
