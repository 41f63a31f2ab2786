//! Person Record - Versioned Streaming Demo
//!
//! Simulasi value type yang mendukung versioned streaming:
//! 1. Tulis tag versi lalu field `Person` ke output stream
//! 2. Baca tag versi dari input stream lalu dispatch per versi
//! 3. Versi tidak dikenal meng-invalidate stream
//!
//! Usage:
//!   cargo run --example person

use bdex::protocol::{ByteInStream, ByteOutStream};
use bdex::streamable::{stream_in_versioned, stream_out_versioned, Streamable};

/// Person record dengan nama dan umur
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Person {
    first_name: String,
    last_name: String,
    age: i32,
}

impl Person {
    fn new(first_name: &str, last_name: &str, age: i32) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
        }
    }
}

impl Streamable for Person {
    const MAX_VERSION: u8 = 1;

    fn stream_out(&self, stream: &mut ByteOutStream, version: u8) {
        if version == 1 {
            stream
                .put_string(&self.first_name)
                .put_string(&self.last_name)
                .put_i32(self.age);
        }
    }

    fn stream_in(&mut self, stream: &mut ByteInStream<'_>, version: u8) {
        if !stream.is_valid() {
            return;
        }
        match version {
            1 => {
                // Nilai "stream error" menandai field yang mungkin korup
                match stream.get_string() {
                    Some(name) => self.first_name = name,
                    None => {
                        self.first_name = "stream error".to_string();
                        return;
                    }
                }
                match stream.get_string() {
                    Some(name) => self.last_name = name,
                    None => {
                        self.last_name = "stream error".to_string();
                        return;
                    }
                }
                match stream.get_i32() {
                    Some(age) => self.age = age,
                    None => self.age = 1,
                }
            }
            _ => stream.invalidate(),
        }
    }
}

fn main() {
    println!("👤 Person Streaming Demo");
    println!("========================\n");

    let jane = Person::new("Jane", "Smith", 42);

    let mut out = ByteOutStream::new();
    stream_out_versioned(&jane, &mut out);
    println!("Encoded {} bytes:{}\n", out.length(), out);

    let mut copy = Person::default();
    assert_ne!(copy, jane);

    let mut input = ByteInStream::new(out.data());
    stream_in_versioned(&mut copy, &mut input);

    if input.is_valid() && copy == jane {
        println!("✅ Successfully serialized and de-serialized Jane Smith:");
    } else {
        println!("❌ Serialization unsuccessful. 'copy' holds:");
    }
    println!("   FirstName: {}", copy.first_name);
    println!("   LastName : {}", copy.last_name);
    println!("   Age      : {}", copy.age);

    // Stream terpotong: field terakhir hilang
    let truncated = &out.data()[..out.length() - 2];
    let mut input = ByteInStream::new(truncated);
    let mut partial = Person::default();
    stream_in_versioned(&mut partial, &mut input);
    println!(
        "\nTruncated stream: valid={} age={} ({})",
        input.is_valid(),
        partial.age,
        input.check().err().map(|e| e.to_string()).unwrap_or_default()
    );
}
