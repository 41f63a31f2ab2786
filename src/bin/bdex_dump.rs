//! bdex Dump Tool
//!
//! Inspect file berisi byte stream bdex:
//! - Dump biner/hex dengan kolom offset
//! - Decode berurutan sesuai layout field (opsional)
//! - Laporan state akhir stream (valid/empty/cursor)
//!
//! Usage:
//!   cargo run --release --bin bdex_dump -- <FILE> [OPTIONS]

use std::process;

use bdex::core::{write_stream, MappedFile};
use bdex::protocol::format::{
    SIZEOF_FLOAT32, SIZEOF_FLOAT64, SIZEOF_INT16, SIZEOF_INT24, SIZEOF_INT32, SIZEOF_INT40,
    SIZEOF_INT48, SIZEOF_INT56, SIZEOF_INT64, SIZEOF_INT8,
};
use bdex::protocol::{ByteDump, ByteInStream, ByteOutStream, DumpStyle};

/// Dump configuration
struct DumpConfig {
    path: Option<String>,
    style: DumpStyle,
    layout: Option<String>,
    write_sample: bool,
    verbose: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            path: None,
            style: DumpStyle::Binary,
            layout: None,
            write_sample: false,
            verbose: false,
        }
    }
}

/// Tipe field di layout `--layout`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    I8,
    U8,
    I16,
    U16,
    I24,
    U24,
    I32,
    U32,
    I40,
    U40,
    I48,
    U48,
    I56,
    U56,
    I64,
    U64,
    F32,
    F64,
    Length,
    Version,
    Str,
}

impl FieldKind {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "i8" => Self::I8,
            "u8" => Self::U8,
            "i16" => Self::I16,
            "u16" => Self::U16,
            "i24" => Self::I24,
            "u24" => Self::U24,
            "i32" => Self::I32,
            "u32" => Self::U32,
            "i40" => Self::I40,
            "u40" => Self::U40,
            "i48" => Self::I48,
            "u48" => Self::U48,
            "i56" => Self::I56,
            "u56" => Self::U56,
            "i64" => Self::I64,
            "u64" => Self::U64,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "len" => Self::Length,
            "ver" => Self::Version,
            "str" => Self::Str,
            _ => return None,
        })
    }

    /// Length, version dan string tidak punya varian array
    fn has_array_form(self) -> bool {
        !matches!(self, Self::Length | Self::Version | Self::Str)
    }
}

/// Satu entry layout: tipe + jumlah elemen (None = scalar)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Field {
    kind: FieldKind,
    count: Option<usize>,
}

fn parse_layout(layout: &str) -> Result<Vec<Field>, String> {
    layout
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (name, count) = match token.split_once('*') {
                Some((name, count)) => {
                    let count = count
                        .parse::<usize>()
                        .map_err(|_| format!("invalid array count in '{}'", token))?;
                    (name, Some(count))
                }
                None => (token, None),
            };
            let kind =
                FieldKind::from_token(name).ok_or_else(|| format!("unknown field '{}'", name))?;
            if count.is_some() && !kind.has_array_form() {
                return Err(format!("'{}' has no array form", name));
            }
            Ok(Field { kind, count })
        })
        .collect()
}

/// Array dicek terhadap sisa byte sebelum alokasi; count dari `--layout`
/// tidak dipercaya.
macro_rules! read_field {
    ($stream:expr, $count:expr, $get:ident, $get_array:ident, $ty:ty, $width:expr) => {
        match $count {
            None => $stream.$get().map(|value| value.to_string()),
            Some(n) if !fits($stream, n, $width) => {
                $stream.invalidate();
                None
            }
            Some(n) => {
                let mut values: Vec<$ty> = vec![Default::default(); n];
                $stream.$get_array(&mut values).map(|()| format!("{:?}", values))
            }
        }
    };
}

fn fits(stream: &ByteInStream<'_>, count: usize, width: usize) -> bool {
    count
        .checked_mul(width)
        .is_some_and(|total| total <= stream.remaining())
}

/// Decode satu field; None jika stream invalid
fn read(stream: &mut ByteInStream<'_>, field: Field) -> Option<String> {
    let count = field.count;
    match field.kind {
        FieldKind::I8 => read_field!(stream, count, get_i8, get_array_i8, i8, SIZEOF_INT8),
        FieldKind::U8 => read_field!(stream, count, get_u8, get_array_u8, u8, SIZEOF_INT8),
        FieldKind::I16 => read_field!(stream, count, get_i16, get_array_i16, i16, SIZEOF_INT16),
        FieldKind::U16 => read_field!(stream, count, get_u16, get_array_u16, u16, SIZEOF_INT16),
        FieldKind::I24 => read_field!(stream, count, get_i24, get_array_i24, i32, SIZEOF_INT24),
        FieldKind::U24 => read_field!(stream, count, get_u24, get_array_u24, u32, SIZEOF_INT24),
        FieldKind::I32 => read_field!(stream, count, get_i32, get_array_i32, i32, SIZEOF_INT32),
        FieldKind::U32 => read_field!(stream, count, get_u32, get_array_u32, u32, SIZEOF_INT32),
        FieldKind::I40 => read_field!(stream, count, get_i40, get_array_i40, i64, SIZEOF_INT40),
        FieldKind::U40 => read_field!(stream, count, get_u40, get_array_u40, u64, SIZEOF_INT40),
        FieldKind::I48 => read_field!(stream, count, get_i48, get_array_i48, i64, SIZEOF_INT48),
        FieldKind::U48 => read_field!(stream, count, get_u48, get_array_u48, u64, SIZEOF_INT48),
        FieldKind::I56 => read_field!(stream, count, get_i56, get_array_i56, i64, SIZEOF_INT56),
        FieldKind::U56 => read_field!(stream, count, get_u56, get_array_u56, u64, SIZEOF_INT56),
        FieldKind::I64 => read_field!(stream, count, get_i64, get_array_i64, i64, SIZEOF_INT64),
        FieldKind::U64 => read_field!(stream, count, get_u64, get_array_u64, u64, SIZEOF_INT64),
        FieldKind::F32 => read_field!(stream, count, get_f32, get_array_f32, f32, SIZEOF_FLOAT32),
        FieldKind::F64 => read_field!(stream, count, get_f64, get_array_f64, f64, SIZEOF_FLOAT64),
        FieldKind::Length => stream.get_length().map(|v| v.to_string()),
        FieldKind::Version => stream.get_version().map(|v| v.to_string()),
        FieldKind::Str => stream.get_string().map(|v| format!("{:?}", v)),
    }
}

/// Sample stream yang cocok dengan layout `ver,str,i32,len,u8*3,f64`
fn sample_stream() -> ByteOutStream {
    let mut out = ByteOutStream::new();
    out.put_version(1)
        .put_string("Jane")
        .put_i32(42)
        .put_length(3)
        .put_array_u8(&[0xFD, 0xFE, 0xFF])
        .put_f64(1.5);
    out
}

fn run(config: &DumpConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let path = config.path.as_deref().ok_or("missing <FILE> argument")?;

    if config.write_sample {
        let sample = sample_stream();
        write_stream(path, &sample)?;
        println!("📝 Wrote {} byte sample to {}", sample.length(), path);
        println!("   Layout: ver,str,i32,len,u8*3,f64");
        return Ok(true);
    }

    let mapped = MappedFile::open(path)?;
    println!("📄 {} ({} bytes)", path, mapped.len());
    println!("{}", ByteDump::new(mapped.as_bytes()).with_style(config.style));

    let Some(layout) = config.layout.as_deref() else {
        return Ok(true);
    };
    let fields = parse_layout(layout)?;

    println!("\n🔎 Decoding {} field(s)", fields.len());
    let mut stream = mapped.in_stream();
    for (index, field) in fields.iter().enumerate() {
        let offset = stream.cursor();
        match read(&mut stream, *field) {
            Some(value) => {
                println!("  [{:>3}] @{:04x} {:?} = {}", index, offset, field.kind, value)
            }
            None => {
                println!("  [{:>3}] @{:04x} {:?} ❌ stream invalid", index, offset, field.kind);
                break;
            }
        }
    }

    println!(
        "\n   valid={} empty={} cursor={}/{}",
        stream.is_valid(),
        stream.is_empty(),
        stream.cursor(),
        stream.length()
    );
    if let Err(e) = stream.finish() {
        println!("   ⚠️ {}", e);
    }

    Ok(stream.is_valid())
}

fn parse_args() -> DumpConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DumpConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hex" | "-x" => {
                config.style = DumpStyle::Hex;
            }
            "--layout" | "-l" => {
                if i + 1 < args.len() {
                    config.layout = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--write-sample" => {
                config.write_sample = true;
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                println!("bdex_dump - Inspect bdex byte streams\n");
                println!("Usage: bdex_dump <FILE> [OPTIONS]\n");
                println!("Options:");
                println!("  -x, --hex              Hex bytes instead of binary");
                println!("  -l, --layout <FIELDS>  Decode fields, e.g. ver,str,i32,u8*3");
                println!("                         (i8..u64, i24/i40/i48/i56, f32, f64,");
                println!("                          len, ver, str; '*N' for arrays)");
                println!("      --write-sample     Write a sample stream to <FILE>");
                println!("  -v, --verbose          Debug logging (overrides RUST_LOG)");
                println!("  -h, --help             Show this help");
                process::exit(0);
            }
            other => {
                config.path = Some(other.to_string());
            }
        }
        i += 1;
    }

    config
}

fn main() {
    let config = parse_args();

    let filter = if config.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Dump error: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let fields = parse_layout("ver, str,i32,u8*3").unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].kind, FieldKind::Version);
        assert_eq!(
            fields[3],
            Field {
                kind: FieldKind::U8,
                count: Some(3)
            }
        );
    }

    #[test]
    fn test_parse_layout_errors() {
        assert!(parse_layout("i12").is_err());
        assert!(parse_layout("u8*x").is_err());
        assert!(parse_layout("str*2").is_err());
    }

    #[test]
    fn test_sample_matches_layout() {
        let sample = sample_stream();
        let mut stream = ByteInStream::new(sample.data());
        let fields = parse_layout("ver,str,i32,len,u8*3,f64").unwrap();
        let values: Vec<String> = fields
            .iter()
            .map(|field| read(&mut stream, *field).unwrap())
            .collect();
        assert_eq!(values, ["1", "\"Jane\"", "42", "3", "[253, 254, 255]", "1.5"]);
        assert!(stream.finish().is_ok());
    }

    #[test]
    fn test_oversized_array_count_invalidates() {
        let bytes = [1u8, 2, 3, 4];
        let mut stream = ByteInStream::new(&bytes);
        let field = parse_layout("u64*2305843009213693952").unwrap()[0];
        assert_eq!(read(&mut stream, field), None);
        assert!(!stream.is_valid());
        assert_eq!(stream.cursor(), 0);

        let mut stream = ByteInStream::new(&bytes);
        let field = parse_layout("i24*2").unwrap()[0];
        assert_eq!(read(&mut stream, field), None);
        assert!(!stream.is_valid());

        let mut stream = ByteInStream::new(&bytes);
        let field = parse_layout("u16*2").unwrap()[0];
        assert_eq!(read(&mut stream, field).as_deref(), Some("[258, 772]"));
        assert!(stream.is_empty());
    }
}
