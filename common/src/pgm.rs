//! Portable graymap (PGM) reading and writing.
//!
//! Supports plain (`P2`) and raw (`P5`) graymaps. Raw samples are one byte
//! when `maxval < 256` and two big-endian bytes otherwise.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::grid::Grid;

#[derive(Debug, thiserror::Error)]
pub enum PgmError {
    #[error("IO error")]
    Io(#[from] io::Error),
    #[error("Unsupported magic number: {0:?}")]
    UnsupportedMagic(String),
    #[error("Unexpected end of data while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("Invalid header field {field}: {value:?}")]
    InvalidHeader { field: &'static str, value: String },
    #[error("Sample {value} exceeds maxval {maxval}")]
    SampleOutOfRange { value: u32, maxval: u32 },
}

pub type Result<T> = std::result::Result<T, PgmError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    Plain,
    Raw,
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self, what: &'static str) -> Result<&'a str> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(PgmError::UnexpectedEof(what));
        }
        std::str::from_utf8(&self.data[start..self.pos]).map_err(|_| PgmError::InvalidHeader {
            field: what,
            value: String::from_utf8_lossy(&self.data[start..self.pos]).into_owned(),
        })
    }

    fn number(&mut self, what: &'static str) -> Result<u32> {
        let token = self.token(what)?;
        token.parse().map_err(|_| PgmError::InvalidHeader {
            field: what,
            value: token.to_string(),
        })
    }
}

/// Parses a graymap held in memory.
pub fn decode(data: &[u8]) -> Result<Grid<i32>> {
    let mut cursor = Cursor::new(data);
    let encoding = match cursor.token("magic")? {
        "P2" => Encoding::Plain,
        "P5" => Encoding::Raw,
        other => return Err(PgmError::UnsupportedMagic(other.to_string())),
    };

    let width = cursor.number("width")? as usize;
    let height = cursor.number("height")? as usize;
    let maxval = cursor.number("maxval")?;
    if maxval == 0 || maxval > u16::MAX as u32 {
        return Err(PgmError::InvalidHeader {
            field: "maxval",
            value: maxval.to_string(),
        });
    }

    let count = width
        .checked_mul(height)
        .ok_or_else(|| PgmError::InvalidHeader {
            field: "width",
            value: format!("{width} x {height}"),
        })?;
    let samples = match encoding {
        Encoding::Plain => {
            // Every plain sample takes at least one digit and one separator.
            let mut samples = Vec::with_capacity(count.min(data.len() / 2));
            for _ in 0..count {
                let value = cursor.number("sample")?;
                if value > maxval {
                    return Err(PgmError::SampleOutOfRange { value, maxval });
                }
                samples.push(value as i32);
            }
            samples
        }
        Encoding::Raw => {
            // Exactly one whitespace byte separates the header from the raster.
            let start = cursor.pos + 1;
            let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
            let raster = count
                .checked_mul(bytes_per_sample)
                .and_then(|len| start.checked_add(len))
                .and_then(|end| data.get(start..end))
                .ok_or(PgmError::UnexpectedEof("raster"))?;
            if bytes_per_sample == 1 {
                raster.iter().map(|&b| b as i32).collect()
            } else {
                raster
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]) as i32)
                    .collect()
            }
        }
    };

    Ok(Grid::new(width, height, samples))
}

pub fn read(path: impl AsRef<Path>) -> Result<Grid<i32>> {
    let data = fs::read(path)?;
    decode(&data)
}

/// Writes `grid` as a plain graymap with maxval 255, clamping samples into range.
pub fn encode<W: Write>(writer: &mut W, grid: &Grid<i32>) -> Result<()> {
    writeln!(writer, "P2")?;
    writeln!(writer, "{} {}", grid.width(), grid.height())?;
    writeln!(writer, "255")?;
    for row in 0..grid.height() {
        let line = grid
            .row(row)
            .iter()
            .map(|&v| v.clamp(0, 255).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

pub fn write(path: impl AsRef<Path>, grid: &Grid<i32>) -> Result<()> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    encode(&mut out, grid)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_output_path;

    #[test]
    fn test_decode_plain_with_comments() {
        let data = b"P2\n# a comment\n3 2\n# another\n255\n0 1 2\n253 254 255\n";
        let grid = decode(data).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.samples(), &[0, 1, 2, 253, 254, 255]);
    }

    #[test]
    fn test_decode_raw_8bit() {
        let mut data = b"P5 2 2 255\n".to_vec();
        data.extend_from_slice(&[0, 10, 200, 255]);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.samples(), &[0, 10, 200, 255]);
    }

    #[test]
    fn test_decode_raw_16bit_big_endian() {
        let mut data = b"P5\n2 1\n65535\n".to_vec();
        data.extend_from_slice(&[0x01, 0x00, 0xff, 0xff]);
        let grid = decode(&data).unwrap();
        assert_eq!(grid.samples(), &[256, 65535]);
    }

    #[test]
    fn test_decode_rejects_unknown_magic() {
        let err = decode(b"P6 1 1 255\n\0\0\0").unwrap_err();
        assert!(matches!(err, PgmError::UnsupportedMagic(ref m) if m == "P6"));
    }

    #[test]
    fn test_decode_truncated_raster() {
        let err = decode(b"P5 4 4 255\n\x01\x02").unwrap_err();
        assert!(matches!(err, PgmError::UnexpectedEof("raster")));
    }

    #[test]
    fn test_decode_rejects_oversized_header() {
        let err = decode(b"P2 4294967295 4294967295 255 0").unwrap_err();
        if usize::BITS < 64 {
            assert!(matches!(err, PgmError::InvalidHeader { field: "width", .. }));
        } else {
            assert!(matches!(err, PgmError::UnexpectedEof("sample")));
        }

        // Fits in usize but not in the data that follows.
        let err = decode(b"P2 40000 40000 255 0 1 2").unwrap_err();
        assert!(matches!(err, PgmError::UnexpectedEof("sample")));

        let err = decode(b"P5 40000 40000 65535\n\x00\x01").unwrap_err();
        assert!(matches!(err, PgmError::UnexpectedEof("raster")));
    }

    #[test]
    fn test_decode_sample_above_maxval() {
        let err = decode(b"P2 1 1 15 16").unwrap_err();
        assert!(matches!(
            err,
            PgmError::SampleOutOfRange {
                value: 16,
                maxval: 15
            }
        ));
    }

    #[test]
    fn test_encode_clamps_and_reads_back() {
        let grid = Grid::new(3, 1, vec![-5, 128, 300]);
        let path = test_output_path("pgm_encode_clamps.pgm");
        write(&path, &grid).unwrap();

        let back = read(&path).unwrap();
        assert_eq!(back.samples(), &[0, 128, 255]);
    }
}
