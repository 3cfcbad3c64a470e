/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Endian-aware primitives for reading 32-bit unsigned integers and
//! IEEE-754 64-bit floats from a forward-only byte stream.

use crate::errors::{IoError, ReadSnafu};
use snafu::ResultExt;
use std::io::Read;

/// Reads fixed-width numeric values from a byte stream, optionally
/// reversing byte order before interpreting them.
///
/// Implemented for any [`Read`], so it composes with an in-memory cursor,
/// a memory-mapped file, or a plain file handle without change.
pub trait BinaryReader {
    /// Reads four bytes as a `u32`. If `swap` is set, the bytes are
    /// reversed before being interpreted in native byte order.
    fn read_u32(&mut self, swap: bool) -> Result<u32, IoError>;

    /// Reads eight bytes as an IEEE-754 binary64. If `swap` is set, the
    /// bytes are reversed before being interpreted in native byte order.
    fn read_f64(&mut self, swap: bool) -> Result<f64, IoError>;

    /// Reads and discards `count` bytes.
    fn skip_bytes(&mut self, count: usize) -> Result<(), IoError>;
}

impl<R: Read + ?Sized> BinaryReader for R {
    fn read_u32(&mut self, swap: bool) -> Result<u32, IoError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf).context(ReadSnafu {
            what: "u32",
            needed: 4usize,
        })?;
        if swap {
            buf.reverse();
        }
        Ok(u32::from_ne_bytes(buf))
    }

    fn read_f64(&mut self, swap: bool) -> Result<f64, IoError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf).context(ReadSnafu {
            what: "f64",
            needed: 8usize,
        })?;
        if swap {
            buf.reverse();
        }
        Ok(f64::from_ne_bytes(buf))
    }

    fn skip_bytes(&mut self, count: usize) -> Result<(), IoError> {
        let mut remaining = count;
        let mut sink = [0u8; 4096];
        while remaining > 0 {
            let chunk = remaining.min(sink.len());
            self.read_exact(&mut sink[..chunk]).context(ReadSnafu {
                what: "padding",
                needed: chunk,
            })?;
            remaining -= chunk;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_native_u32() {
        let mut cur = Cursor::new(42u32.to_ne_bytes());
        assert_eq!(cur.read_u32(false).unwrap(), 42);
    }

    #[test]
    fn reads_swapped_u32() {
        let mut cur = Cursor::new(42u32.to_ne_bytes());
        assert_eq!(cur.read_u32(true).unwrap(), 42u32.swap_bytes());
    }

    #[test]
    fn reads_native_f64() {
        let mut cur = Cursor::new(std::f64::consts::PI.to_ne_bytes());
        assert_eq!(cur.read_f64(false).unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn reads_swapped_f64() {
        let value = 2451545.0_f64;
        let mut be = value.to_ne_bytes();
        be.reverse();
        let mut cur = Cursor::new(be);
        assert_eq!(cur.read_f64(true).unwrap(), value);
    }

    #[test]
    fn truncated_stream_errors() {
        let mut cur = Cursor::new([0u8; 2]);
        assert!(cur.read_u32(false).is_err());
    }

    #[test]
    fn skip_advances_past_padding() {
        let mut cur = Cursor::new(vec![0u8; 10].into_iter().chain(7u32.to_ne_bytes()).collect::<Vec<u8>>());
        cur.skip_bytes(10).unwrap();
        assert_eq!(cur.read_u32(false).unwrap(), 7);
    }
}
