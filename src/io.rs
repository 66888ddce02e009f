//! Little-endian primitives shared by every field kind.
//!
//! These are extension traits on `Read` and `Write`, so any stream can decode and encode the
//! building blocks of the las format:
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::io::{ReadLasExt, WriteLasExt};
//!
//! let mut cursor = Cursor::new(Vec::<u8>::new());
//! cursor.write_las_uint(0x0102, 2).unwrap();
//! cursor.write_las_string(b"LiDAR", 8).unwrap();
//! cursor.set_position(0);
//! assert_eq!(0x0102, cursor.read_las_uint(2).unwrap());
//! assert_eq!(b"LiDAR\0\0\0".to_vec(), cursor.read_las_string(8).unwrap());
//! ```

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Reads las primitives.
pub trait ReadLasExt: Read {
    /// Reads an unsigned little-endian integer that is `len` bytes long.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::io::ReadLasExt;
    /// let mut bytes: &[u8] = &[0x4c, 0x41, 0x53];
    /// assert_eq!(0x53414c, bytes.read_las_uint(3).unwrap());
    /// ```
    fn read_las_uint(&mut self, len: usize) -> Result<u64> {
        check_int_length(len)?;
        self.read_uint::<LittleEndian>(len).map_err(Error::from)
    }

    /// Reads exactly `len` raw bytes.
    ///
    /// Nul bytes are part of the result, it's up to the caller to trim them.
    fn read_las_string(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0; len];
        self.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads an IEEE-754 float that is `len` bytes long.
    ///
    /// Four byte floats are widened to an `f64`, which is exact.
    fn read_las_float(&mut self, len: usize) -> Result<f64> {
        match len {
            4 => Ok(f64::from(self.read_f32::<LittleEndian>()?)),
            8 => Ok(self.read_f64::<LittleEndian>()?),
            _ => Err(Error::FloatLength(len)),
        }
    }
}

impl<R: Read + ?Sized> ReadLasExt for R {}

/// Writes las primitives.
pub trait WriteLasExt: Write {
    /// Writes `value` as an unsigned little-endian integer that is `len` bytes long.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::io::WriteLasExt;
    /// let mut bytes: Vec<u8> = Vec::new();
    /// bytes.write_las_uint(42, 2).unwrap();
    /// assert_eq!(vec![42, 0], bytes);
    /// assert!(bytes.write_las_uint(256, 1).is_err());
    /// ```
    fn write_las_uint(&mut self, value: u64, len: usize) -> Result<()> {
        check_int_length(len)?;
        if len < 8 && value >> (8 * len) != 0 {
            return Err(Error::IntOverflow { value, len });
        }
        self.write_uint::<LittleEndian>(value, len)
            .map_err(Error::from)
    }

    /// Writes exactly `len` bytes of `bytes`.
    ///
    /// Longer inputs are truncated, shorter ones are padded with nuls.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::io::WriteLasExt;
    /// let mut bytes: Vec<u8> = Vec::new();
    /// bytes.write_las_string(b"LASF", 6).unwrap();
    /// bytes.write_las_string(b"Beer", 2).unwrap();
    /// assert_eq!(b"LASF\0\0Be".to_vec(), bytes);
    /// ```
    fn write_las_string(&mut self, bytes: &[u8], len: usize) -> Result<()> {
        let n = bytes.len().min(len);
        self.write_all(&bytes[..n])?;
        if n < len {
            self.write_all(&vec![0; len - n])?;
        }
        Ok(())
    }

    /// Writes an IEEE-754 float that is `len` bytes long.
    ///
    /// Four byte floats are narrowed from the `f64`.
    fn write_las_float(&mut self, value: f64, len: usize) -> Result<()> {
        match len {
            4 => self.write_f32::<LittleEndian>(value as f32)?,
            8 => self.write_f64::<LittleEndian>(value)?,
            _ => return Err(Error::FloatLength(len)),
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteLasExt for W {}

fn check_int_length(len: usize) -> Result<()> {
    if (1..=8).contains(&len) {
        Ok(())
    } else {
        Err(Error::IntLength(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn uint_widths() {
        for len in 1..=8 {
            let value = if len == 8 {
                u64::MAX
            } else {
                (1 << (8 * len)) - 1
            };
            let mut cursor = Cursor::new(Vec::<u8>::new());
            cursor.write_las_uint(value, len).unwrap();
            assert_eq!(len, cursor.get_ref().len());
            cursor.set_position(0);
            assert_eq!(value, cursor.read_las_uint(len).unwrap());
        }
    }

    #[test]
    fn uint_is_little_endian() {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.write_las_uint(0x01020304, 4).unwrap();
        assert_eq!(vec![4, 3, 2, 1], bytes);
    }

    #[test]
    fn uint_bad_length() {
        let mut bytes: &[u8] = &[0; 16];
        assert!(matches!(bytes.read_las_uint(0), Err(Error::IntLength(0))));
        assert!(matches!(bytes.read_las_uint(9), Err(Error::IntLength(9))));
        assert!(matches!(
            Vec::<u8>::new().write_las_uint(1, 9),
            Err(Error::IntLength(9))
        ));
    }

    #[test]
    fn uint_overflow() {
        assert!(matches!(
            Vec::<u8>::new().write_las_uint(65536, 2),
            Err(Error::IntOverflow { value: 65536, len: 2 })
        ));
    }

    #[test]
    fn uint_short_read() {
        let mut bytes: &[u8] = &[1, 2];
        assert!(bytes.read_las_uint(4).unwrap_err().is_truncation());
    }

    #[test]
    fn string_keeps_nuls() {
        let mut bytes: &[u8] = b"L\0A\0";
        assert_eq!(b"L\0A\0".to_vec(), bytes.read_las_string(4).unwrap());
    }

    #[test]
    fn string_pad_and_truncate() {
        for len in 0..10 {
            let mut bytes: Vec<u8> = Vec::new();
            bytes.write_las_string(b"LiDAR", len).unwrap();
            assert_eq!(len, bytes.len());
            if len <= 5 {
                assert_eq!(&b"LiDAR"[..len], &bytes[..]);
            } else {
                assert_eq!(b"LiDAR", &bytes[..5]);
                assert!(bytes[5..].iter().all(|&b| b == 0));
            }
        }
    }

    #[test]
    fn float_bits() {
        for value in [
            0.01,
            -0.0,
            1e-308,
            f64::MAX,
            f64::MIN_POSITIVE,
            f64::INFINITY,
            f64::from_bits(0x7ff8_dead_beef_0001),
        ] {
            let mut cursor = Cursor::new(Vec::<u8>::new());
            cursor.write_las_float(value, 8).unwrap();
            cursor.set_position(0);
            assert_eq!(value.to_bits(), cursor.read_las_float(8).unwrap().to_bits());
        }
    }

    #[test]
    fn float_four_bytes() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        cursor.write_las_float(1.5, 4).unwrap();
        assert_eq!(4, cursor.get_ref().len());
        cursor.set_position(0);
        assert_eq!(1.5, cursor.read_las_float(4).unwrap());
    }

    #[test]
    fn float_bad_length() {
        assert!(matches!(
            Vec::<u8>::new().write_las_float(1., 2),
            Err(Error::FloatLength(2))
        ));
    }
}
