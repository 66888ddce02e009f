//! Read las data.
//!
//! A [Reader] decodes the header once, then hands out iterators over the vlrs and points. If
//! you're reading from a file, you'll want a `BufRead`, which `Reader::from_path` sets up for you:
//!
//! ```no_run
//! use lascodec::Reader;
//! let mut reader = Reader::from_path("points.las").unwrap();
//! println!("{} points", reader.header().number_of_points());
//! for point in reader.points().unwrap() {
//!     let point = point.unwrap();
//!     println!("{}", point.intensity());
//! }
//! ```

use crate::{
    Error, Header, Result, Vlr,
    header::check_signature,
    point::{self, PointIterator},
    vlr::{self, VlrIterator},
};
use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    ops::Range,
    path::Path,
};

/// Reads las data from a seekable stream.
#[derive(Debug)]
pub struct Reader<R: Read + Seek> {
    read: R,
    header: Header,
}

impl<R: Read + Seek> Reader<R> {
    /// Creates a new reader, decoding the header.
    ///
    /// This does *not* wrap the `Read` in a `BufRead`, so if you're concerned about performance
    /// you should do that wrapping yourself (or use `from_path`).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lascodec::{Header, Reader, Version, Writer};
    /// let header = Header::new(Version::new(1, 4), 6).unwrap();
    /// let writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
    /// let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// assert_eq!(Version::new(1, 4), reader.header().version());
    /// ```
    pub fn new(mut read: R) -> Result<Reader<R>> {
        let header = Header::read_from(&mut read)?;
        Ok(Reader { read, header })
    }

    /// Returns a reference to this reader's header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns an iterator over the points, starting from the first one.
    pub fn points(&mut self) -> Result<PointIterator<'_, R>> {
        point::iterate_points(&mut self.read, &self.header)
    }

    /// Returns an iterator over the vlr headers and their payload ranges.
    pub fn vlrs(&mut self) -> Result<VlrIterator<'_, R>> {
        vlr::iterate_vlrs(&mut self.read, &self.header)
    }

    /// Reads the payload of a vlr.
    pub fn vlr_payload(&mut self, range: &Range<u64>) -> Result<Vec<u8>> {
        vlr::read_payload(&mut self.read, range)
    }

    /// Reads every vlr along with its payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lascodec::{Header, Reader, Version, Vlr, Writer};
    /// let vlr = Vlr::new("lascodec", 1, "", &[1, 2]).unwrap();
    /// let header = Header::new(Version::new(1, 2), 0).unwrap();
    /// let writer = Writer::new(Cursor::new(Vec::new()), header, &[(vlr, vec![1, 2])]).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// let vlrs = reader.read_vlrs().unwrap();
    /// assert_eq!(vec![1, 2], vlrs[0].1);
    /// ```
    pub fn read_vlrs(&mut self) -> Result<Vec<(Vlr, Vec<u8>)>> {
        let vlrs = self.vlrs()?.collect::<Result<Vec<_>>>()?;
        vlrs.into_iter()
            .map(|(vlr, range)| Ok((vlr, self.vlr_payload(&range)?)))
            .collect()
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> R {
        self.read
    }
}

impl Reader<BufReader<File>> {
    /// Creates a new reader from a path.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance reasons, and is closed
    /// when the reader is dropped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| Reader::new(BufReader::new(file)))
    }
}

/// Returns true if the file at this path starts with the las signature.
///
/// Files that are too short to hold a signature are not las files. Other io errors, e.g. a missing
/// file, are returned.
pub fn is_las_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let file = File::open(path)?;
    match check_signature(BufReader::new(file)) {
        Ok(()) => Ok(true),
        Err(Error::InvalidSignature(_)) | Err(Error::TruncatedRead { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Version, Writer,
        point::{Format, Point},
    };
    use std::io::Cursor;

    fn cursor(format: u8, n: i32) -> Cursor<Vec<u8>> {
        let header = Header::new(Version::new(1, 2), format).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
        for i in 0..n {
            let mut point = Point::new(Format::new(format).unwrap());
            point.set("intensity", i as u16).unwrap();
            writer.write_point(&point).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn points_restart() {
        let mut reader = Reader::new(cursor(1, 3)).unwrap();
        let first: Vec<u16> = reader
            .points()
            .unwrap()
            .map(|point| point.unwrap().intensity())
            .collect();
        let second: Vec<u16> = reader
            .points()
            .unwrap()
            .map(|point| point.unwrap().intensity())
            .collect();
        assert_eq!(vec![0, 1, 2], first);
        assert_eq!(first, second);
    }

    #[test]
    fn vlrs_then_points() {
        let mut reader = Reader::new(cursor(0, 1)).unwrap();
        assert_eq!(0, reader.vlrs().unwrap().count());
        assert_eq!(1, reader.points().unwrap().count());
    }

    #[test]
    fn invalid_signature() {
        assert!(matches!(
            Reader::new(Cursor::new(b"LASX and then some".to_vec())),
            Err(Error::InvalidSignature(_))
        ));
    }
}
