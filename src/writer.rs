//! Write las data.
//!
//! A `Writer` uses a `Header` for its configuration, and writes the vlrs it is given right after
//! the header:
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Header, Version, Vlr, Writer};
//! let header = Header::new(Version::new(1, 4), 6).unwrap();
//! let vlr = Vlr::new("lascodec", 1, "a payload", &[1, 2, 3]).unwrap();
//! let writer = Writer::new(Cursor::new(Vec::new()), header, &[(vlr, vec![1, 2, 3])]).unwrap();
//! ```
//!
//! Points must have the header's point format:
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Header, Version, Writer, point::{Format, Point}};
//! let header = Header::new(Version::new(1, 2), 1).unwrap();
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
//! writer.write_point(&Point::new(Format::new(1).unwrap())).unwrap();
//! assert!(writer.write_point(&Point::new(Format::new(0).unwrap())).is_err());
//! ```

use crate::{
    Bounds, Error, Header, Result, Vector, Vlr,
    point::{Format, Point},
};
use log::{Level, log};
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Seek, SeekFrom, Write},
    path::Path,
};

/// Writes las data.
///
/// The header is re-written when the writer closes, with the final point counts, the number of
/// points by return, and the bounds. For convenience, this is done via the `Drop` implementation
/// of the writer. A failure during the drop can only be logged, so use `close` explicitly if you
/// want to check for errors.
///
/// ```
/// use std::io::Cursor;
/// use lascodec::{Header, Version, Writer};
/// {
///     let header = Header::new(Version::new(1, 2), 0).unwrap();
///     let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
///     writer.close().unwrap();
/// } // <- `close` is not called again
/// ```
pub struct Writer<W: Write + Seek> {
    write: Option<W>,
    header: Header,
    format: Format,
    start: u64,
    bounds: Bounds,
    number_of_points: u64,
    number_of_points_by_return: [u64; 15],
    closed: bool,
}

impl<W: Write + Seek> Writer<W> {
    /// Creates a new writer and writes the header and vlrs.
    ///
    /// The header's vlr count, offset to point data, point data record length, point counts, and
    /// bounds are all overwritten.
    pub fn new(mut write: W, mut header: Header, vlrs: &[(Vlr, Vec<u8>)]) -> Result<Writer<W>> {
        let start = write.stream_position()?;
        let format = Format::new(header.point_format())?;
        let header_size = (header.schema().len_in_bytes() + header.padding().len()) as u64;
        let vlr_len: u64 = vlrs.iter().map(|(vlr, _)| vlr.len()).sum();
        header.set("header_size", header_size)?;
        header.set("number_of_variable_length_records", vlrs.len() as u64)?;
        header.set("offset_to_point_data", header_size + vlr_len)?;
        header.set("point_data_record_length", format.record_length())?;
        header.set_point_counts(0, &[])?;
        header.set_bounds(&zero_bounds())?;

        header.write_to(&mut write)?;
        for (vlr, payload) in vlrs {
            vlr.write_to(&mut write, payload)?;
        }
        Ok(Writer {
            write: Some(write),
            header,
            format,
            start,
            bounds: Bounds::default(),
            number_of_points: 0,
            number_of_points_by_return: [0; 15],
            closed: false,
        })
    }

    /// Returns a reference to this writer's header.
    ///
    /// The counts and bounds are only up to date after the writer is closed.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Writes a point.
    ///
    /// The point's format must match the header's.
    pub fn write_point(&mut self, point: &Point) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        if point.format() != self.format {
            return Err(Error::PointFormatMismatch {
                header: self.format.into(),
                point: point.format().into(),
            });
        }
        let write = self.write.as_mut().ok_or(Error::ClosedWriter)?;
        point.write_to(write)?;
        self.number_of_points += 1;
        let return_number = usize::from(point.return_number());
        if (1..=15).contains(&return_number) {
            self.number_of_points_by_return[return_number - 1] += 1;
        }
        self.bounds
            .grow(&point.coordinates(&self.header.transforms()));
        Ok(())
    }

    /// Writes all the points.
    pub fn write_points<'a, I: IntoIterator<Item = &'a Point>>(&mut self, points: I) -> Result<()> {
        for point in points {
            self.write_point(point)?;
        }
        Ok(())
    }

    /// Closes this writer, re-writing the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lascodec::{Header, Version, Writer};
    /// let header = Header::new(Version::new(1, 2), 0).unwrap();
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
    /// writer.close().unwrap();
    /// assert!(writer.close().is_err());
    /// ```
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        self.header
            .set_point_counts(self.number_of_points, &self.number_of_points_by_return)?;
        if self.bounds.is_empty() {
            self.header.set_bounds(&zero_bounds())?;
        } else {
            self.header.set_bounds(&self.bounds)?;
        }
        let write = self.write.as_mut().ok_or(Error::ClosedWriter)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        self.header.write_to(write)?;
        let _ = write.seek(SeekFrom::End(0))?;
        write.flush()?;
        self.closed = true;
        Ok(())
    }

    /// Closes this writer and returns its inner `Write`, seeked to the beginning of the las data.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lascodec::{Header, Version, Writer};
    /// let header = Header::new(Version::new(1, 2), 0).unwrap();
    /// let writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
    /// let cursor = writer.into_inner().unwrap();
    /// assert_eq!(227, cursor.get_ref().len());
    /// ```
    pub fn into_inner(mut self) -> Result<W> {
        if !self.closed {
            self.close()?;
        }
        let mut write = self.write.take().ok_or(Error::ClosedWriter)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        Ok(write)
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a new writer for a path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lascodec::{Header, Version, Writer};
    /// let header = Header::new(Version::new(1, 2), 0).unwrap();
    /// let writer = Writer::from_path("points.las", header, &[]).unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        header: Header,
        vlrs: &[(Vlr, Vec<u8>)],
    ) -> Result<Writer<BufWriter<File>>> {
        File::create(path)
            .map_err(Error::from)
            .and_then(|file| Writer::new(BufWriter::new(file), header, vlrs))
    }
}

impl<W: Write + Seek> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("header", &self.header)
            .field("number_of_points", &self.number_of_points)
            .field("closed", &self.closed)
            .finish()
    }
}

impl<W: Write + Seek> Drop for Writer<W> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(err) = self.close() {
                log!(Level::Error, "error when closing the writer: {}", err);
            }
        }
    }
}

fn zero_bounds() -> Bounds {
    Bounds {
        min: Vector::default(),
        max: Vector::default(),
    }
}
