//! Variable length records are used to store additional metadata not defined in the header.
//!
//! Vlrs sit between the header and the point records. Each one is a 54-byte [Vlr] header
//! followed by an opaque payload. The walker decodes the headers and hands back the byte range of
//! each payload, without reading it:
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Header, Version, Vlr, vlr};
//!
//! let payload = vec![1, 2, 3];
//! let vlr = Vlr::new("lascodec", 42, "some really important data", &payload).unwrap();
//!
//! let mut header = Header::new(Version::new(1, 2), 0).unwrap();
//! header.set("number_of_variable_length_records", 1u32).unwrap();
//! header.set("offset_to_point_data", 227 + vlr.len()).unwrap();
//! let mut cursor = Cursor::new(Vec::new());
//! header.write_to(&mut cursor).unwrap();
//! vlr.write_to(&mut cursor, &payload).unwrap();
//!
//! let vlrs = vlr::iterate_vlrs(&mut cursor, &header)
//!     .unwrap()
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let (vlr, range) = &vlrs[0];
//! assert_eq!(42, vlr.record_id());
//! assert_eq!(payload, vlr::read_payload(&mut cursor, range).unwrap());
//! ```

use crate::{Error, Header, Record, Result, field::Value, schema};
use log::{Level, log};
use std::{
    io::{Read, Seek, SeekFrom, Write},
    ops::Range,
};

const HEADER_SIZE: u64 = 54;

/// A variable length record header.
#[derive(Clone, Debug, PartialEq)]
pub struct Vlr {
    record: Record,
}

impl Vlr {
    /// Creates a vlr header for this payload.
    ///
    /// Fails if the payload is longer than `u16::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::Vlr;
    /// let vlr = Vlr::new("LASF_Projection", 2112, "", &[0; 10]).unwrap();
    /// assert_eq!(10, vlr.record_length_after_header());
    /// assert!(Vlr::new("LASF_Projection", 2112, "", &vec![0; 70_000]).is_err());
    /// ```
    pub fn new(user_id: &str, record_id: u16, description: &str, payload: &[u8]) -> Result<Vlr> {
        let length = u16::try_from(payload.len()).map_err(|_| Error::VlrTooLong(payload.len()))?;
        let mut record = Record::new(schema::vlr_schema());
        record.set("user_id", user_id)?;
        record.set("record_id", record_id)?;
        record.set("record_length_after_header", length)?;
        record.set("description", description)?;
        Ok(Vlr { record })
    }

    /// Reads a vlr header.
    pub fn read_from<R: Read + ?Sized>(read: &mut R) -> Result<Vlr> {
        Record::read_from(read, schema::vlr_schema()).map(|record| Vlr { record })
    }

    /// Writes this vlr header followed by its payload.
    ///
    /// The payload must be exactly `record_length_after_header` bytes.
    pub fn write_to<W: Write + ?Sized>(&self, write: &mut W, payload: &[u8]) -> Result<()> {
        if payload.len() != usize::from(self.record_length_after_header()) {
            return Err(Error::VlrPayloadLength {
                declared: self.record_length_after_header(),
                actual: payload.len(),
            });
        }
        self.record.write_to(write)?;
        write.write_all(payload)?;
        Ok(())
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Returns the value of a vlr header field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    /// Returns the user that created this record, e.g. "LASF_Projection".
    pub fn user_id(&self) -> String {
        self.record.string("user_id").unwrap_or_default()
    }

    /// Returns the type of this record, which depends on the user id.
    pub fn record_id(&self) -> u16 {
        self.record.int("record_id").unwrap_or(0) as u16
    }

    /// Returns the length of the payload.
    pub fn record_length_after_header(&self) -> u16 {
        self.record.int("record_length_after_header").unwrap_or(0) as u16
    }

    /// Returns the textual description of the payload.
    pub fn description(&self) -> String {
        self.record.string("description").unwrap_or_default()
    }

    /// Returns the total length of this vlr, header and payload.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::Vlr;
    /// let vlr = Vlr::new("", 0, "", &[1]).unwrap();
    /// assert_eq!(55, vlr.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        HEADER_SIZE + u64::from(self.record_length_after_header())
    }
}

/// An iterator over the variable length records of a las stream.
///
/// Created by [iterate_vlrs].
#[derive(Debug)]
pub struct VlrIterator<'a, R: Read + Seek> {
    read: &'a mut R,
    position: u64,
    end_of_stream: u64,
    offset_to_point_data: u64,
    expected: u32,
    found: u32,
    warned: bool,
    done: bool,
}

/// Seeks to the end of the header and returns an iterator over the vlrs.
///
/// Each item is a vlr header and the byte range of its payload. Payloads are skipped, not read.
/// If the stream ends before every declared vlr is complete, the iterator yields
/// [Error::TruncatedVlr] and stops.
pub fn iterate_vlrs<'a, R: Read + Seek>(
    read: &'a mut R,
    header: &Header,
) -> Result<VlrIterator<'a, R>> {
    let end_of_stream = read.seek(SeekFrom::End(0))?;
    let position = read.seek(SeekFrom::Start(u64::from(header.header_size())))?;
    Ok(VlrIterator {
        read,
        position,
        end_of_stream,
        offset_to_point_data: u64::from(header.offset_to_point_data()),
        expected: header.number_of_vlrs(),
        found: 0,
        warned: false,
        done: false,
    })
}

/// Reads the payload in `range`, leaving the stream where it was.
///
/// A range that ends before it starts is an error.
pub fn read_payload<R: Read + Seek>(read: &mut R, range: &Range<u64>) -> Result<Vec<u8>> {
    let len = range.end.checked_sub(range.start).ok_or(Error::ReversedRange {
        start: range.start,
        end: range.end,
    })?;
    let position = read.stream_position()?;
    let _ = read.seek(SeekFrom::Start(range.start))?;
    let mut payload = vec![0; len as usize];
    let result = read
        .read_exact(&mut payload)
        .map_err(|err| Error::from(err).truncated("vlr_payload"));
    let _ = read.seek(SeekFrom::Start(position))?;
    result.map(|()| payload)
}

impl<R: Read + Seek> VlrIterator<'_, R> {
    fn truncated(&self) -> Error {
        Error::TruncatedVlr {
            expected: self.expected,
            found: self.found,
        }
    }

    fn read_vlr(&mut self) -> Result<(Vlr, Range<u64>)> {
        let vlr = Vlr::read_from(&mut *self.read).map_err(|err| {
            if err.is_truncation() {
                self.truncated()
            } else {
                err
            }
        })?;
        let start = self.position + HEADER_SIZE;
        let end = start + u64::from(vlr.record_length_after_header());
        if end > self.end_of_stream {
            return Err(self.truncated());
        }
        self.position = self.read.seek(SeekFrom::Start(end))?;
        if end > self.offset_to_point_data && !self.warned {
            log!(
                Level::Warn,
                "vlr {} ends at byte {}, past the start of point data at {}",
                self.found,
                end,
                self.offset_to_point_data
            );
            self.warned = true;
        }
        Ok((vlr, start..end))
    }
}

impl<R: Read + Seek> Iterator for VlrIterator<'_, R> {
    type Item = Result<(Vlr, Range<u64>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.found >= self.expected {
            return None;
        }
        match self.read_vlr() {
            Ok(item) => {
                self.found += 1;
                Some(Ok(item))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
