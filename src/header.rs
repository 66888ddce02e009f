//! Read and write las headers.
//!
//! A header is a [Record] over the header schema for its version, plus any bytes that sit between
//! the end of that schema and `header_size`. Those bytes are kept and written back untouched.
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Header, Version};
//!
//! let header = Header::new(Version::new(1, 4), 6).unwrap();
//! assert_eq!(375, header.header_size());
//! assert_eq!(30, header.point_data_record_length());
//!
//! let mut cursor = Cursor::new(Vec::new());
//! header.write_to(&mut cursor).unwrap();
//! assert_eq!(header, Header::read_from(&mut cursor).unwrap());
//! ```

use crate::{
    Bounds, Error, Record, Result, Transform, Vector, Version,
    feature::LargeFiles,
    field::Value,
    schema::{self, Schema},
    sniff::sniff,
};
use chrono::{Datelike, NaiveDate};
use log::{Level, log};
use std::io::{Read, Seek, SeekFrom, Write};
use uuid::Uuid;

const SIGNATURE: &[u8; 4] = b"LASF";

/// A las header.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    record: Record,
    padding: Vec<u8>,
}

impl Header {
    /// Creates a header for an empty file of this version and point format.
    ///
    /// Sizes, offsets, and the point data record length are filled in from the schemas. Scales
    /// are 0.001 and offsets are zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Header, Version};
    /// let header = Header::new(Version::new(1, 2), 3).unwrap();
    /// assert_eq!(227, header.offset_to_point_data());
    /// assert!(Header::new(Version::new(1, 2), 7).is_err());
    /// ```
    pub fn new(version: Version, format: u8) -> Result<Header> {
        let schema = schema::header_schema(version)?;
        let point_schema = schema::point_schema(format)?;
        let header_size = schema.len_in_bytes() as u64;
        let mut record = Record::new(schema);
        record.set("file_signature", "LASF")?;
        record.set("version_major", version.major)?;
        record.set("version_minor", version.minor)?;
        record.set(
            "generating_software",
            format!("lascodec {}", env!("CARGO_PKG_VERSION")),
        )?;
        record.set("header_size", header_size)?;
        record.set("offset_to_point_data", header_size)?;
        record.set("point_data_format_id", format)?;
        record.set(
            "point_data_record_length",
            point_schema.len_in_bytes() as u64,
        )?;
        let mut header = Header {
            record,
            padding: Vec::new(),
        };
        header.set_transforms(&Vector::new(
            Transform::default(),
            Transform::default(),
            Transform::default(),
        ))?;
        Ok(header)
    }

    /// Reads a header from the start of a stream.
    ///
    /// The signature is checked before anything else is decoded. The stream is left at the end of
    /// the header, including any padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use lascodec::{Error, Header};
    /// let mut cursor = Cursor::new(b"LASX".to_vec());
    /// assert!(matches!(Header::read_from(&mut cursor), Err(Error::InvalidSignature(_))));
    /// ```
    pub fn read_from<R: Read + Seek>(read: &mut R) -> Result<Header> {
        let _ = read.seek(SeekFrom::Start(0))?;
        check_signature(&mut *read)?;
        let (version, _) = sniff(&mut *read)?;
        let schema = schema::header_schema(version)?;
        let _ = read.seek(SeekFrom::Start(0))?;
        let record = Record::read_from(&mut *read, schema)?;
        let mut header = Header {
            record,
            padding: Vec::new(),
        };

        let schema_len = header.record.schema().len_in_bytes();
        let header_size = usize::from(header.header_size());
        if header_size < schema_len {
            log!(
                Level::Warn,
                "header size {} is smaller than the {} bytes of a las {} header",
                header_size,
                schema_len,
                version
            );
        } else if header_size > schema_len {
            let mut padding = vec![0; header_size - schema_len];
            read.read_exact(&mut padding)
                .map_err(|err| Error::from(err).truncated("header_padding"))?;
            header.padding = padding;
        }

        if let Some(extended) = header.record.int("extended_number_of_point_records") {
            let legacy = header.record.int("number_of_point_records").unwrap_or(0);
            if legacy != 0 && legacy != extended {
                log!(
                    Level::Warn,
                    "legacy point count {} disagrees with the extended point count {}",
                    legacy,
                    extended
                );
            }
        }
        Ok(header)
    }

    /// Writes this header, followed by its padding.
    pub fn write_to<W: Write + ?Sized>(&self, write: &mut W) -> Result<()> {
        self.record.write_to(write)?;
        write.write_all(&self.padding)?;
        Ok(())
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Returns the schema of this header.
    pub fn schema(&self) -> &Schema {
        self.record.schema()
    }

    /// Returns the value of a header field by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Header, Version, field::Value};
    /// let header = Header::new(Version::new(1, 2), 0).unwrap();
    /// assert_eq!(Some(&Value::Int(20)), header.get("point_data_record_length"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    /// Sets a header field by name.
    ///
    /// Setting `version_major` or `version_minor` moves the header onto that version's schema:
    /// fields the new version lacks are dropped and fields it adds start at zero. The version must
    /// be supported. No other fields are updated, so e.g. the header size is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Header, Version};
    /// let mut header = Header::new(Version::new(1, 4), 0).unwrap();
    /// header.set("version_minor", 2u8).unwrap();
    /// assert_eq!(227, header.schema().len_in_bytes());
    /// assert!(header.get("extended_number_of_point_records").is_none());
    /// assert!(header.set("version_minor", 9u8).is_err());
    /// assert_eq!(Version::new(1, 2), header.version());
    /// ```
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        if name != "version_major" && name != "version_minor" {
            return self.record.set(name, value);
        }
        let mut record = self.record.clone();
        record.set(name, value)?;
        let version = Version::new(
            record.int("version_major").unwrap_or_default() as u8,
            record.int("version_minor").unwrap_or_default() as u8,
        );
        let schema = schema::header_schema(version)?;
        self.record = record.to_schema(schema);
        Ok(())
    }

    /// Returns the bytes between the end of the header schema and `header_size`.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Returns the las version.
    pub fn version(&self) -> Version {
        Version::new(
            self.int("version_major") as u8,
            self.int("version_minor") as u8,
        )
    }

    /// Returns the file source id, which las 1.0 does not have.
    pub fn file_source_id(&self) -> Option<u16> {
        self.record.int("file_source_id").map(|n| n as u16)
    }

    /// Returns the project guid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Header, Version};
    /// use uuid::Uuid;
    /// let mut header = Header::new(Version::new(1, 2), 0).unwrap();
    /// assert!(header.guid().is_nil());
    /// let guid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
    /// header.set_guid(guid).unwrap();
    /// assert_eq!(guid, header.guid());
    /// ```
    pub fn guid(&self) -> Uuid {
        let mut data_4 = [0; 8];
        if let Some(bytes) = self.record.int_list("guid_data_4") {
            for (byte, &n) in data_4.iter_mut().zip(bytes) {
                *byte = n as u8;
            }
        }
        Uuid::from_fields(
            self.int("guid_data_1") as u32,
            self.int("guid_data_2") as u16,
            self.int("guid_data_3") as u16,
            &data_4,
        )
    }

    /// Sets the project guid.
    pub fn set_guid(&mut self, guid: Uuid) -> Result<()> {
        let (data_1, data_2, data_3, data_4) = guid.as_fields();
        self.record.set("guid_data_1", data_1)?;
        self.record.set("guid_data_2", data_2)?;
        self.record.set("guid_data_3", data_3)?;
        self.record.set(
            "guid_data_4",
            data_4.iter().map(|&n| u64::from(n)).collect::<Vec<_>>(),
        )
    }

    /// Returns the system identifier, up to the first nul.
    pub fn system_identifier(&self) -> String {
        self.record.string("system_identifier").unwrap_or_default()
    }

    /// Returns the generating software, up to the first nul.
    pub fn generating_software(&self) -> String {
        self.record.string("generating_software").unwrap_or_default()
    }

    /// Returns the file creation date, if the day and year make a valid date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use lascodec::{Header, Version};
    /// let mut header = Header::new(Version::new(1, 2), 0).unwrap();
    /// assert!(header.date().is_none());
    /// let date = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();
    /// header.set_date(Some(date)).unwrap();
    /// assert_eq!(Some(date), header.date());
    /// ```
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(
            self.int("file_creation_year") as i32,
            self.int("file_creation_day_of_year") as u32,
        )
    }

    /// Sets the file creation date, or zeroes it.
    ///
    /// Fails if the year is negative or larger than a u16, leaving the header unchanged.
    pub fn set_date(&mut self, date: Option<NaiveDate>) -> Result<()> {
        let (day, year) = match date {
            Some(date) => (
                date.ordinal(),
                u16::try_from(date.year()).map_err(|_| Error::YearOutOfRange(date.year()))?,
            ),
            None => (0, 0),
        };
        self.record.set("file_creation_day_of_year", day)?;
        self.record.set("file_creation_year", year)
    }

    /// Returns the size of the header, as declared by the header.
    pub fn header_size(&self) -> u16 {
        self.int("header_size") as u16
    }

    /// Returns the byte offset to the first point record.
    pub fn offset_to_point_data(&self) -> u32 {
        self.int("offset_to_point_data") as u32
    }

    /// Returns the number of variable length records.
    pub fn number_of_vlrs(&self) -> u32 {
        self.int("number_of_variable_length_records") as u32
    }

    /// Returns the point data record format id.
    pub fn point_format(&self) -> u8 {
        self.int("point_data_format_id") as u8
    }

    /// Returns the length of one point record, as declared by the header.
    pub fn point_data_record_length(&self) -> u16 {
        self.int("point_data_record_length") as u16
    }

    /// Returns the number of points.
    ///
    /// This is the larger of the legacy count and the las 1.4 extended count.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Header, Version};
    /// let mut header = Header::new(Version::new(1, 4), 6).unwrap();
    /// header.set("number_of_point_records", 3u32).unwrap();
    /// header.set("extended_number_of_point_records", 5_000_000_000u64).unwrap();
    /// assert_eq!(5_000_000_000, header.number_of_points());
    /// ```
    pub fn number_of_points(&self) -> u64 {
        let legacy = self.int("number_of_point_records");
        let extended = self
            .record
            .int("extended_number_of_point_records")
            .unwrap_or(0);
        legacy.max(extended)
    }

    /// Returns the number of points by return, fifteen entries for las 1.4 and five before.
    ///
    /// For las 1.4, the extended counts are used unless they are all zero.
    pub fn number_of_points_by_return(&self) -> Vec<u64> {
        let legacy = self
            .record
            .int_list("number_of_points_by_return")
            .unwrap_or_default();
        match self.record.int_list("extended_number_of_points_by_return") {
            Some(extended) if extended.iter().any(|&n| n > 0) => extended.to_vec(),
            Some(extended) => padded(legacy, extended.len()),
            None => legacy.to_vec(),
        }
    }

    /// Sets the point counts.
    ///
    /// Las 1.4 files always get the extended counts. The legacy counts are zeroed in las 1.4
    /// files if they can't hold the total, or if the point format is six or greater. Returns
    /// an error if an earlier version can't hold the total.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Header, Version};
    /// let mut header = Header::new(Version::new(1, 2), 0).unwrap();
    /// header.set_point_counts(3, &[2, 1]).unwrap();
    /// assert_eq!(3, header.number_of_points());
    /// assert_eq!(vec![2, 1, 0, 0, 0], header.number_of_points_by_return());
    /// ```
    pub fn set_point_counts(&mut self, total: u64, by_return: &[u64]) -> Result<()> {
        let large = self.version().supports::<LargeFiles>();
        let legacy = !large || (self.point_format() < 6 && total <= u64::from(u32::MAX));
        if legacy {
            self.record.set("number_of_point_records", total)?;
            self.record
                .set("number_of_points_by_return", padded(by_return, 5))?;
        } else {
            self.record.set("number_of_point_records", 0u32)?;
            self.record
                .set("number_of_points_by_return", vec![0u64; 5])?;
        }
        if large {
            self.record.set("extended_number_of_point_records", total)?;
            self.record
                .set("extended_number_of_points_by_return", padded(by_return, 15))?;
        }
        Ok(())
    }

    /// Returns the scale and offset for each of x, y, and z.
    pub fn transforms(&self) -> Vector<Transform> {
        Vector {
            x: Transform {
                scale: self.float("x_scale_factor"),
                offset: self.float("x_offset"),
            },
            y: Transform {
                scale: self.float("y_scale_factor"),
                offset: self.float("y_offset"),
            },
            z: Transform {
                scale: self.float("z_scale_factor"),
                offset: self.float("z_offset"),
            },
        }
    }

    /// Sets the scales and offsets.
    pub fn set_transforms(&mut self, transforms: &Vector<Transform>) -> Result<()> {
        self.record.set("x_scale_factor", transforms.x.scale)?;
        self.record.set("y_scale_factor", transforms.y.scale)?;
        self.record.set("z_scale_factor", transforms.z.scale)?;
        self.record.set("x_offset", transforms.x.offset)?;
        self.record.set("y_offset", transforms.y.offset)?;
        self.record.set("z_offset", transforms.z.offset)
    }

    /// Returns the bounds declared by the header.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: Vector::new(
                self.float("min_x"),
                self.float("min_y"),
                self.float("min_z"),
            ),
            max: Vector::new(
                self.float("max_x"),
                self.float("max_y"),
                self.float("max_z"),
            ),
        }
    }

    /// Sets the bounds.
    pub fn set_bounds(&mut self, bounds: &Bounds) -> Result<()> {
        self.record.set("min_x", bounds.min.x)?;
        self.record.set("min_y", bounds.min.y)?;
        self.record.set("min_z", bounds.min.z)?;
        self.record.set("max_x", bounds.max.x)?;
        self.record.set("max_y", bounds.max.y)?;
        self.record.set("max_z", bounds.max.z)
    }

    /// Returns the offset to the waveform data packet record, for las 1.3 and later.
    pub fn start_of_waveform_data_packet_record(&self) -> Option<u64> {
        self.record.int("start_of_waveform_data_packet_record")
    }

    /// Returns the offset to the first extended variable length record, for las 1.4.
    pub fn start_of_first_evlr(&self) -> Option<u64> {
        self.record.int("start_of_first_evlr")
    }

    /// Returns the number of extended variable length records, for las 1.4.
    pub fn number_of_evlrs(&self) -> Option<u32> {
        self.record.int("number_of_evlrs").map(|n| n as u32)
    }

    fn int(&self, name: &str) -> u64 {
        self.record.int(name).unwrap_or(0)
    }

    fn float(&self, name: &str) -> f64 {
        self.record.float(name).unwrap_or(0.)
    }
}

/// Reads the first four bytes of a stream and checks that they are "LASF".
///
/// # Examples
///
/// ```
/// use lascodec::header::check_signature;
/// assert!(check_signature(&b"LASF"[..]).is_ok());
/// assert!(check_signature(&b"LASX"[..]).is_err());
/// assert!(check_signature(&b"LA"[..]).is_err());
/// ```
pub fn check_signature<R: Read>(mut read: R) -> Result<()> {
    let mut signature = [0; 4];
    read.read_exact(&mut signature)
        .map_err(|err| Error::from(err).truncated("file_signature"))?;
    if &signature == SIGNATURE {
        Ok(())
    } else {
        Err(Error::InvalidSignature(signature))
    }
}

fn padded(values: &[u64], len: usize) -> Vec<u64> {
    values
        .iter()
        .copied()
        .chain(std::iter::repeat(0))
        .take(len)
        .collect()
}
