//! Three-dimensional points with additional attributes.
//!
//! A [Point] is a [Record] over the schema of its [Format]. Coordinates are stored as raw i32s,
//! use [Point::coordinates] with the header's transforms to get real-world values:
//!
//! ```
//! use lascodec::{Header, Version, Vector, point::{Format, Point}};
//!
//! let header = Header::new(Version::new(1, 2), 0).unwrap();
//! let mut point = Point::new(Format::new(0).unwrap());
//! point.set_coordinates(&Vector::new(1.5, -2., 3.), &header.transforms()).unwrap();
//! assert_eq!(1500, point.x());
//! assert_eq!(-2000, point.y());
//! assert_eq!(3., point.coordinates(&header.transforms()).z);
//! ```

mod format;
mod scan_direction;

pub use self::{format::Format, scan_direction::ScanDirection};

use crate::{
    Color, Error, Header, Record, Result, Transform, Vector, field::Value, schema::Schema,
};
use log::{Level, log};
use std::io::{Read, Seek, SeekFrom, Write};

/// The bit layout of the flags field.
#[derive(Clone, Copy, Debug)]
struct Flags {
    return_number: (u32, u32),
    number_of_returns: (u32, u32),
    classification_flags: Option<(u32, u32)>,
    scanner_channel: Option<(u32, u32)>,
    scan_direction: u32,
    edge_of_flight_line: u32,
}

const LEGACY_FLAGS: Flags = Flags {
    return_number: (0, 3),
    number_of_returns: (3, 3),
    classification_flags: None,
    scanner_channel: None,
    scan_direction: 6,
    edge_of_flight_line: 7,
};

const EXTENDED_FLAGS: Flags = Flags {
    return_number: (0, 4),
    number_of_returns: (4, 4),
    classification_flags: Some((8, 4)),
    scanner_channel: Some((12, 2)),
    scan_direction: 14,
    edge_of_flight_line: 15,
};

/// A las point.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    format: Format,
    record: Record,
}

impl Point {
    /// Creates a point with every field set to zero.
    pub fn new(format: Format) -> Point {
        Point {
            format,
            record: Record::new(format.schema()),
        }
    }

    /// Reads one point record.
    ///
    /// Only the bytes of the format's schema are read.
    pub fn read_from<R: Read + ?Sized>(read: &mut R, format: Format) -> Result<Point> {
        Point::read_with_schema(read, format, format.schema())
    }

    fn read_with_schema<R: Read + ?Sized>(
        read: &mut R,
        format: Format,
        schema: Schema,
    ) -> Result<Point> {
        Record::read_from(read, schema).map(|record| Point { format, record })
    }

    /// Writes one point record.
    pub fn write_to<W: Write + ?Sized>(&self, write: &mut W) -> Result<()> {
        self.record.write_to(write)
    }

    /// Returns this point's format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Returns the value of a point field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    /// Sets a point field by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::point::{Format, Point};
    /// let mut point = Point::new(Format::new(0).unwrap());
    /// point.set("intensity", 42u16).unwrap();
    /// assert_eq!(42, point.intensity());
    /// assert!(point.set("gps_time", 1.).is_err());
    /// ```
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        self.record.set(name, value)
    }

    /// Returns the raw x value.
    pub fn x(&self) -> i32 {
        self.int("x") as u32 as i32
    }

    /// Returns the raw y value.
    pub fn y(&self) -> i32 {
        self.int("y") as u32 as i32
    }

    /// Returns the raw z value.
    pub fn z(&self) -> i32 {
        self.int("z") as u32 as i32
    }

    /// Returns the raw x, y, and z values.
    pub fn raw_coordinates(&self) -> Vector<i32> {
        Vector::new(self.x(), self.y(), self.z())
    }

    /// Sets the raw x, y, and z values.
    pub fn set_raw_coordinates(&mut self, raw: &Vector<i32>) -> Result<()> {
        self.record.set("x", raw.x as u32)?;
        self.record.set("y", raw.y as u32)?;
        self.record.set("z", raw.z as u32)
    }

    /// Returns the real-world coordinates, `raw * scale + offset` for each axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Transform, Vector, point::{Format, Point}};
    /// let mut point = Point::new(Format::new(3).unwrap());
    /// point.set_raw_coordinates(&Vector::new(100, 200, -300)).unwrap();
    /// let transform = Transform { scale: 0.01, offset: 0. };
    /// let coordinates = point.coordinates(&Vector::new(transform, transform, transform));
    /// assert_eq!(1., coordinates.x);
    /// assert_eq!(2., coordinates.y);
    /// assert_eq!(-3., coordinates.z);
    /// ```
    pub fn coordinates(&self, transforms: &Vector<Transform>) -> Vector<f64> {
        Vector {
            x: transforms.x.direct(self.x()),
            y: transforms.y.direct(self.y()),
            z: transforms.z.direct(self.z()),
        }
    }

    /// Sets the raw values from real-world coordinates.
    ///
    /// Fails, and leaves the point unchanged, if any scaled value does not fit in an i32.
    pub fn set_coordinates(
        &mut self,
        coordinates: &Vector<f64>,
        transforms: &Vector<Transform>,
    ) -> Result<()> {
        let raw = Vector {
            x: transforms.x.inverse(coordinates.x)?,
            y: transforms.y.inverse(coordinates.y)?,
            z: transforms.z.inverse(coordinates.z)?,
        };
        self.set_raw_coordinates(&raw)
    }

    /// Returns the intensity.
    pub fn intensity(&self) -> u16 {
        self.int("intensity") as u16
    }

    /// Returns the return number.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::point::{Format, Point};
    /// let mut point = Point::new(Format::new(1).unwrap());
    /// point.set("flags", 0b1001_0010u8).unwrap();
    /// assert_eq!(2, point.return_number());
    /// assert_eq!(2, point.number_of_returns());
    /// assert!(point.is_edge_of_flight_line());
    /// ```
    pub fn return_number(&self) -> u8 {
        let (offset, width) = self.flag_layout().return_number;
        self.bits(offset, width)
    }

    /// Sets the return number.
    pub fn set_return_number(&mut self, return_number: u8) -> Result<()> {
        let (offset, width) = self.flag_layout().return_number;
        self.set_bits("return_number", offset, width, return_number)
    }

    /// Returns the number of returns of this point's pulse.
    pub fn number_of_returns(&self) -> u8 {
        let (offset, width) = self.flag_layout().number_of_returns;
        self.bits(offset, width)
    }

    /// Sets the number of returns.
    pub fn set_number_of_returns(&mut self, number_of_returns: u8) -> Result<()> {
        let (offset, width) = self.flag_layout().number_of_returns;
        self.set_bits("number_of_returns", offset, width, number_of_returns)
    }

    /// Returns the direction of the scanner mirror.
    pub fn scan_direction(&self) -> ScanDirection {
        ScanDirection::from(self.bits(self.flag_layout().scan_direction, 1) == 1)
    }

    /// Sets the direction of the scanner mirror.
    pub fn set_scan_direction(&mut self, scan_direction: ScanDirection) -> Result<()> {
        let offset = self.flag_layout().scan_direction;
        self.set_bits("scan_direction", offset, 1, bool::from(scan_direction).into())
    }

    /// Is this point on the edge of a flight line?
    pub fn is_edge_of_flight_line(&self) -> bool {
        self.bits(self.flag_layout().edge_of_flight_line, 1) == 1
    }

    /// Sets the edge of flight line flag.
    pub fn set_edge_of_flight_line(&mut self, edge: bool) -> Result<()> {
        let offset = self.flag_layout().edge_of_flight_line;
        self.set_bits("edge_of_flight_line", offset, 1, edge.into())
    }

    /// Returns the synthetic, key-point, withheld, and overlap bits of the extended formats.
    pub fn classification_flags(&self) -> Option<u8> {
        self.flag_layout()
            .classification_flags
            .map(|(offset, width)| self.bits(offset, width))
    }

    /// Returns the scanner channel of the extended formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::point::{Format, Point};
    /// let mut point = Point::new(Format::new(6).unwrap());
    /// point.set("flags", 0x2f35u16).unwrap();
    /// assert_eq!(5, point.return_number());
    /// assert_eq!(3, point.number_of_returns());
    /// assert_eq!(Some(0xf), point.classification_flags());
    /// assert_eq!(Some(2), point.scanner_channel());
    /// assert!(Point::new(Format::new(1).unwrap()).scanner_channel().is_none());
    /// ```
    pub fn scanner_channel(&self) -> Option<u8> {
        self.flag_layout()
            .scanner_channel
            .map(|(offset, width)| self.bits(offset, width))
    }

    /// Returns the classification.
    pub fn classification(&self) -> u8 {
        self.int("classification") as u8
    }

    /// Returns the raw scan angle.
    ///
    /// This is the signed scan angle rank in degrees for formats zero through five, and the
    /// signed scan angle in 0.006 degree increments for format six.
    pub fn scan_angle(&self) -> i16 {
        if self.format.is_extended() {
            self.int("scan_angle") as u16 as i16
        } else {
            i16::from(self.int("scan_angle_rank") as u8 as i8)
        }
    }

    /// Returns the scan angle in degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::point::{Format, Point};
    /// let mut point = Point::new(Format::new(0).unwrap());
    /// point.set_scan_angle(-12).unwrap();
    /// assert_eq!(-12., point.scan_angle_degrees());
    /// assert!(point.set_scan_angle(200).is_err());
    ///
    /// let mut point = Point::new(Format::new(6).unwrap());
    /// point.set_scan_angle(-1000).unwrap();
    /// assert!((point.scan_angle_degrees() + 6.).abs() < 1e-9);
    /// ```
    pub fn scan_angle_degrees(&self) -> f64 {
        if self.format.is_extended() {
            f64::from(self.scan_angle()) * 0.006
        } else {
            f64::from(self.scan_angle())
        }
    }

    /// Sets the raw scan angle.
    ///
    /// Fails for formats zero through five if the angle does not fit in an i8.
    pub fn set_scan_angle(&mut self, scan_angle: i16) -> Result<()> {
        if self.format.is_extended() {
            self.record.set("scan_angle", scan_angle as u16)
        } else {
            let rank = i8::try_from(scan_angle).map_err(|_| Error::IntOverflow {
                value: u64::from(scan_angle as u16),
                len: 1,
            })?;
            self.record.set("scan_angle_rank", rank as u8)
        }
    }

    /// Returns the user data.
    pub fn user_data(&self) -> u8 {
        self.int("user_data") as u8
    }

    /// Returns the point source id.
    pub fn point_source_id(&self) -> u16 {
        self.int("point_source_id") as u16
    }

    /// Returns the gps time, if this format has one.
    pub fn gps_time(&self) -> Option<f64> {
        self.record.float("gps_time")
    }

    /// Sets the gps time.
    pub fn set_gps_time(&mut self, gps_time: f64) -> Result<()> {
        self.record.set("gps_time", gps_time)
    }

    /// Returns the color, if this format has one.
    pub fn color(&self) -> Option<Color> {
        Some(Color::new(
            self.record.int("red")? as u16,
            self.record.int("green")? as u16,
            self.record.int("blue")? as u16,
        ))
    }

    /// Sets the color.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        self.record.set("red", color.red)?;
        self.record.set("green", color.green)?;
        self.record.set("blue", color.blue)
    }

    fn int(&self, name: &str) -> u64 {
        self.record.int(name).unwrap_or(0)
    }

    fn flag_layout(&self) -> Flags {
        if self.format.is_extended() {
            EXTENDED_FLAGS
        } else {
            LEGACY_FLAGS
        }
    }

    fn bits(&self, offset: u32, width: u32) -> u8 {
        ((self.int("flags") >> offset) & ((1 << width) - 1)) as u8
    }

    fn set_bits(&mut self, field: &'static str, offset: u32, width: u32, value: u8) -> Result<()> {
        let mask = (1u64 << width) - 1;
        if u64::from(value) > mask {
            return Err(Error::BitField {
                field,
                value,
                bits: width,
            });
        }
        let flags = (self.int("flags") & !(mask << offset)) | (u64::from(value) << offset);
        self.record.set("flags", flags)
    }
}

/// An iterator over the point records of a las stream.
///
/// Created by [iterate_points]. Yields exactly as many points as the header declares, or stops
/// after the first error.
#[derive(Debug)]
pub struct PointIterator<'a, R: Read + Seek> {
    read: &'a mut R,
    format: Format,
    schema: Schema,
    extra_bytes: i64,
    remaining: u64,
    done: bool,
}

/// Seeks to the header's point data and returns an iterator over its points.
///
/// Calling this again with the same header restarts from the first point. If the header's point
/// data record length is longer than the point format, the extra bytes at the end of each record
/// are skipped.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use lascodec::{Header, Version, point::{self, Format, Point}};
///
/// let mut header = Header::new(Version::new(1, 2), 0).unwrap();
/// header.set_point_counts(2, &[2]).unwrap();
/// let mut cursor = Cursor::new(Vec::new());
/// header.write_to(&mut cursor).unwrap();
/// let point = Point::new(Format::new(0).unwrap());
/// point.write_to(&mut cursor).unwrap();
/// point.write_to(&mut cursor).unwrap();
///
/// let points = point::iterate_points(&mut cursor, &header).unwrap();
/// assert_eq!(2, points.count());
/// ```
pub fn iterate_points<'a, R: Read + Seek>(
    read: &'a mut R,
    header: &Header,
) -> Result<PointIterator<'a, R>> {
    let format = Format::new(header.point_format())?;
    let length = header.point_data_record_length();
    let required = format.record_length();
    if length < required {
        return Err(Error::PointDataRecordLength {
            format: format.into(),
            length,
            required,
        });
    } else if length > required {
        log!(
            Level::Debug,
            "skipping {} extra bytes after each point",
            length - required
        );
    }
    let _ = read.seek(SeekFrom::Start(u64::from(header.offset_to_point_data())))?;
    Ok(PointIterator {
        read,
        format,
        schema: format.schema(),
        extra_bytes: i64::from(length - required),
        remaining: header.number_of_points(),
        done: false,
    })
}

impl<R: Read + Seek> Iterator for PointIterator<'_, R> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Result<Point>> {
        if self.done || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let result = Point::read_with_schema(&mut *self.read, self.format, self.schema.clone())
            .and_then(|point| {
                if self.extra_bytes > 0 {
                    let _ = self.read.seek(SeekFrom::Current(self.extra_bytes))?;
                }
                Ok(point)
            });
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, usize::try_from(self.remaining).ok())
        }
    }
}
