//! Write points as delimited text, one line per point.
//!
//! Columns are the fields of the point format, in schema order. By default, x, y, and z are
//! scaled into real-world coordinates and the first line names the columns:
//!
//! ```
//! use lascodec::{Header, Transform, Vector, Version, point::{Format, Point}, text::{TextOptions, TextWriter}};
//!
//! let mut header = Header::new(Version::new(1, 2), 0).unwrap();
//! let transform = Transform { scale: 0.01, offset: 0. };
//! header.set_transforms(&Vector::new(transform, transform, transform)).unwrap();
//! let mut point = Point::new(Format::new(0).unwrap());
//! point.set_raw_coordinates(&Vector::new(100, 200, 300)).unwrap();
//!
//! let options = TextOptions::default().with_header_line(false);
//! let mut writer = TextWriter::new(Vec::new(), &header, options);
//! writer.write_point(&point).unwrap();
//! let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
//! assert!(text.starts_with("1.00,2.00,3.00,0,"));
//! ```

use crate::{Header, Reader, Result, Transform, Vector, point::Point};
use std::io::{Read, Seek, Write};

/// Options for [TextWriter].
#[derive(Clone, Debug, PartialEq)]
pub struct TextOptions {
    delimiter: String,
    header_line: bool,
    scaled_coordinates: bool,
}

impl TextOptions {
    /// Sets the column delimiter, a comma by default.
    pub fn with_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Should the first line name the columns?
    pub fn with_header_line(mut self, header_line: bool) -> Self {
        self.header_line = header_line;
        self
    }

    /// Should x, y, and z be written as real-world coordinates instead of raw integers?
    pub fn with_scaled_coordinates(mut self, scaled_coordinates: bool) -> Self {
        self.scaled_coordinates = scaled_coordinates;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            delimiter: ",".to_string(),
            header_line: true,
            scaled_coordinates: true,
        }
    }
}

/// Writes points as delimited text.
#[derive(Debug)]
pub struct TextWriter<W: Write> {
    write: W,
    options: TextOptions,
    transforms: Vector<Transform>,
    wrote_header_line: bool,
}

impl<W: Write> TextWriter<W> {
    /// Creates a new text writer, using the header's transforms for scaled coordinates.
    pub fn new(write: W, header: &Header, options: TextOptions) -> TextWriter<W> {
        TextWriter {
            write,
            options,
            transforms: header.transforms(),
            wrote_header_line: false,
        }
    }

    /// Writes one point as one line.
    pub fn write_point(&mut self, point: &Point) -> Result<()> {
        if self.options.header_line && !self.wrote_header_line {
            let names: Vec<&str> = point.record().iter().map(|(field, _)| field.name).collect();
            writeln!(self.write, "{}", names.join(self.options.delimiter.as_str()))?;
            self.wrote_header_line = true;
        }
        let coordinates = point.coordinates(&self.transforms);
        for (i, (field, value)) in point.record().iter().enumerate() {
            if i > 0 {
                write!(self.write, "{}", self.options.delimiter)?;
            }
            let scaled = match field.name {
                "x" => Some((coordinates.x, self.transforms.x.scale)),
                "y" => Some((coordinates.y, self.transforms.y.scale)),
                "z" => Some((coordinates.z, self.transforms.z.scale)),
                _ => None,
            };
            match scaled {
                Some((coordinate, scale)) if self.options.scaled_coordinates => {
                    write!(self.write, "{:.*}", decimals(scale), coordinate)?
                }
                _ if field.name == "x" => write!(self.write, "{}", point.x())?,
                _ if field.name == "y" => write!(self.write, "{}", point.y())?,
                _ if field.name == "z" => write!(self.write, "{}", point.z())?,
                _ if field.name.starts_with("scan_angle") => {
                    write!(self.write, "{}", point.scan_angle())?
                }
                _ => write!(self.write, "{}", value)?,
            }
        }
        writeln!(self.write)?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.write.flush()?;
        Ok(self.write)
    }
}

/// Writes every point of a reader as text, returning the number of points written.
///
/// Stops at the first error.
pub fn write_points<R: Read + Seek, W: Write>(
    reader: &mut Reader<R>,
    write: W,
    options: TextOptions,
) -> Result<u64> {
    let mut writer = TextWriter::new(write, reader.header(), options);
    let mut count = 0;
    for point in reader.points()? {
        writer.write_point(&point?)?;
        count += 1;
    }
    let _ = writer.into_inner()?;
    Ok(count)
}

/// The number of decimal places that a scale factor resolves, at most fifteen.
fn decimals(scale: f64) -> usize {
    let scale = scale.abs();
    if !scale.is_finite() || scale == 0. {
        return 0;
    }
    (0..MAX_DECIMALS)
        .find(|&d| {
            let shifted = scale * 10f64.powi(d as i32);
            (shifted - shifted.round()).abs() < 1e-6
        })
        .unwrap_or(MAX_DECIMALS)
}

const MAX_DECIMALS: usize = 15;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Version, Writer, point::Format};
    use std::io::Cursor;

    fn reader() -> Reader<Cursor<Vec<u8>>> {
        let header = Header::new(Version::new(1, 2), 1).unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
        let transforms = writer.header().transforms();
        for x in [1.5, -2.25] {
            let mut point = Point::new(Format::new(1).unwrap());
            point
                .set_coordinates(&Vector::new(x, 0., 10.), &transforms)
                .unwrap();
            point.set_gps_time(0.5).unwrap();
            writer.write_point(&point).unwrap();
        }
        Reader::new(writer.into_inner().unwrap()).unwrap()
    }

    fn lines(options: TextOptions) -> Vec<String> {
        let mut reader = reader();
        let mut bytes = Vec::<u8>::new();
        assert_eq!(2, write_points(&mut reader, &mut bytes, options).unwrap());
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn default_options() {
        let lines = lines(TextOptions::default());
        assert_eq!(3, lines.len());
        assert_eq!(
            "x,y,z,intensity,flags,classification,scan_angle_rank,user_data,point_source_id,gps_time",
            lines[0]
        );
        assert_eq!("1.500,0.000,10.000,0,0,0,0,0,0,0.5", lines[1]);
        assert_eq!("-2.250,0.000,10.000,0,0,0,0,0,0,0.5", lines[2]);
    }

    #[test]
    fn raw_coordinates() {
        let options = TextOptions::default()
            .with_header_line(false)
            .with_scaled_coordinates(false)
            .with_delimiter("\t");
        let lines = lines(options);
        assert_eq!(2, lines.len());
        assert_eq!("-2250\t0\t10000\t0\t0\t0\t0\t0\t0\t0.5", lines[1]);
    }

    #[test]
    fn decimal_places() {
        assert_eq!(3, decimals(0.001));
        assert_eq!(2, decimals(0.01));
        assert_eq!(1, decimals(0.5));
        assert_eq!(0, decimals(1.));
        assert_eq!(0, decimals(0.));
        assert_eq!(3, decimals(0.025));
        assert_eq!(2, decimals(0.25));
        assert_eq!(0, decimals(2.5e3));
        assert_eq!(MAX_DECIMALS, decimals(1. / 3.));
    }

    #[test]
    fn scale_that_is_not_a_power_of_ten() {
        let mut header = Header::new(Version::new(1, 2), 0).unwrap();
        let transform = Transform {
            scale: 0.025,
            offset: 0.,
        };
        header
            .set_transforms(&Vector::new(transform, transform, transform))
            .unwrap();
        let mut point = Point::new(Format::new(0).unwrap());
        point.set_raw_coordinates(&Vector::new(1, 3, -7)).unwrap();
        let options = TextOptions::default().with_header_line(false);
        let mut writer = TextWriter::new(Vec::new(), &header, options);
        writer.write_point(&point).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.starts_with("0.025,0.075,-0.175,0,"));
    }
}
