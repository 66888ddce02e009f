//! Read and write [ASPRS LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//! point cloud data, versions 1.0 through 1.4 and point formats zero through six.
//!
//! Every las structure (the header, the points, and the variable length records) is a [Record]:
//! an ordered list of named fields described by a [Schema](schema::Schema). The schema for a
//! header depends on its version, and the schema for a point depends on its format. One routine
//! decodes and encodes them all.
//!
//! # Reading
//!
//! Create a `Reader` from a `Path`:
//!
//! ```no_run
//! use lascodec::Reader;
//! let reader = Reader::from_path("points.las").unwrap();
//! ```
//!
//! Or anything that implements `Read` and `Seek`:
//!
//! ```no_run
//! use std::io::BufReader;
//! use std::fs::File;
//! use lascodec::Reader;
//! let read = BufReader::new(File::open("points.las").unwrap());
//! let reader = Reader::new(read).unwrap();
//! ```
//!
//! ## Read points
//!
//! Points are read lazily, one record at a time:
//!
//! ```no_run
//! use lascodec::Reader;
//! let mut reader = Reader::from_path("points.las").unwrap();
//! let transforms = reader.header().transforms();
//! for wrapped_point in reader.points().unwrap() {
//!     let point = wrapped_point.unwrap();
//!     let coordinates = point.coordinates(&transforms);
//!     println!("Point coordinates: ({}, {}, {})", coordinates.x, coordinates.y, coordinates.z);
//!     if let Some(color) = point.color() {
//!         println!("Point color: red={}, green={}, blue={}",
//!             color.red,
//!             color.green,
//!             color.blue,
//!         );
//!     }
//! }
//! ```
//!
//! # Writing
//!
//! Create a `Writer` from a `Write`, a `Header`, and the vlrs to write after the header:
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Header, Version, Writer};
//! let header = Header::new(Version::new(1, 4), 6).unwrap();
//! let writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
//! ```
//!
//! ## Write points
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Header, Vector, Version, Writer, point::{Format, Point}};
//! let header = Header::new(Version::new(1, 2), 0).unwrap();
//! let transforms = header.transforms();
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
//! let mut point = Point::new(Format::new(0).unwrap());
//! point.set_coordinates(&Vector::new(1., 2., 3.), &transforms).unwrap();
//! writer.write_point(&point).unwrap();
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

pub mod feature;
pub mod field;
pub mod header;
pub mod io;
pub mod point;
pub mod reader;
pub mod schema;
pub mod sniff;
pub mod text;
pub mod vlr;
pub mod writer;

mod bounds;
mod color;
mod error;
mod record;
mod transform;
mod vector;
mod version;

pub use crate::{
    bounds::Bounds,
    color::Color,
    error::Error,
    feature::Feature,
    header::Header,
    point::Point,
    reader::Reader,
    record::Record,
    transform::Transform,
    vector::Vector,
    version::Version,
    vlr::Vlr,
    writer::Writer,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
