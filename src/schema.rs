//! Field tables for every supported header version and point format.
//!
//! Schemas are assembled from fixed blocks, so the field order here *is* the byte order on disk:
//!
//! ```
//! use lascodec::{Version, schema};
//!
//! let header = schema::header_schema(Version::new(1, 4)).unwrap();
//! assert_eq!(375, header.len_in_bytes());
//! let point = schema::point_schema(3).unwrap();
//! assert_eq!(34, point.len_in_bytes());
//! assert_eq!(54, schema::vlr_schema().len_in_bytes());
//! ```

use crate::{
    Result, Version,
    feature::{Evlrs, FileSourceId, LargeFiles, Waveforms},
    field::{
        Field,
        Kind::{Float, Int, IntList, String},
    },
    point::Format,
};
use std::sync::Arc;

/// The byte offset of the major version in every las header.
pub const VERSION_MAJOR_OFFSET: u64 = 24;

/// The byte offset of the point data record format in every las header.
pub const POINT_FORMAT_OFFSET: u64 = 104;

const SIGNATURE: &[Field] = &[Field::new("file_signature", String(4))];

const RESERVED: &[Field] = &[Field::new("reserved", Int(4))];

const FILE_SOURCE_ID: &[Field] = &[
    Field::new("file_source_id", Int(2)),
    Field::new("global_encoding", Int(2)),
];

const COMMON: &[Field] = &[
    Field::new("guid_data_1", Int(4)),
    Field::new("guid_data_2", Int(2)),
    Field::new("guid_data_3", Int(2)),
    Field::new("guid_data_4", IntList(8, 1)),
    Field::new("version_major", Int(1)),
    Field::new("version_minor", Int(1)),
    Field::new("system_identifier", String(32)),
    Field::new("generating_software", String(32)),
    Field::new("file_creation_day_of_year", Int(2)),
    Field::new("file_creation_year", Int(2)),
    Field::new("header_size", Int(2)),
    Field::new("offset_to_point_data", Int(4)),
    Field::new("number_of_variable_length_records", Int(4)),
    Field::new("point_data_format_id", Int(1)),
    Field::new("point_data_record_length", Int(2)),
    Field::new("number_of_point_records", Int(4)),
    Field::new("number_of_points_by_return", IntList(5, 4)),
    Field::new("x_scale_factor", Float(8)),
    Field::new("y_scale_factor", Float(8)),
    Field::new("z_scale_factor", Float(8)),
    Field::new("x_offset", Float(8)),
    Field::new("y_offset", Float(8)),
    Field::new("z_offset", Float(8)),
    Field::new("max_x", Float(8)),
    Field::new("min_x", Float(8)),
    Field::new("max_y", Float(8)),
    Field::new("min_y", Float(8)),
    Field::new("max_z", Float(8)),
    Field::new("min_z", Float(8)),
];

const WAVEFORMS: &[Field] = &[Field::new("start_of_waveform_data_packet_record", Int(8))];

const EVLRS: &[Field] = &[
    Field::new("start_of_first_evlr", Int(8)),
    Field::new("number_of_evlrs", Int(4)),
];

const LARGE_FILES: &[Field] = &[
    Field::new("extended_number_of_point_records", Int(8)),
    Field::new("extended_number_of_points_by_return", IntList(15, 8)),
];

const LEGACY_POINT: &[Field] = &[
    Field::new("x", Int(4)),
    Field::new("y", Int(4)),
    Field::new("z", Int(4)),
    Field::new("intensity", Int(2)),
    Field::new("flags", Int(1)),
    Field::new("classification", Int(1)),
    Field::new("scan_angle_rank", Int(1)),
    Field::new("user_data", Int(1)),
    Field::new("point_source_id", Int(2)),
];

const EXTENDED_POINT: &[Field] = &[
    Field::new("x", Int(4)),
    Field::new("y", Int(4)),
    Field::new("z", Int(4)),
    Field::new("intensity", Int(2)),
    Field::new("flags", Int(2)),
    Field::new("classification", Int(1)),
    Field::new("user_data", Int(1)),
    Field::new("scan_angle", Int(2)),
    Field::new("point_source_id", Int(2)),
];

const GPS_TIME: &[Field] = &[Field::new("gps_time", Float(8))];

const COLOR: &[Field] = &[
    Field::new("red", Int(2)),
    Field::new("green", Int(2)),
    Field::new("blue", Int(2)),
];

const WAVEFORM: &[Field] = &[
    Field::new("wave_packet_descriptor_index", Int(1)),
    Field::new("byte_offset_to_waveform_data", Int(8)),
    Field::new("waveform_packet_size_in_bytes", Int(4)),
    Field::new("return_point_waveform_location", Float(4)),
    Field::new("x_t", Float(4)),
    Field::new("y_t", Float(4)),
    Field::new("z_t", Float(4)),
];

const VLR: &[Field] = &[
    Field::new("reserved", Int(2)),
    Field::new("user_id", String(16)),
    Field::new("record_id", Int(2)),
    Field::new("record_length_after_header", Int(2)),
    Field::new("description", String(32)),
];

/// An ordered list of fields.
///
/// Cloning a schema is cheap, the fields are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema(Arc<[Field]>);

impl Schema {
    fn from_blocks(blocks: &[&[Field]]) -> Schema {
        Schema(blocks.concat().into())
    }

    /// Returns the fields, in order.
    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    /// Returns an iterator over the fields, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.0.iter()
    }

    /// Returns the position of the named field.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|field| field.name == name)
    }

    /// Returns the named field.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{field::Kind, schema};
    /// let schema = schema::point_schema(1).unwrap();
    /// assert_eq!(Kind::Float(8), schema.field("gps_time").unwrap().kind);
    /// assert!(schema.field("red").is_none());
    /// ```
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index_of(name).map(|i| &self.0[i])
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the total number of bytes of one encoded record.
    pub fn len_in_bytes(&self) -> usize {
        self.0.iter().map(|field| field.kind.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Returns the header fields for this version.
///
/// # Examples
///
/// ```
/// use lascodec::{Version, schema::header_schema};
/// assert_eq!(227, header_schema(Version::new(1, 0)).unwrap().len_in_bytes());
/// assert!(header_schema(Version::new(1, 5)).is_err());
/// ```
pub fn header_schema(version: Version) -> Result<Schema> {
    version.verify_supported()?;
    let mut blocks = vec![SIGNATURE];
    if version.supports::<FileSourceId>() {
        blocks.push(FILE_SOURCE_ID);
    } else {
        blocks.push(RESERVED);
    }
    blocks.push(COMMON);
    if version.supports::<Waveforms>() {
        blocks.push(WAVEFORMS);
    }
    if version.supports::<Evlrs>() {
        blocks.push(EVLRS);
    }
    if version.supports::<LargeFiles>() {
        blocks.push(LARGE_FILES);
    }
    Ok(Schema::from_blocks(&blocks))
}

/// Returns the point fields for this point data record format.
///
/// # Examples
///
/// ```
/// use lascodec::schema::point_schema;
/// assert_eq!(20, point_schema(0).unwrap().len_in_bytes());
/// assert!(point_schema(7).is_err());
/// ```
pub fn point_schema(format: u8) -> Result<Schema> {
    Format::new(format).map(format_schema)
}

pub(crate) fn format_schema(format: Format) -> Schema {
    let blocks: &[&[Field]] = match u8::from(format) {
        0 => &[LEGACY_POINT],
        1 => &[LEGACY_POINT, GPS_TIME],
        2 => &[LEGACY_POINT, COLOR],
        3 => &[LEGACY_POINT, GPS_TIME, COLOR],
        4 => &[LEGACY_POINT, GPS_TIME, WAVEFORM],
        5 => &[LEGACY_POINT, GPS_TIME, COLOR, WAVEFORM],
        // `Format::new` admits nothing past six
        _ => &[EXTENDED_POINT, GPS_TIME],
    };
    Schema::from_blocks(blocks)
}

/// Returns the fields of a variable length record header.
pub fn vlr_schema() -> Schema {
    Schema::from_blocks(&[VLR])
}
