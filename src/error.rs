use crate::{Transform, field::Kind};
use std::io;
use thiserror::Error;

/// Crate-specific error enum.
#[derive(Debug, Error)]
pub enum Error {
    /// The file signature was not "LASF".
    #[error("file signature must be LASF, found {:?}", String::from_utf8_lossy(.0))]
    InvalidSignature([u8; 4]),

    /// This version of las is not supported.
    #[error("las version {major}.{minor} is not supported")]
    UnsupportedVersion {
        /// The major version found in the header.
        major: u8,
        /// The minor version found in the header.
        minor: u8,
    },

    /// This point data record format is not supported.
    #[error("point data record format {0} is not supported")]
    UnsupportedPointFormat(u8),

    /// The stream ended before a field's bytes could be read.
    #[error("the stream ended while reading `{field}`")]
    TruncatedRead {
        /// The name of the field that could not be read.
        field: &'static str,
    },

    /// The stream ended before all of the header's variable length records were read.
    #[error("expected {expected} variable length records, but the stream ended after {found}")]
    TruncatedVlr {
        /// The number of vlrs declared by the header.
        expected: u32,
        /// The number of vlrs that were read completely.
        found: u32,
    },

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Integer fields are one to eight bytes long.
    #[error("integer fields must be between one and eight bytes, not {0}")]
    IntLength(usize),

    /// Float fields are four or eight bytes long.
    #[error("float fields must be four or eight bytes, not {0}")]
    FloatLength(usize),

    /// The value is too large for its field.
    #[error("{value} does not fit in {len} bytes")]
    IntOverflow {
        /// The value that was too large.
        value: u64,
        /// The byte length of the field.
        len: usize,
    },

    /// The value is too large for a bit field packed into a point's flags.
    #[error("{value} does not fit in the {bits} bits of `{field}`")]
    BitField {
        /// The name of the bit field.
        field: &'static str,
        /// The value that was too large.
        value: u8,
        /// The width of the bit field.
        bits: u32,
    },

    /// An integer list has the wrong number of elements.
    #[error("expected a list of {expected} integers, found {found}")]
    ListLength {
        /// The count declared by the field kind.
        expected: usize,
        /// The number of elements in the value.
        found: usize,
    },

    /// The value's kind does not match the field's kind.
    #[error("field `{field}` holds {expected:?} values")]
    ValueKind {
        /// The field name.
        field: &'static str,
        /// The kind of the field.
        expected: Kind,
    },

    /// The schema has no field with this name.
    #[error("there is no field named `{0}`")]
    UnknownField(String),

    /// The point data record length is shorter than the point format requires.
    #[error(
        "point format {format} requires records of at least {required} bytes, but the header declares {length}"
    )]
    PointDataRecordLength {
        /// The point format.
        format: u8,
        /// The record length from the header.
        length: u16,
        /// The length of the point format's schema.
        required: u16,
    },

    /// The point's format is not the format of the header.
    #[error("the header uses point format {header}, but the point has format {point}")]
    PointFormatMismatch {
        /// The header's point format.
        header: u8,
        /// The point's format.
        point: u8,
    },

    /// The payload does not match the vlr's declared record length.
    #[error("the vlr declares {declared} bytes after its header, but the payload has {actual}")]
    VlrPayloadLength {
        /// The record length after header.
        declared: u16,
        /// The length of the provided payload.
        actual: usize,
    },

    /// Vlr payloads are limited to `u16::MAX` bytes.
    #[error("vlr payloads are limited to 65535 bytes, not {0}")]
    VlrTooLong(usize),

    /// The value could not be scaled into an i32.
    #[error("{0} cannot be stored as an i32 with the transform {1}")]
    InverseTransform(f64, Transform),

    /// The `Writer` is closed and cannot be written to.
    #[error("the writer is closed")]
    ClosedWriter,

    /// The year of a creation date does not fit in the header's two byte year.
    #[error("the year {0} is out of range for a las header")]
    YearOutOfRange(i32),

    /// A byte range ends before it starts.
    #[error("the byte range {start}..{end} ends before it starts")]
    ReversedRange {
        /// The start of the range.
        start: u64,
        /// The end of the range.
        end: u64,
    },
}

impl Error {
    /// Converts an unexpected end of file into a `TruncatedRead` for the named field.
    pub(crate) fn truncated(self, field: &'static str) -> Error {
        match self {
            Error::Io(ref err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Error::TruncatedRead { field }
            }
            err => err,
        }
    }

    /// Returns true if this error was caused by the stream running out of bytes.
    pub(crate) fn is_truncation(&self) -> bool {
        match self {
            Error::TruncatedRead { .. } => true,
            Error::Io(err) => err.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}
