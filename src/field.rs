//! The closed set of field kinds that make up every las structure.
//!
//! A [Field] is a name and a [Kind]. The kind knows how many bytes the field occupies and how to
//! decode those bytes into a [Value], or encode a value back into bytes:
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::field::{Kind, Value};
//!
//! let mut cursor = Cursor::new(Vec::<u8>::new());
//! Kind::String(8).encode(&mut cursor, &Value::from("LiDAR")).unwrap();
//! assert_eq!(8, cursor.get_ref().len());
//! cursor.set_position(0);
//! let value = Kind::String(8).decode(&mut cursor).unwrap();
//! assert_eq!("LiDAR", value.to_las_string().unwrap());
//! ```

use crate::{
    Error, Result,
    io::{ReadLasExt, WriteLasExt},
};
use std::{
    fmt,
    io::{Read, Write},
};

/// The binary layout of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// An unsigned little-endian integer of one to eight bytes.
    Int(usize),
    /// An IEEE-754 float of four or eight bytes.
    Float(usize),
    /// A fixed-length, nul padded byte string.
    String(usize),
    /// `count` consecutive integers, each `len` bytes long.
    IntList(usize, usize),
}

/// A decoded field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Any `Kind::Int`.
    Int(u64),
    /// Any `Kind::Float`.
    Float(f64),
    /// The raw bytes of a `Kind::String`, including any nuls.
    String(Vec<u8>),
    /// The elements of a `Kind::IntList`, in order.
    IntList(Vec<u64>),
}

/// A named field in a schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// The field name, unique within its schema.
    pub name: &'static str,
    /// How the field is laid out in bytes.
    pub kind: Kind,
}

impl Kind {
    /// Returns the number of bytes this kind occupies.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::field::Kind;
    /// assert_eq!(2, Kind::Int(2).len());
    /// assert_eq!(20, Kind::IntList(5, 4).len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match *self {
            Kind::Int(len) | Kind::Float(len) | Kind::String(len) => len,
            Kind::IntList(count, len) => count * len,
        }
    }

    /// Returns the zero value for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::field::{Kind, Value};
    /// assert_eq!(Value::String(vec![0; 4]), Kind::String(4).default_value());
    /// ```
    pub fn default_value(&self) -> Value {
        match *self {
            Kind::Int(_) => Value::Int(0),
            Kind::Float(_) => Value::Float(0.),
            Kind::String(len) => Value::String(vec![0; len]),
            Kind::IntList(count, _) => Value::IntList(vec![0; count]),
        }
    }

    /// Returns true if a value can be encoded as this kind.
    ///
    /// Strings of any length are accepted, since they are truncated or padded on encode. Integers
    /// must fit in the field's bytes and lists must have the right number of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::field::{Kind, Value};
    /// assert!(Kind::Int(1).accepts(&Value::Int(255)));
    /// assert!(!Kind::Int(1).accepts(&Value::Int(256)));
    /// assert!(!Kind::Int(1).accepts(&Value::Float(1.)));
    /// ```
    pub fn accepts(&self, value: &Value) -> bool {
        match (*self, value) {
            (Kind::Int(len), Value::Int(n)) => fits(*n, len),
            (Kind::Float(_), Value::Float(_)) => true,
            (Kind::String(_), Value::String(_)) => true,
            (Kind::IntList(count, len), Value::IntList(values)) => {
                values.len() == count && values.iter().all(|&n| fits(n, len))
            }
            _ => false,
        }
    }

    /// Decodes a value of this kind.
    pub fn decode<R: Read + ?Sized>(&self, read: &mut R) -> Result<Value> {
        match *self {
            Kind::Int(len) => read.read_las_uint(len).map(Value::Int),
            Kind::Float(len) => read.read_las_float(len).map(Value::Float),
            Kind::String(len) => read.read_las_string(len).map(Value::String),
            Kind::IntList(count, len) => (0..count)
                .map(|_| read.read_las_uint(len))
                .collect::<Result<Vec<_>>>()
                .map(Value::IntList),
        }
    }

    /// Encodes a value of this kind.
    ///
    /// Fails if the value is of a different kind, if an integer doesn't fit, or if a list has the
    /// wrong number of elements. Strings never fail.
    pub fn encode<W: Write + ?Sized>(&self, write: &mut W, value: &Value) -> Result<()> {
        match (*self, value) {
            (Kind::Int(len), Value::Int(n)) => write.write_las_uint(*n, len),
            (Kind::Float(len), Value::Float(n)) => write.write_las_float(*n, len),
            (Kind::String(len), Value::String(bytes)) => write.write_las_string(bytes, len),
            (Kind::IntList(count, len), Value::IntList(values)) => {
                if values.len() != count {
                    return Err(Error::ListLength {
                        expected: count,
                        found: values.len(),
                    });
                }
                for &n in values {
                    write.write_las_uint(n, len)?;
                }
                Ok(())
            }
            _ => Err(Error::ValueKind {
                field: "",
                expected: *self,
            }),
        }
    }
}

impl Field {
    /// Creates a new field.
    pub const fn new(name: &'static str, kind: Kind) -> Field {
        Field { name, kind }
    }

    /// Decodes this field, reporting a short stream as a truncated read of this field.
    pub fn decode<R: Read + ?Sized>(&self, read: &mut R) -> Result<Value> {
        self.kind.decode(read).map_err(|err| err.truncated(self.name))
    }

    /// Encodes this field.
    pub fn encode<W: Write + ?Sized>(&self, write: &mut W, value: &Value) -> Result<()> {
        self.kind.encode(write, value).map_err(|err| match err {
            Error::ValueKind { expected, .. } => Error::ValueKind {
                field: self.name,
                expected,
            },
            err => err,
        })
    }
}

impl Value {
    /// Returns the integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<u64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the float, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the raw bytes, if this is a `String`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the list, if this is an `IntList`.
    pub fn as_int_list(&self) -> Option<&[u64]> {
        match self {
            Value::IntList(values) => Some(values),
            _ => None,
        }
    }

    /// Interprets a `String` value as text, stopping at the first nul.
    ///
    /// Las strings should be ASCII, but not all las data in the wild is, so invalid UTF-8 is
    /// replaced rather than rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::field::Value;
    /// let value = Value::String(vec![76, 105, 68, 65, 82, 0, 33]);
    /// assert_eq!("LiDAR", value.to_las_string().unwrap());
    /// assert!(Value::Int(1).to_las_string().is_none());
    /// ```
    pub fn to_las_string(&self) -> Option<String> {
        self.as_bytes().map(|bytes| {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            String::from_utf8_lossy(&bytes[..end]).into_owned()
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(_) => write!(f, "{}", self.to_las_string().unwrap_or_default()),
            Value::IntList(values) => {
                for (i, n) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", n)?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! int_value {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Value {
                    Value::Int(u64::from(n))
                }
            }
        )+
    }
}

int_value!(u8, u16, u32, u64);

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s.into_bytes())
    }
}

impl From<Vec<u64>> for Value {
    fn from(values: Vec<u64>) -> Value {
        Value::IntList(values)
    }
}

fn fits(n: u64, len: usize) -> bool {
    len >= 8 || n >> (8 * len) == 0
}
