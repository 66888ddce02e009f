//! Schema-driven records.
//!
//! A [Record] pairs a [Schema] with one [Value] per field. Headers, points, and vlrs are all
//! records underneath, and they are all read and written by the same two loops here.
//!
//! ```
//! use std::io::Cursor;
//! use lascodec::{Record, schema};
//!
//! let mut record = Record::new(schema::vlr_schema());
//! record.set("user_id", "LASF_Projection").unwrap();
//! record.set("record_id", 2112u16).unwrap();
//!
//! let mut cursor = Cursor::new(Vec::new());
//! record.write_to(&mut cursor).unwrap();
//! cursor.set_position(0);
//! assert_eq!(record, Record::read_from(&mut cursor, schema::vlr_schema()).unwrap());
//! ```

use crate::{
    Error, Result,
    field::{Field, Kind, Value},
    schema::Schema,
};
use std::io::{Read, Write};

/// An ordered set of field values described by a schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    schema: Schema,
    values: Vec<Value>,
}

impl Record {
    /// Creates a record with every field set to zero.
    pub fn new(schema: Schema) -> Record {
        let values = schema
            .iter()
            .map(|field| field.kind.default_value())
            .collect();
        Record { schema, values }
    }

    /// Reads a record, field by field, in schema order.
    ///
    /// If the stream runs out, the error names the field that could not be read and nothing is
    /// returned.
    pub fn read_from<R: Read + ?Sized>(read: &mut R, schema: Schema) -> Result<Record> {
        let values = schema
            .iter()
            .map(|field| field.decode(read))
            .collect::<Result<Vec<_>>>()?;
        Ok(Record { schema, values })
    }

    /// Writes a record, field by field, in schema order.
    pub fn write_to<W: Write + ?Sized>(&self, write: &mut W) -> Result<()> {
        for (field, value) in self.iter() {
            field.encode(write, value)?;
        }
        Ok(())
    }

    /// Returns this record's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the value of the named field.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Record, field::Value, schema};
    /// let record = Record::new(schema::point_schema(0).unwrap());
    /// assert_eq!(Some(&Value::Int(0)), record.get("intensity"));
    /// assert_eq!(None, record.get("gps_time"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    /// Sets the value of the named field.
    ///
    /// Fails if the field does not exist, or if the value can't be encoded as the field's kind.
    /// Strings are truncated or padded with nuls to the field's length, and four byte floats are
    /// narrowed to single precision.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::{Record, schema};
    /// let mut record = Record::new(schema::point_schema(0).unwrap());
    /// record.set("intensity", 42u16).unwrap();
    /// assert!(record.set("intensity", 0.5).is_err());
    /// assert!(record.set("classification", 256u16).is_err());
    /// assert!(record.set("gps_time", 1.).is_err());
    /// ```
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<()> {
        let i = self
            .schema
            .index_of(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        let mut value = value.into();
        let field = self.schema.fields()[i];
        match (field.kind, &mut value) {
            (Kind::String(len), Value::String(bytes)) => bytes.resize(len, 0),
            (Kind::Float(4), Value::Float(n)) => *n = f64::from(*n as f32),
            _ => {}
        }
        if !field.kind.accepts(&value) {
            return Err(match (field.kind, &value) {
                (Kind::Int(len), &Value::Int(n)) => Error::IntOverflow { value: n, len },
                (Kind::IntList(count, _), Value::IntList(values)) if values.len() != count => {
                    Error::ListLength {
                        expected: count,
                        found: values.len(),
                    }
                }
                (expected, _) => Error::ValueKind {
                    field: field.name,
                    expected,
                },
            });
        }
        self.values[i] = value;
        Ok(())
    }

    /// Returns an iterator over `(field, value)` pairs, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &Value)> {
        self.schema.iter().zip(self.values.iter())
    }

    /// Returns a record over another schema, keeping the values of fields with the same name and
    /// kind.
    pub(crate) fn to_schema(&self, schema: Schema) -> Record {
        let values = schema
            .iter()
            .map(|field| match self.schema.index_of(field.name) {
                Some(i) if self.schema.fields()[i].kind == field.kind => self.values[i].clone(),
                _ => field.kind.default_value(),
            })
            .collect();
        Record { schema, values }
    }

    pub(crate) fn int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_int)
    }

    pub(crate) fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub(crate) fn int_list(&self, name: &str) -> Option<&[u64]> {
        self.get(name).and_then(Value::as_int_list)
    }

    pub(crate) fn string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(Value::to_las_string)
    }
}
