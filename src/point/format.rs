use crate::{Error, Result, schema::{self, Schema}};
use std::fmt;

/// Point data record format.
///
/// Only formats zero through six can be created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Format(u8);

impl Format {
    /// Creates a new point format.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::point::Format;
    /// assert!(Format::new(6).is_ok());
    /// assert!(Format::new(7).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        if n <= 6 {
            Ok(Format(n))
        } else {
            Err(Error::UnsupportedPointFormat(n))
        }
    }

    /// Does this point format have a gps_time field?
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::point::Format;
    /// assert!(!Format::new(0).unwrap().has_gps_time());
    /// assert!(Format::new(1).unwrap().has_gps_time());
    /// ```
    pub fn has_gps_time(&self) -> bool {
        !matches!(self.0, 0 | 2)
    }

    /// Does this point format have color fields?
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::point::Format;
    /// assert!(!Format::new(1).unwrap().has_color());
    /// assert!(Format::new(2).unwrap().has_color());
    /// ```
    pub fn has_color(&self) -> bool {
        matches!(self.0, 2 | 3 | 5)
    }

    /// Does this point format have a waveform packet?
    pub fn has_waveform(&self) -> bool {
        matches!(self.0, 4 | 5)
    }

    /// Is this one of the las 1.4 extended formats, with two-byte flags and scan angles?
    pub fn is_extended(&self) -> bool {
        self.0 >= 6
    }

    /// Returns the fields of a point in this format.
    pub fn schema(&self) -> Schema {
        schema::format_schema(*self)
    }

    /// The length of a standard point in this format.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().record_length());
    /// assert_eq!(63, Format::new(5).unwrap().record_length());
    /// ```
    pub fn record_length(&self) -> u16 {
        self.schema().len_in_bytes() as u16
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> u8 {
        format.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(n: u8) -> Format {
        Format::new(n).unwrap()
    }

    #[test]
    fn has_gps_time() {
        assert!(!format(0).has_gps_time());
        assert!(format(1).has_gps_time());
        assert!(!format(2).has_gps_time());
        for n in 3..=6 {
            assert!(format(n).has_gps_time());
        }
    }

    #[test]
    fn has_color() {
        let with_color: Vec<u8> = (0..=6).filter(|&n| format(n).has_color()).collect();
        assert_eq!(vec![2, 3, 5], with_color);
    }

    #[test]
    fn has_waveform() {
        let with_waveform: Vec<u8> = (0..=6).filter(|&n| format(n).has_waveform()).collect();
        assert_eq!(vec![4, 5], with_waveform);
    }

    #[test]
    fn record_length() {
        assert_eq!(20, format(0).record_length());
        assert_eq!(28, format(1).record_length());
        assert_eq!(26, format(2).record_length());
        assert_eq!(34, format(3).record_length());
        assert_eq!(57, format(4).record_length());
        assert_eq!(63, format(5).record_length());
        assert_eq!(30, format(6).record_length());
    }

    #[test]
    fn unsupported() {
        assert!(matches!(
            Format::new(10),
            Err(Error::UnsupportedPointFormat(10))
        ));
    }
}
