use crate::{Error, Result};
use std::fmt;

/// A scale and an offset that transforms xyz coordinates.
///
/// Las stores coordinates as i32s. The real value is `raw * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The scale.
    pub scale: f64,
    /// The offset.
    pub offset: f64,
}

impl Transform {
    /// Applies this transform to an i32, returning a float.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::Transform;
    /// let transform = Transform { scale: 0.01, offset: 0. };
    /// assert_eq!(1., transform.direct(100));
    /// ```
    pub fn direct(&self, n: i32) -> f64 {
        self.scale * f64::from(n) + self.offset
    }

    /// Applies the inverse transform, and rounds the result.
    ///
    /// Returns an error if the resultant value can't be represented as an i32.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(1, transform.inverse(2.9).unwrap());
    /// assert!(transform.inverse(1e12).is_err());
    /// ```
    pub fn inverse(&self, n: f64) -> Result<i32> {
        let scaled = ((n - self.offset) / self.scale).round();
        num_traits::cast(scaled).ok_or(Error::InverseTransform(n, *self))
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            scale: 0.001,
            offset: 0.,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} * x + {}`", self.scale, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large() {
        let transform = Transform::default();
        let n = i32::MAX as f64 * transform.scale + 1.;
        assert!(transform.inverse(n).is_err());
    }

    #[test]
    fn too_small() {
        let transform = Transform::default();
        let n = i32::MIN as f64 * transform.scale - 1.;
        assert!(transform.inverse(n).is_err());
    }

    #[test]
    fn not_a_number() {
        assert!(matches!(
            Transform::default().inverse(f64::NAN),
            Err(Error::InverseTransform(..))
        ));
    }

    #[test]
    fn negative_raw_values() {
        let transform = Transform {
            scale: 0.01,
            offset: 100.,
        };
        assert_eq!(99., transform.direct(-100));
        assert_eq!(-100, transform.inverse(99.).unwrap());
    }
}
