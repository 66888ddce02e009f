use crate::Vector;

/// Minimum and maximum bounds in three dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Grows the bounds to encompass this position in xyz space.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::{Bounds, Vector};
    /// let mut bounds = Bounds::default();
    /// bounds.grow(&Vector::new(1., 2., 3.));
    /// assert_eq!(1., bounds.min.x);
    /// ```
    pub fn grow(&mut self, position: &Vector<f64>) {
        if position.x < self.min.x {
            self.min.x = position.x;
        }
        if position.y < self.min.y {
            self.min.y = position.y;
        }
        if position.z < self.min.z {
            self.min.z = position.z;
        }
        if position.x > self.max.x {
            self.max.x = position.x;
        }
        if position.y > self.max.y {
            self.max.y = position.y;
        }
        if position.z > self.max.z {
            self.max.z = position.z;
        }
    }

    /// Returns true if nothing has been added to these bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::{Bounds, Vector};
    /// let mut bounds = Bounds::default();
    /// assert!(bounds.is_empty());
    /// bounds.grow(&Vector::new(0., 0., 0.));
    /// assert!(!bounds.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: Vector {
                x: f64::INFINITY,
                y: f64::INFINITY,
                z: f64::INFINITY,
            },
            max: Vector {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
                z: f64::NEG_INFINITY,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow() {
        let mut bounds = Bounds {
            ..Default::default()
        };
        bounds.grow(&Vector::new(1., 2., 3.));
        assert_eq!(1., bounds.min.x);
        assert_eq!(1., bounds.max.x);
        assert_eq!(2., bounds.min.y);
        assert_eq!(2., bounds.max.y);
        assert_eq!(3., bounds.min.z);
        assert_eq!(3., bounds.max.z);
        bounds.grow(&Vector::new(0., 1., 2.));
        assert_eq!(0., bounds.min.x);
        assert_eq!(1., bounds.max.x);
        assert_eq!(1., bounds.min.y);
        assert_eq!(2., bounds.max.y);
        assert_eq!(2., bounds.min.z);
        assert_eq!(3., bounds.max.z);
        bounds.grow(&Vector::new(2., 3., 4.));
        assert_eq!(0., bounds.min.x);
        assert_eq!(2., bounds.max.x);
        assert_eq!(1., bounds.min.y);
        assert_eq!(3., bounds.max.y);
        assert_eq!(2., bounds.min.z);
        assert_eq!(4., bounds.max.z);
    }
}
