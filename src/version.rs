use crate::{Error, Result, feature::Feature};
use std::fmt;

/// LAS version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// For now, always 1.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::Version;
    /// let version = Version::new(1, 2);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Returns true if this crate can read and write this version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::Version;
    /// assert!(Version::new(1, 4).is_supported());
    /// assert!(!Version::new(1, 5).is_supported());
    /// assert!(!Version::new(2, 0).is_supported());
    /// ```
    pub fn is_supported(&self) -> bool {
        self.major == 1 && self.minor <= 4
    }

    /// Returns an error if this version isn't supported.
    pub fn verify_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(Error::UnsupportedVersion {
                major: self.major,
                minor: self.minor,
            })
        }
    }

    /// Checks whether this version supports the feature.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lascodec::{Version, feature::Evlrs};
    /// assert!(!Version::new(1, 3).supports::<Evlrs>());
    /// assert!(Version::new(1, 4).supports::<Evlrs>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 2)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version::new(major, minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
