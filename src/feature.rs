//! Programmatically determine whether a las version supports a feature.
//!
//! Features are structures that implement the [Feature] trait. The header schema is assembled
//! from them, one optional block per feature:
//!
//! ```
//! use lascodec::feature::{LargeFiles, Waveforms};
//! use lascodec::Version;
//!
//! let las_1_2 = Version::new(1, 2);
//! assert!(!las_1_2.supports::<Waveforms>());
//!
//! let las_1_4 = Version::new(1, 4);
//! assert!(las_1_4.supports::<Waveforms>());
//! assert!(las_1_4.supports::<LargeFiles>());
//! ```

use crate::Version;

const MAJOR: u8 = 1;

/// A trait implemented by each feature.
pub trait Feature {
    /// Is this feature supported by this version?
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::feature::{Waveforms, Feature};
    /// use lascodec::Version;
    /// assert!(!Waveforms::is_supported_by(Version::new(1, 2)));
    /// assert!(Waveforms::is_supported_by(Version::new(1, 4)));
    /// ```
    fn is_supported_by(version: Version) -> bool;

    /// Returns the name of this feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use lascodec::feature::{Waveforms, Feature};
    /// assert_eq!("Waveforms", Waveforms::name());
    /// ```
    fn name() -> &'static str;
}

macro_rules! features {
    (   $(
            $(#[$meta:meta])*
            $name:ident ($($versions:expr),+);
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $name {}

            impl Feature for $name {
                fn is_supported_by(version: Version) -> bool {
                    version.major == MAJOR && [$($versions),+].contains(&version.minor)
                }

                fn name() -> &'static str {
                    stringify!($name)
                }
            }
        )+
    }
}

features! {
    /// Does the header have a file source id and global encoding, or four reserved bytes?
    FileSourceId(1, 2, 3, 4);
    /// Does the header locate a waveform data packet record?
    Waveforms(3, 4);
    /// Does the header locate extended variable length records?
    Evlrs(4);
    /// Does the header carry 64-bit point counts?
    LargeFiles(4);
}
