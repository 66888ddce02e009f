//! Peek at the version and point format of a las stream without parsing the header.

use crate::{
    Result, Version,
    io::ReadLasExt,
    schema::{POINT_FORMAT_OFFSET, VERSION_MAJOR_OFFSET},
};
use log::{Level, log};
use std::io::{Read, Seek, SeekFrom};

/// Reads the version and the point data record format id from a las stream.
///
/// The stream is left where it was found, even if the read fails. The caller is responsible for
/// checking the file signature first; see [crate::header::check_signature].
///
/// # Examples
///
/// ```
/// use std::io::{Cursor, Seek};
/// use lascodec::{Header, Version, sniff};
///
/// let mut cursor = Cursor::new(Vec::new());
/// Header::new(Version::new(1, 3), 1).unwrap().write_to(&mut cursor).unwrap();
/// cursor.set_position(10);
/// let (version, format) = sniff::sniff(&mut cursor).unwrap();
/// assert_eq!(Version::new(1, 3), version);
/// assert_eq!(1, format);
/// assert_eq!(10, cursor.stream_position().unwrap());
/// ```
pub fn sniff<R: Read + Seek>(mut read: R) -> Result<(Version, u8)> {
    let position = read.stream_position()?;
    let result = sniff_from_start(&mut read);
    let _ = read.seek(SeekFrom::Start(position))?;
    let (version, format) = result?;
    log!(
        Level::Debug,
        "sniffed las {} with point data record format {}",
        version,
        format
    );
    Ok((version, format))
}

fn sniff_from_start<R: Read + Seek>(read: &mut R) -> Result<(Version, u8)> {
    let _ = read.seek(SeekFrom::Start(VERSION_MAJOR_OFFSET))?;
    let major = read
        .read_las_uint(1)
        .map_err(|err| err.truncated("version_major"))? as u8;
    let minor = read
        .read_las_uint(1)
        .map_err(|err| err.truncated("version_minor"))? as u8;
    let _ = read.seek(SeekFrom::Start(POINT_FORMAT_OFFSET))?;
    let format = read
        .read_las_uint(1)
        .map_err(|err| err.truncated("point_data_format_id"))? as u8;
    Ok((Version::new(major, minor), format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Cursor;

    fn bytes(major: u8, minor: u8, format: u8) -> Vec<u8> {
        let mut bytes = vec![0; 227];
        bytes[..4].copy_from_slice(b"LASF");
        bytes[24] = major;
        bytes[25] = minor;
        bytes[104] = format;
        bytes
    }

    #[test]
    fn reads_fixed_offsets() {
        let mut cursor = Cursor::new(bytes(1, 4, 6));
        assert_eq!((Version::new(1, 4), 6), sniff(&mut cursor).unwrap());
    }

    #[test]
    fn restores_position() {
        for position in [0, 4, 25, 104, 227] {
            let mut cursor = Cursor::new(bytes(1, 2, 3));
            cursor.set_position(position);
            let _ = sniff(&mut cursor).unwrap();
            assert_eq!(position, cursor.position());
        }
    }

    #[test]
    fn restores_position_on_error() {
        let mut cursor = Cursor::new(bytes(1, 2, 3)[..50].to_vec());
        cursor.set_position(7);
        assert!(matches!(
            sniff(&mut cursor),
            Err(Error::TruncatedRead {
                field: "point_data_format_id"
            })
        ));
        assert_eq!(7, cursor.position());
    }
}
