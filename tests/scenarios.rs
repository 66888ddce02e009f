//! Whole-file scenarios: synthetic files written byte by byte, and files on disk.

use byteorder::{LittleEndian, WriteBytesExt};
use lascodec::{
    Error, Header, Reader, Transform, Vector, Version, Vlr, Writer,
    header::check_signature,
    point::{Format, Point},
    reader::is_las_file,
    sniff::sniff,
    text::{self, TextOptions},
};
use std::{
    fs,
    io::{Cursor, Seek, SeekFrom},
};

fn las_1_2(format: u8, raw_x: &[i32]) -> Cursor<Vec<u8>> {
    let mut header = Header::new(Version::new(1, 2), format).unwrap();
    let transform = Transform {
        scale: 0.01,
        offset: 0.,
    };
    header
        .set_transforms(&Vector::new(transform, transform, transform))
        .unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()), header, &[]).unwrap();
    for &x in raw_x {
        let mut point = Point::new(Format::new(format).unwrap());
        point.set_raw_coordinates(&Vector::new(x, 0, 0)).unwrap();
        writer.write_point(&point).unwrap();
    }
    writer.into_inner().unwrap()
}

#[test]
fn sniff_keeps_position() {
    let mut cursor = las_1_2(0, &[]);
    let _ = cursor.seek(SeekFrom::Start(17)).unwrap();
    let (version, format) = sniff(&mut cursor).unwrap();
    assert_eq!(Version::new(1, 2), version);
    assert_eq!(0, format);
    assert_eq!(17, cursor.stream_position().unwrap());
}

#[test]
fn vlr_walk_lands_on_point_data() {
    let vlrs: Vec<(Vlr, Vec<u8>)> = [0usize, 7, 100]
        .into_iter()
        .map(|len| {
            let payload = vec![1; len];
            (
                Vlr::new("scenario", 42, "", &payload).unwrap(),
                payload,
            )
        })
        .collect();
    let header = Header::new(Version::new(1, 3), 1).unwrap();
    let writer = Writer::new(Cursor::new(Vec::new()), header, &vlrs).unwrap();
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    let header_size = u64::from(reader.header().header_size());
    let offset_to_point_data = u64::from(reader.header().offset_to_point_data());
    assert_eq!(header_size + 3 * 54 + 107, offset_to_point_data);

    let ranges: Vec<_> = reader
        .vlrs()
        .unwrap()
        .map(|item| item.unwrap().1)
        .collect();
    assert_eq!(header_size + 54, ranges[0].start);
    assert_eq!(offset_to_point_data, ranges[2].end);
}

#[test]
fn vlr_count_past_end_of_file() {
    let mut cursor = las_1_2(0, &[]);
    let mut header = Header::read_from(&mut cursor).unwrap();
    header.set("number_of_variable_length_records", 2u32).unwrap();
    let _ = cursor.seek(SeekFrom::Start(0)).unwrap();
    header.write_to(&mut cursor).unwrap();

    let mut reader = Reader::new(cursor).unwrap();
    let results: Vec<_> = reader.vlrs().unwrap().collect();
    assert_eq!(1, results.len());
    assert!(matches!(
        results[0],
        Err(Error::TruncatedVlr {
            expected: 2,
            found: 0
        })
    ));
    assert_eq!(0, reader.points().unwrap().count());
}

#[test]
fn scaled_x_of_two_points() {
    let mut reader = Reader::new(las_1_2(3, &[100, 200])).unwrap();
    assert_eq!(2, reader.header().number_of_points());
    let transforms = reader.header().transforms();
    let xs: Vec<f64> = reader
        .points()
        .unwrap()
        .map(|point| point.unwrap().coordinates(&transforms).x)
        .collect();
    assert_eq!(2, xs.len());
    assert!((xs[0] - 1.).abs() < 1e-9);
    assert!((xs[1] - 2.).abs() < 1e-9);
}

#[test]
fn bad_signature_reads_four_bytes() {
    let mut cursor = Cursor::new(b"LASX".to_vec());
    assert!(matches!(
        check_signature(&mut cursor),
        Err(Error::InvalidSignature(signature)) if &signature == b"LASX"
    ));
    assert_eq!(4, cursor.position());
    assert!(matches!(
        Reader::new(Cursor::new(b"LASX".to_vec())),
        Err(Error::InvalidSignature(_))
    ));
}

#[test]
fn handwritten_point_record() {
    let mut cursor = las_1_2(0, &[]);
    let mut header = Header::read_from(&mut cursor).unwrap();
    header.set_point_counts(1, &[1]).unwrap();
    let _ = cursor.seek(SeekFrom::Start(0)).unwrap();
    header.write_to(&mut cursor).unwrap();
    let _ = cursor.seek(SeekFrom::End(0)).unwrap();
    cursor.write_i32::<LittleEndian>(-100).unwrap();
    cursor.write_i32::<LittleEndian>(250).unwrap();
    cursor.write_i32::<LittleEndian>(7).unwrap();
    cursor.write_u16::<LittleEndian>(1000).unwrap();
    cursor.write_u8(0b1001_0010).unwrap();
    cursor.write_u8(2).unwrap();
    cursor.write_i8(-45).unwrap();
    cursor.write_u8(0).unwrap();
    cursor.write_u16::<LittleEndian>(3).unwrap();

    let mut reader = Reader::new(cursor).unwrap();
    let points = reader
        .points()
        .unwrap()
        .collect::<lascodec::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(1, points.len());
    let point = &points[0];
    assert_eq!(Vector::new(-100, 250, 7), point.raw_coordinates());
    assert_eq!(1000, point.intensity());
    assert_eq!(2, point.return_number());
    assert_eq!(2, point.number_of_returns());
    assert!(point.is_edge_of_flight_line());
    assert_eq!(2, point.classification());
    assert_eq!(-45, point.scan_angle());
    assert_eq!(3, point.point_source_id());
}

#[test]
fn files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let las = dir.path().join("points.las");
    let txt = dir.path().join("points.txt");
    let other = dir.path().join("other.bin");
    let short = dir.path().join("short.bin");

    {
        let header = Header::new(Version::new(1, 4), 6).unwrap();
        let transforms = header.transforms();
        let mut writer = Writer::from_path(&las, header, &[]).unwrap();
        for i in 0..10 {
            let mut point = Point::new(Format::new(6).unwrap());
            let n = f64::from(i);
            point
                .set_coordinates(&Vector::new(n, n / 2., -n), &transforms)
                .unwrap();
            point.set_return_number(1).unwrap();
            writer.write_point(&point).unwrap();
        }
        writer.close().unwrap();
    }
    fs::write(&other, b"PK\x03\x04 not a las file").unwrap();
    fs::write(&short, b"LA").unwrap();

    assert!(is_las_file(&las).unwrap());
    assert!(!is_las_file(&other).unwrap());
    assert!(!is_las_file(&short).unwrap());
    assert!(matches!(
        is_las_file(dir.path().join("missing.las")),
        Err(Error::Io(_))
    ));

    let mut reader = Reader::from_path(&las).unwrap();
    let header = reader.header().clone();
    assert_eq!(10, header.number_of_points());
    assert_eq!(0, header.get("number_of_point_records").unwrap().as_int().unwrap());
    assert_eq!(10, header.number_of_points_by_return()[0]);
    assert_eq!(Vector::new(9., 4.5, 0.), header.bounds().max);
    assert_eq!(10, reader.points().unwrap().count());

    let count = text::write_points(
        &mut reader,
        fs::File::create(&txt).unwrap(),
        TextOptions::default().with_delimiter(" "),
    )
    .unwrap();
    assert_eq!(10, count);
    let text = fs::read_to_string(&txt).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(11, lines.len());
    assert!(lines[0].starts_with("x y z intensity"));
    assert!(lines[3].starts_with("2.000 1.000 -2.000 "));
}
