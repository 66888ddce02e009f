//! Roundtrip (write-read) tests for supported LAS versions, point formats, and attributes.

use lascodec::{Header, Point, Reader, Version, Vlr, Writer, point::Format};
use std::io::Cursor;

pub fn roundtrip(header: Header, vlrs: &[(Vlr, Vec<u8>)], point: &Point) {
    let mut writer = Writer::new(Cursor::new(Vec::new()), header, vlrs).unwrap();
    writer.write_point(point).unwrap();
    writer.close().unwrap();
    let header = writer.header().clone();
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    assert_eq!(header, *reader.header());
    assert_eq!(vlrs, reader.read_vlrs().unwrap().as_slice());
    let points = reader
        .points()
        .unwrap()
        .collect::<lascodec::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(vec![point.clone()], points);
}

macro_rules! roundtrip_point {
    ($name:ident, $format:expr, $modify_point:expr) => {
        #[test]
        fn $name() {
            use lascodec::{Header, Point, point::Format};

            let header = Header::new(super::version(), $format).unwrap();
            let mut point = Point::new(Format::new($format).unwrap());
            $modify_point(&mut point);
            crate::roundtrip(header, &[], &point);
        }
    };
}

macro_rules! roundtrip_header {
    ($name:ident, $modify_header:expr) => {
        #[test]
        fn $name() {
            use lascodec::{Header, Point, point::Format};

            let mut header = Header::new(super::version(), 1).unwrap();
            $modify_header(&mut header);
            crate::roundtrip(header, &[], &Point::new(Format::new(1).unwrap()));
        }
    };
}

macro_rules! version {
    ($name:ident, $major:expr, $minor:expr) => {
        mod $name {
            use lascodec::Version;

            fn version() -> Version {
                Version::new($major, $minor)
            }

            mod point {
                use lascodec::{Color, Point, Vector, point::ScanDirection};

                roundtrip_point!(xyz, 0, |p: &mut Point| p
                    .set_raw_coordinates(&Vector::new(1, -2, i32::MAX))
                    .unwrap());
                roundtrip_point!(intensity, 0, |p: &mut Point| p
                    .set("intensity", 42u16)
                    .unwrap());
                roundtrip_point!(return_number, 0, |p: &mut Point| p
                    .set_return_number(2)
                    .unwrap());
                roundtrip_point!(number_of_returns, 0, |p: &mut Point| p
                    .set_number_of_returns(2)
                    .unwrap());
                roundtrip_point!(scan_direction, 0, |p: &mut Point| p
                    .set_scan_direction(ScanDirection::LeftToRight)
                    .unwrap());
                roundtrip_point!(is_edge_of_flight_line, 0, |p: &mut Point| p
                    .set_edge_of_flight_line(true)
                    .unwrap());
                roundtrip_point!(classification, 0, |p: &mut Point| p
                    .set("classification", 2u8)
                    .unwrap());
                roundtrip_point!(scan_angle_rank, 0, |p: &mut Point| p
                    .set_scan_angle(-3)
                    .unwrap());
                roundtrip_point!(user_data, 0, |p: &mut Point| p
                    .set("user_data", 42u8)
                    .unwrap());
                roundtrip_point!(point_source_id, 0, |p: &mut Point| p
                    .set("point_source_id", 42u16)
                    .unwrap());
                roundtrip_point!(gps_time, 1, |p: &mut Point| p.set_gps_time(42.).unwrap());
                roundtrip_point!(color, 2, |p: &mut Point| p
                    .set_color(Color::new(1, 2, 3))
                    .unwrap());
                roundtrip_point!(gps_time_and_color, 3, |p: &mut Point| {
                    p.set_gps_time(42.).unwrap();
                    p.set_color(Color::new(1, 2, 3)).unwrap();
                });
                roundtrip_point!(waveform, 4, |p: &mut Point| {
                    p.set("wave_packet_descriptor_index", 1u8).unwrap();
                    p.set("byte_offset_to_waveform_data", 1u64 << 40).unwrap();
                    p.set("waveform_packet_size_in_bytes", 256u32).unwrap();
                    p.set("return_point_waveform_location", 0.5).unwrap();
                    p.set("x_t", -0.25).unwrap();
                    p.set("y_t", 0.1).unwrap();
                    p.set("z_t", 1e-7).unwrap();
                });
                roundtrip_point!(color_and_waveform, 5, |p: &mut Point| {
                    p.set_color(Color::new(1, 2, 3)).unwrap();
                    p.set("z_t", 1.5).unwrap();
                });
                roundtrip_point!(scanner_channel, 6, |p: &mut Point| {
                    p.set("flags", 0x3000u16).unwrap();
                    p.set_return_number(9).unwrap();
                    p.set_number_of_returns(12).unwrap();
                    p.set_scan_angle(-15000).unwrap();
                });
            }

            mod header {
                use chrono::NaiveDate;
                use lascodec::{Header, Transform, Vector};
                use uuid::Uuid;

                roundtrip_header!(guid, |h: &mut Header| h
                    .set_guid(Uuid::from_bytes([42; 16]))
                    .unwrap());
                roundtrip_header!(system_identifier, |h: &mut Header| h
                    .set("system_identifier", "roundtrip test")
                    .unwrap());
                roundtrip_header!(generating_software, |h: &mut Header| h
                    .set("generating_software", "roundtrip test")
                    .unwrap());
                roundtrip_header!(date, |h: &mut Header| h
                    .set_date(NaiveDate::from_ymd_opt(2017, 10, 30))
                    .unwrap());
                roundtrip_header!(transforms, |h: &mut Header| {
                    let transform = Transform {
                        scale: 0.1,
                        offset: -1.,
                    };
                    h.set_transforms(&Vector::new(transform, transform, transform))
                        .unwrap();
                });
            }
        }
    };
}

version!(las_1_0, 1, 0);
version!(las_1_1, 1, 1);
version!(las_1_2, 1, 2);
version!(las_1_3, 1, 3);
version!(las_1_4, 1, 4);

#[test]
fn vlrs() {
    let payloads = [vec![], vec![1, 2, 3], vec![42; 1000]];
    let vlrs: Vec<(Vlr, Vec<u8>)> = payloads
        .iter()
        .enumerate()
        .map(|(i, payload)| {
            let vlr = Vlr::new("roundtrip", i as u16, "a test vlr", payload).unwrap();
            (vlr, payload.clone())
        })
        .collect();
    let header = Header::new(Version::new(1, 4), 6).unwrap();
    roundtrip(header, &vlrs, &Point::new(Format::new(6).unwrap()));
}

#[test]
fn file_source_id() {
    let mut header = Header::new(Version::new(1, 2), 0).unwrap();
    header.set("file_source_id", 42u16).unwrap();
    roundtrip(header, &[], &Point::new(Format::new(0).unwrap()));
}
