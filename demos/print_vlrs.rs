//! Prints the header of every variable length record in a las file.

use lascodec::Reader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("Must provide a path to a las file");
    let mut reader = Reader::from_path(path).expect("Unable to open reader");
    for item in reader.vlrs().expect("Unable to seek to the vlrs") {
        let (vlr, range) = item.expect("Unable to read vlr");
        for (field, value) in vlr.record().iter() {
            println!("{:>28}: {}", field.name, value);
        }
        println!("{:>28}: {}..{}", "payload", range.start, range.end);
        println!("{}", "-".repeat(60));
    }
}
