//! Prints every header field of a las file, in file order.

use lascodec::Reader;

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("Must provide a path to a las file");
    let reader = Reader::from_path(&path).expect("Unable to open reader");
    let header = reader.header();
    println!("{} (las {})", path, header.version());
    for (field, value) in header.record().iter() {
        println!("{:>40}: {}", field.name, value);
    }
    if !header.padding().is_empty() {
        println!("{:>40}: {} bytes", "padding", header.padding().len());
    }
}
