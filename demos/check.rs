//! Checks whether each path on the command line is a las file.

use lascodec::reader::is_las_file;

fn main() {
    let mut args = std::env::args().skip(1).peekable();
    if args.peek().is_none() {
        panic!("Must provide at least one path");
    }
    for path in args {
        match is_las_file(&path) {
            Ok(true) => println!("{}: las", path),
            Ok(false) => println!("{}: not las", path),
            Err(err) => println!("{}: {}", path, err),
        }
    }
}
