//! Writes the points of a las file as delimited text.
//!
//! Usage: to_text <input.las> <output.txt> [delimiter]

use lascodec::{
    Reader,
    text::{self, TextOptions},
};
use std::{fs::File, io::BufWriter};

fn main() {
    let mut args = std::env::args().skip(1);
    let infile = args.next().expect("Too few arguments");
    let outfile = args.next().expect("Too few arguments");
    let mut options = TextOptions::default();
    if let Some(delimiter) = args.next() {
        options = options.with_delimiter(delimiter);
    }
    let mut reader = Reader::from_path(&infile).expect("Unable to open infile");
    let write = BufWriter::new(File::create(&outfile).expect("Unable to open outfile"));
    let count = text::write_points(&mut reader, write, options).expect("Unable to write text");
    println!("Wrote {} points to {}", count, outfile);
}
