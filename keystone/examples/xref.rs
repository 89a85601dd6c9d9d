use std::{fs::File, path::PathBuf};
use structopt::StructOpt;

/// Print the trailer and the merged cross-reference table of the PDF file.
#[derive(StructOpt, Debug)]
#[structopt(name = "keystone-xref")]
struct Opt {
    /// Input file
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let input_file = match File::open(&opt.input) {
        Ok(file) => file,
        Err(e) => {
            log::error!("Cannot open {}: {}", opt.input.display(), e);
            return;
        }
    };
    let pdf = match keystone::open(input_file) {
        Ok(pdf) => pdf,
        Err(e) => {
            log::error!("Error while parsing: {}", e);
            return;
        }
    };

    println!("startxref: {}", pdf.startxref());
    println!("Trailer: {:#?}", pdf.trailer());

    let mut objects: Vec<_> = pdf.xref().iter().collect();
    objects.sort_by_key(|used| used.number);
    for used in objects {
        println!("{:>6} {:>5} @ {}", used.number, used.generation, used.byte_offset);
    }
}
