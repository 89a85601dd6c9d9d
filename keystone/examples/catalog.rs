use std::path::PathBuf;
use structopt::StructOpt;

/// Print the catalog and the information dictionary of the given PDF file.
#[derive(StructOpt, Debug)]
#[structopt(name = "keystone-catalog")]
struct Opt {
    /// Input file
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let mut pdf = match keystone::read_file(opt.input.as_path()) {
        Ok(pdf) => pdf,
        Err(e) => {
            log::error!("Error while parsing: {}", e);
            return;
        }
    };

    if let Some((major, minor)) = pdf.version() {
        println!("Version: {}.{}", major, minor);
    }
    println!("Catalog: {:#?}", pdf.catalog());

    match pdf.info() {
        Ok(info) => {
            for (key, value) in &info {
                println!("{}: {}", key, value);
            }
        }
        Err(e) => log::warn!("No information dictionary: {}", e),
    }
}
