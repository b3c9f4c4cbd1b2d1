use std::{error::Error, fs::File, io, process};

use clap::{App, Arg};
use declass_class_file::ClassFile;
use declass_disasm::{renderer_for, OutputFormat};

fn main() {
    pretty_env_logger::init();

    let matches = App::new("declass")
        .version("0.1.0")
        .about("Disassembles Java class files")
        .arg(
            Arg::with_name("format")
                .short("o")
                .long("format")
                .value_name("FORMAT")
                .help("Output format (krakatau | javap)")
                .takes_value(true)
                .default_value("krakatau"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Class file to read (standard input when omitted)")
                .index(1),
        )
        .get_matches();

    let format = OutputFormat::from_name(matches.value_of("format").unwrap_or("krakatau"));

    let class_file = match read_class(matches.value_of("INPUT")) {
        Ok(class_file) => class_file,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    if let Err(e) = renderer_for(format).render(&class_file, &mut stdout.lock()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn read_class(input: Option<&str>) -> Result<ClassFile, Box<dyn Error>> {
    match input {
        Some(path) => {
            log::info!("Reading '{}'", path);
            Ok(ClassFile::parse(File::open(path)?)?)
        }
        None => {
            log::info!("Reading from standard input");
            Ok(ClassFile::parse(io::stdin().lock())?)
        }
    }
}
