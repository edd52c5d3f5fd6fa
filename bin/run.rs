use ls8::{
    emulator::{Emulator, Fault, StdIo},
    image::{ImageError, Program},
};

use clap::{App, Arg, ArgMatches};
use slog::{o, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

enum Error {
    Image(ImageError),
    Execution(Fault),
    IO(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::IO(e)
    }
}

impl From<ImageError> for Error {
    fn from(e: ImageError) -> Error {
        Error::Image(e)
    }
}

impl From<Fault> for Error {
    fn from(e: Fault) -> Error {
        Error::Execution(e)
    }
}

fn parse_arguments() -> ArgMatches<'static> {
    App::new("ls8run")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility for executing LS-8 program images")
        .arg(Arg::with_name("image")
             .help("File containing a program image")
             .value_name("IMAGE")
             .required(true)
             .index(1))
        .arg(Arg::with_name("trace")
             .help("Print the processor state before every instruction")
             .short("t")
             .long("trace"))
        .arg(Arg::with_name("verbose")
             .help("Enables verbose logging")
             .short("v")
             .long("verbose"))
        .get_matches()
}

fn main() {
    let args = parse_arguments();

    let file_path = args.value_of("image").unwrap();
    let trace = args.is_present("trace");
    let verbose = args.is_present("verbose");

    match run(file_path, trace, verbose) {
        Ok(()) => (),
        Err(error) => {
            match error {
                Error::IO(io) => eprintln!("Couldn't read {}: {}", file_path, io),
                Error::Image(image) => eprintln!("Invalid program image: {}", image),
                Error::Execution(fault) => eprintln!("Execution fault: {}", fault),
            }

            std::process::exit(1);
        },
    }
}

fn run(file_path: &str, trace: bool, verbose: bool) -> Result<(), Error> {
    let file = std::fs::read_to_string(file_path)?;
    let program = Program::parse(&file)?;

    let mut emulator = Emulator::new(program.to_memory(), StdIo);

    if verbose {
        let decorator = TermDecorator::new().build();
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();

        emulator.set_logger(Logger::root(drain, o!()));
    }

    if trace {
        while emulator.running {
            println!("{}", emulator.trace());
            emulator.step()?;
        }
    } else {
        emulator.run()?;
    }

    Ok(())
}
