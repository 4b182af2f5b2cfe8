extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

use romasm::assembler::{ast::Program, emit, parser::Parser, Config};

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tRegisters: {}\n\tOutfile: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 => log::LevelFilter::Debug.to_string(),
            _ => log::LevelFilter::Trace.to_string(),
        },
        args.value_of("registers").unwrap_or("default"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    let config = match args.value_of("registers") {
        Some(list) => {
            let registers: Vec<String> = list
                .split(',')
                .map(|r| r.trim())
                .filter(|r| !r.is_empty())
                .map(|r| r.to_owned())
                .collect();
            if registers.is_empty() {
                error!("fatal: `--registers` needs at least one register name");
                std::process::exit(1);
            }
            Config { registers, ..Config::default() }
        },
        None => Config::default(),
    };

    // INPUT is required, clap exits before we get here without it.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());

    // Open the path in read-only mode, returns `io::Result<File>`
    let ifile = match File::open(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let program = match Parser::new(&config).run(ifile) {
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        },
        Ok(program) => program,
    };

    let bytes = match program.resolve() {
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        },
        Ok(bytes) => bytes,
    };

    if args.is_present("print-debug") {
        println!("{}", listing(&program, &bytes));
    }

    let opath = match args.value_of("output") {
        Some(filename) => PathBuf::from(filename),
        None => default_output(ipath),
    };

    if let Err(err) = emit::write_image(&opath, &config.header, &bytes) {
        error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }

    info!("{} byte(s) assembled", bytes.len());
    println!("Successfully compiled");
    println!("File written to {}", opath.display());
}

/// `dir/program.asm` assembles to `program.o` in the working directory.
fn default_output(ipath: &Path) -> PathBuf {
    let mut name = ipath
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| OsString::from("a"));
    name.push(".o");
    PathBuf::from(name)
}

fn listing(program: &Program, bytes: &[u8]) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for unit in program.units.iter() {
        let encoded: Vec<String> = bytes[unit.offset..unit.offset + unit.len()]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        grid.add(Cell::from(format!("0x{:04X}:", unit.offset)));
        grid.add(Cell::from(unit.source.instruction()));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(encoded.join(" ")));
    }

    grid.fit_into_columns(4).to_string()
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("romasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .long("output")
            .takes_value(true)
            .help("write output to an outfile (defaults to the input name with a .o extension)"))
        .arg(Arg::with_name("registers")
            .short("r")
            .long("registers")
            .takes_value(true)
            .value_name("NAMES")
            .help("comma separated register names of the target variant (default a,b,c,d)"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the assembly listing alongside the emitted bytes to STDOUT"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .chain(std::io::stdout())
        .apply().ok();
}
