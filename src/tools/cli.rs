use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// Extension added to compressed files.
pub const EXTENSION: &str = ".hfz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Zip, Unzip, Test
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Define the two output channels
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Defines all user settable options to control program behavior
#[derive(Debug, Clone)]
pub struct HzOpts {
    /// Name of the file to read for input
    pub file: String,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: LevelFilter,
}

impl HzOpts {
    /// Default options for the given input file: compress to a file, keep nothing, errors only.
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            op_mode: Mode::Zip,
            keep_input_files: false,
            force_overwrite: false,
            output: Output::File,
            verbose: LevelFilter::Error,
        }
    }

    /// Name of the file the result goes to. Compressing appends ".hfz"; decompressing strips it,
    /// or appends ".out" when the input doesn't carry it.
    pub fn output_file(&self) -> String {
        match self.op_mode {
            Mode::Zip => format!("{}{}", self.file, EXTENSION),
            Mode::Unzip | Mode::Test => match self.file.strip_suffix(EXTENSION) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", self.file),
            },
        }
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static huffman file compressor",
    long_about = "
    huffzip counts every byte of the input, builds one optimal prefix code for the whole file,
    and stores that code table alongside the packed bits so the file can be restored exactly."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Suppress all log output
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Sets verbosity. -v shows warnings, -vvvv is chatty
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,
}

/// Parse the process arguments into HzOpts.
pub fn hzopts_init() -> HzOpts {
    hzopts_from_args(Args::parse())
}

/// Put command line information from CLAP into our internal structure, then set the log level.
pub fn hzopts_from_args(args: Args) -> HzOpts {
    let mut opts = HzOpts::new(&args.filename);

    if args.compress {
        opts.op_mode = Mode::Zip
    };
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    opts.keep_input_files = args.keep;
    opts.force_overwrite = args.force;
    if args.stdout {
        opts.output = Output::Stdout
    };

    opts.verbose = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Error,
        (false, 1) => LevelFilter::Warn,
        (false, 2) => LevelFilter::Info,
        (false, 3) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Set the log level
    log::set_max_level(opts.verbose);

    // Below we report initialization status to the user
    info!("---- huffzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    match opts.output {
        Output::Stdout => info!("Sending output to stdout"),
        Output::File if opts.op_mode != Mode::Test => {
            info!("Sending output to {}", opts.output_file())
        }
        Output::File => {}
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- huffzip Initialization End ----\n");
    opts
}
