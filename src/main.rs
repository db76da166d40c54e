//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use huffzip::compression::compress::compress;
use huffzip::compression::decompress::decompress;
use huffzip::tools::cli::{hzopts_init, Mode};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> huffzip::Result<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace.
    // Log to stderr so that -c output on stdout stays clean.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::AlwaysAnsi,
    ) {
        eprintln!("Unable to start logging: {}", e);
    }

    let options = hzopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&options),
        Mode::Unzip | Mode::Test => decompress(&options),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}
