use std::path::PathBuf;

use crate::application::Config;
use crate::interface::{demo, logging};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Config),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    MissingValue(String),
    UnknownArgument(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "missing value for '{}'", flag),
            Self::UnknownArgument(arg) => write!(f, "unknown argument '{}'", arg),
        }
    }
}

impl std::error::Error for CliError {}

pub fn run() -> anyhow::Result<()> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "pocketfb".to_string());

    let config = match parse_args(args) {
        Ok(Command::Help) => {
            print_usage(&program);
            return Ok(());
        }
        Ok(Command::Run(config)) => config,
        Err(err) => {
            eprintln!("{}", err);
            print_usage(&program);
            std::process::exit(2);
        }
    };

    logging::init(&config)?;
    demo::run(&config)
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, CliError> {
    let mut config = Config::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--verbose" => config.verbose = true,
            "--fb" => config.framebuffer_device = path_value(&arg, args.next())?,
            "--input" => config.input_device = path_value(&arg, args.next())?,
            "--assets" => config.asset_dir = path_value(&arg, args.next())?,
            "--log-file" => config.log_file = Some(path_value(&arg, args.next())?),
            "--snapshot" => config.snapshot = Some(path_value(&arg, args.next())?),
            other => return Err(CliError::UnknownArgument(other.to_string())),
        }
    }
    Ok(Command::Run(config))
}

fn path_value(flag: &str, value: Option<String>) -> Result<PathBuf, CliError> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!("  --fb <path>         framebuffer device (default /dev/fb0)");
    eprintln!("  --input <path>      input event device (default /dev/event0)");
    eprintln!("  --assets <dir>      directory holding space.tga, ship.tga and font.tga");
    eprintln!("  --log-file <path>   also write log output to a file");
    eprintln!("  --snapshot <path>   save the last frame on exit");
    eprintln!("  -v, --verbose       debug logging");
    eprintln!("  -h, --help          show this message");
}
