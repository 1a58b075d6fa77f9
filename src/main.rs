//! The CLI interface for randrz
//!
//! Use the `--help` flag to see the available options.
use std::process::ExitStatus;

use color_eyre::eyre::Result;
use randrz::{Selection, Xrandr, XrandrError, command_line, format_command, parse_screens};
use structopt::StructOpt;

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "randrz",
    about = "Turns on the screens matching the given patterns, left to right, and turns off the rest."
)]
struct Opts {
    /// Regular expressions matched against the start of the screen names, one per position.
    /// Without patterns every connected screen is turned on in the order xrandr reports them.
    patterns: Vec<String>,
    /// The xrandr executable to use
    #[structopt(long, default_value = "xrandr")]
    xrandr: String,
    /// Output debug info
    #[structopt(short, long)]
    verbose: bool,
}

/// Entry point for `randrz`.
fn main() -> Result<()> {
    let _ = color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    match run(&opts) {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            log::error!("`{}` exited with {}", opts.xrandr, status);
            std::process::exit(status.code().unwrap_or(1));
        }
        Err(report) => match report.downcast_ref::<XrandrError>() {
            Some(err) => {
                let code = err.exit_code();
                eprintln!("Error: {:?}", report);
                std::process::exit(code);
            }
            None => Err(report),
        },
    }
}

/// Queries the screens, arranges them and applies the new layout
fn run(opts: &Opts) -> Result<ExitStatus> {
    let selection = Selection::new(&opts.patterns)?;
    let xrandr = Xrandr::new(opts.xrandr.as_str());

    let listing = xrandr.query()?;
    let screens = parse_screens(listing.lines()).collect::<Result<Vec<_>, _>>()?;
    for screen in &screens {
        log::debug!("Discovered {}", screen);
    }

    let screens = selection.arrange(screens);
    let command = command_line(xrandr.program(), &screens)?;

    println!("{}", format_command(&command));
    log::info!(
        "Turning on {} of {} screens",
        screens.iter().filter(|s| s.connected).count(),
        screens.len()
    );

    Ok(xrandr.apply(&command[1..])?)
}
