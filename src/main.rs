use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use ppt2pdf::{Config, ConversionStats, DEFAULT_SOFFICE_PROGRAM, SOFFICE_ENV_VAR, Soffice};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const HELP_HINT: &str = "To get help, use: ppt2pdf -h";

#[derive(Parser, Debug)]
#[command(
    name = "ppt2pdf",
    version,
    about = "Convert every PowerPoint file in a directory to PDF",
    long_about = "Convert every PowerPoint file in a directory to PDF.\n\n\
    Each file whose extension contains \"ppt\" is opened in the presentation \
    application and saved next to the original as <file>_output.pdf.\n\n\
    USAGE EXAMPLES:\n  \
      ppt2pdf -p ./slides\n  \
      ppt2pdf --dry-run -p ./slides\n  \
      ppt2pdf --soffice /opt/libreoffice/program/soffice -p ./slides\n\n\
    Everything after the directory is ignored, so options go before -p.",
    override_usage = "ppt2pdf [OPTIONS] -p <DIRECTORY>"
)]
struct Cli {
    /// Directory containing the presentations to convert
    #[arg(
        short,
        long,
        value_name = "DIRECTORY",
        value_parser = clap::builder::ValueParser::os_string()
    )]
    path: Option<OsString>,

    /// List the presentations that would be converted without converting them
    #[arg(long)]
    dry_run: bool,

    /// Keep the application window hidden
    #[arg(long)]
    hidden: bool,

    /// Presentation application to drive
    #[arg(
        long,
        env = SOFFICE_ENV_VAR,
        default_value = DEFAULT_SOFFICE_PROGRAM,
        value_name = "PROGRAM"
    )]
    soffice: PathBuf,

    /// Print conversion statistics as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Directory to convert; an empty value means the current directory.
    fn directory(&self) -> PathBuf {
        match &self.path {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from("."),
        }
    }
}

/// What the command line asks for.
#[derive(Debug)]
enum Invocation {
    /// No arguments at all
    Hint,
    /// `-h` or `-V`; clap renders the text
    Display(clap::Error),
    /// `-p` given without a directory
    MissingPath,
    /// First argument is not a known option
    WrongParameter,
    /// Convert the directory named by `cli.path`
    Convert {
        cli: Cli,
        ignored: Vec<OsString>,
    },
}

/// Final state of a conversion run.
#[derive(Debug)]
enum Outcome {
    Converted(ConversionStats),
    /// Message to print before exiting with `code`
    Exit { code: i32, message: String },
}

/// Splits off everything after the directory value of `-p` / `--path`.
fn split_after_path(mut args: Vec<OsString>) -> (Vec<OsString>, Vec<OsString>) {
    let end = args.iter().enumerate().skip(1).find_map(|(i, arg)| {
        let arg = arg.to_string_lossy();
        if arg == "-p" || arg == "--path" {
            (i + 1 < args.len()).then_some(i + 2)
        } else if arg.starts_with("--path=") || (arg.starts_with("-p") && arg.len() > 2) {
            Some(i + 1)
        } else {
            None
        }
    });

    let ignored = end.map(|end| args.split_off(end)).unwrap_or_default();
    (args, ignored)
}

fn classify<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Invocation::Hint;
    }

    let (args, ignored) = split_after_path(args);

    match Cli::try_parse_from(&args) {
        Ok(cli) if cli.path.is_some() => Invocation::Convert { cli, ignored },
        Ok(_) => Invocation::WrongParameter,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Display(e)
        }
        Err(_) if args.last().is_some_and(|a| a == "-p" || a == "--path") => {
            Invocation::MissingPath
        }
        Err(_) => Invocation::WrongParameter,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = match classify(std::env::args_os()) {
        Invocation::Hint => {
            println!("{HELP_HINT}");
            return Ok(());
        }
        Invocation::Display(e) => {
            e.print().context("Failed to print help")?;
            return Ok(());
        }
        Invocation::MissingPath => {
            println!("No path to source directory. {HELP_HINT}");
            return Ok(());
        }
        Invocation::WrongParameter => {
            println!("Wrong parameter. {HELP_HINT}");
            return Ok(());
        }
        Invocation::Convert { cli, ignored } => {
            setup_tracing(cli.verbose)?;
            if !ignored.is_empty() {
                tracing::debug!("Ignoring extra arguments: {:?}", ignored);
            }
            cli
        }
    };

    let config = Config::builder()
        .directory(cli.directory())
        .visible(!cli.hidden)
        .dry_run(cli.dry_run)
        .build()
        .context("Failed to build configuration")?;

    let stats = match settle(ppt2pdf::run(config, Soffice::new(&cli.soffice)))? {
        Outcome::Converted(stats) => stats,
        Outcome::Exit { code, message } => {
            println!("{message}");
            std::process::exit(code);
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?
        );
    } else {
        stats.print_summary();
    }

    Ok(())
}

/// Turns directory errors into an exit code and passes other failures on.
fn settle(result: ppt2pdf::Result<ConversionStats>) -> anyhow::Result<Outcome> {
    match result {
        Ok(stats) => Ok(Outcome::Converted(stats)),
        Err(e) if e.is_directory_error() => Ok(Outcome::Exit {
            code: e.exit_code(),
            message: e.to_string(),
        }),
        Err(e) => Err(e).context("Conversion failed"),
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("ppt2pdf=warn"),
        1 => EnvFilter::new("ppt2pdf=info"),
        2 => EnvFilter::new("ppt2pdf=debug"),
        _ => EnvFilter::new("ppt2pdf=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
