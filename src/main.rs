use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use git2md::config::DEFAULT_MAX_FILE_SIZE;
use git2md::{
    Config, Credentials, DocProcessor, LocalSource, Location, Notifier, RemoteSource, Report,
    ScanOptions, ScratchDirs, SourceReference,
};

/// Exit code used when the run is interrupted with Ctrl-C.
const INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(help = "Local folder or Git repository URL to document")]
    source: String,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Access token for private HTTPS repositories"
    )]
    token: Option<String>,

    #[arg(long, value_name = "PATH", help = "Private SSH key used for the clone")]
    ssh_key: Option<PathBuf>,

    #[arg(
        long,
        env = "GIT_SSH_COMMAND",
        value_name = "CMD",
        help = "Base SSH command used for the clone"
    )]
    ssh_command: Option<String>,

    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Output directory [default: ./<project-name>]"
    )]
    output_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        help = "Files larger than this are listed but not embedded"
    )]
    max_file_size: u64,

    #[arg(
        long = "ignore",
        value_name = "REGEX",
        help = "Skip files and directories whose name matches (repeatable)"
    )]
    ignore: Vec<String>,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Verbose mode (-v for info, -vv for debug, -vvv for trace). Also switches to text-based progress"
    )]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> git2md::Result<Config> {
        let location = Location::parse(&self.source)?;
        let credentials = Credentials {
            token: self.token.filter(|t| !t.is_empty()),
            ssh_key: self.ssh_key,
            ssh_command: self.ssh_command.filter(|c| !c.is_empty()),
        };
        let scan = ScanOptions::with_patterns(self.max_file_size, &self.ignore)?;
        Ok(Config::new(
            SourceReference::new(location, credentials),
            self.output_dir,
            scan,
            self.verbose,
        ))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let scratch = ScratchDirs::new();
    let handler_scratch = scratch.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        handler_scratch.purge();
        eprintln!("\ninterrupted");
        std::process::exit(INTERRUPTED);
    }) {
        eprintln!("warning: cannot install interrupt handler: {}", e);
    }

    match run(cli, scratch) {
        Ok(report) => {
            println!("{}", report.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, scratch: ScratchDirs) -> Result<Report> {
    let config = cli.into_config().map_err(with_stage)?;
    let notifier = Notifier::new(config.verbosity);
    notifier.debug(&format!("Configuration: {:?}", config.source));

    let report = match &config.source.location {
        Location::Local(_) => DocProcessor::new(LocalSource::new(), notifier)
            .with_scratch(scratch)
            .convert(&config),
        Location::Remote(_) => DocProcessor::new(RemoteSource::new(scratch.clone()), notifier)
            .with_scratch(scratch)
            .convert(&config),
    };
    report.map_err(with_stage)
}

/// Prefixes the pipeline stage so the message reads "<stage> failed: <cause>".
fn with_stage(error: git2md::Error) -> anyhow::Error {
    let stage = error.stage();
    anyhow::Error::new(error).context(format!("{} failed", stage))
}
