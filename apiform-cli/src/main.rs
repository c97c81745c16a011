use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use apiform::{
    ApiForm, Outcome, UiOptions,
    command::{CommandExecutor, DEFAULT_PLACEHOLDER, ShellExecutor, deliver},
    domain::OperationSelector,
    form::FieldOrder,
    openapi::{LoaderOptions, load_spec},
};

const LOG_ENV: &str = "APIFORM_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(
    name = "apiform",
    version,
    about = "Fill in an OpenAPI request body in the terminal and get a curl command"
)]
struct Cli {
    /// OpenAPI document: file path, host name, or URL
    #[arg(value_name = "SPEC")]
    spec: String,

    /// Skip the picker and open this operation, e.g. "POST /users"
    #[arg(short = 'o', long = "operation", value_name = "METHOD /PATH")]
    operation: Option<OperationSelector>,

    /// Send the request here instead of the host the document came from
    #[arg(short = 't', long = "target", value_name = "ORIGIN")]
    target: Option<String>,

    /// Host token printed when no target is known
    #[arg(long = "placeholder", value_name = "TOKEN", default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,

    /// Print the command without running it
    #[arg(short = 'n', long = "no-exec")]
    no_exec: bool,

    /// Order fields alphabetically instead of as declared
    #[arg(long = "sorted")]
    sorted: bool,

    /// Seconds to wait when probing or fetching a remote document
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 5)]
    timeout: u64,

    /// Cancel an edited form without asking twice
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn ui_options(&self) -> UiOptions {
        let order = if self.sorted {
            FieldOrder::Sorted
        } else {
            FieldOrder::Document
        };
        UiOptions::default()
            .with_confirm_exit(!self.no_confirm_exit)
            .with_field_order(order)
            .with_placeholder(self.placeholder.clone())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let loader = LoaderOptions::default().with_timeout(Duration::from_secs(cli.timeout));
    let loaded = load_spec(&cli.spec, &loader)
        .wrap_err_with(|| format!("failed to load API description from {}", cli.spec))?;
    let origin = cli.target.clone().or(loaded.origin);

    let session = ApiForm::new(loaded.document)
        .with_origin(origin)
        .with_options(cli.ui_options());
    let outcome = session
        .run(cli.operation.as_ref())
        .map_err(|err| Report::msg(format!("{err:#}")))?;

    let command = match outcome {
        Outcome::Rendered(command) => command,
        Outcome::Cancelled => {
            eprintln!("cancelled");
            return Ok(());
        }
    };

    if !cli.no_exec && !command.host.is_resolved() {
        warn!(placeholder = %command.host, "no target host known, command not executed");
        eprintln!(
            "no target host known; replace {} and run the command yourself",
            command.host
        );
    }

    let shell = ShellExecutor::default();
    let executor = (!cli.no_exec).then_some(&shell as &dyn CommandExecutor);
    let mut stdout = io::stdout().lock();
    if let Some(err) =
        deliver(&command, executor, &mut stdout).wrap_err("failed to write command")?
    {
        warn!(error = %err, "rendered command failed");
        eprintln!("warning: {err}");
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }

    Ok(())
}
