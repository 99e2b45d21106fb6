//! Binary entry point for `reacher-batch`.

use clap::Parser;
use reacher_batch_core::{filter_addresses, runner, ConfigBuilder, RunSummary};
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Validate email addresses against a hosted Reacher `/v0/check_email` backend.
#[derive(Parser, Debug)]
#[command(name = "reacher-batch", version, about)]
struct Cli {
    /// URL of the backend (e.g. http://127.0.0.1:8080/v0/check_email)
    #[arg(short = 'u', long = "url")]
    url: String,

    /// Input text file, one email address per line
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Email to use in the SMTP `FROM` command
    #[arg(short = 'f', long = "from")]
    from_email: Option<String>,

    /// Name to use in the SMTP `EHLO` command, defaults to "localhost"
    #[arg(short = 'e', long = "ehlo")]
    ehlo: Option<String>,

    /// Number of concurrent workers (1-20, default 5)
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// Proxy host (IP address or domain name)
    #[arg(long = "proxy-host")]
    proxy_host: Option<String>,

    /// Proxy port
    #[arg(long = "proxy-port")]
    proxy_port: Option<u16>,

    /// Proxy user (optional)
    #[arg(long = "proxy-user")]
    proxy_user: Option<String>,

    /// Proxy password (optional)
    #[arg(long = "proxy-pass")]
    proxy_pass: Option<String>,

    /// SMTP port for the backend's probe, defaults to 25 server-side
    #[arg(long = "smtp-port", alias = "sp")]
    smtp_port: Option<u16>,

    /// Directory for the per-status result files
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Optional TOML configuration file merged beneath CLI flags
    #[arg(long = "config", env = "REACHER_BATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Print one line per result instead of a progress bar
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(summary) if summary.interrupted => {
            eprintln!("Interrupted, exiting now...");
            std::process::exit(130);
        }
        Ok(_) => {}
        Err(err) => {
            eprintln!("[-] ERROR: {err}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let mut builder = ConfigBuilder::new(cli.url.as_str(), &cli.input);
    if let Some(path) = &cli.config {
        builder = builder.config_file(path)?;
    }
    let config = builder
        .threads(cli.threads)
        .from_email(cli.from_email)
        .hello_name(cli.ehlo)
        .proxy(cli.proxy_host, cli.proxy_port, cli.proxy_user, cli.proxy_pass)
        .smtp_port(cli.smtp_port)
        .output_dir(cli.output_dir)
        .verbose(cli.verbose)
        .build()?;

    if config.proxy.is_some() {
        tracing::warn!("proxy usage may result in unstable outcomes");
    }
    if config.smtp_port.is_some() {
        tracing::warn!("SMTP port defaults to 25, change only if you know what you're doing");
    }

    let file = std::fs::File::open(&config.input_path)?;
    let lines: Vec<String> = std::io::BufReader::new(file).lines().collect::<Result<_, _>>()?;
    let line_count = lines.len();
    let addresses = filter_addresses(lines);
    tracing::info!(
        input_lines = line_count,
        valid_addresses = addresses.len(),
        "input filtered"
    );

    if addresses.is_empty() {
        tracing::info!("no valid addresses to check, nothing to do");
        return Ok(RunSummary::default());
    }

    Ok(runner::run(&config, addresses).await?)
}
