use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use gatehouse::client::anon_work::FileAnonWork;
use gatehouse::client::http::HttpApi;
use gatehouse::client::{AnonWorkSnapshot, AnonWorkStore, AuthController, ClientError, Navigator};
use gatehouse::model::ChatMessage;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{0}")]
    Rejected(String),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write anonymous work: {0}")]
    Write(std::io::Error),
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson { path: PathBuf, source: serde_json::Error },
}

#[derive(Parser, Debug)]
#[command(name = "gatehouse-cli", about = "Sign in to a gatehouse server and land on a project")]
struct Cli {
    #[arg(long, env = "GATEHOUSE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "GATEHOUSE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and print the destination project path.
    SignIn(CredentialArgs),
    /// Create an account and print the destination project path.
    SignUp(CredentialArgs),
    /// Capture work done before signing in.
    Stash(StashArgs),
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,

    #[arg(long, help = "Anonymous work file to promote into a project")]
    anon_work: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StashArgs {
    #[arg(long, help = "JSON array of chat messages")]
    messages: PathBuf,

    #[arg(long, help = "JSON object of virtual files keyed by path")]
    files: Option<PathBuf>,

    #[arg(long)]
    anon_work: PathBuf,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    SignIn,
    SignUp,
}

/// Stand-in when no anonymous work file is given.
struct NoAnonWork;

impl AnonWorkStore for NoAnonWork {
    fn get(&self) -> Option<AnonWorkSnapshot> {
        None
    }

    fn clear(&self) {}
}

struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn push(&self, path: &str) {
        println!("{path}");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let timeout = Duration::from_secs(cli.timeout_secs);

    match cli.command {
        Command::SignIn(args) => run_auth(&cli.base_url, timeout, Mode::SignIn, args).await,
        Command::SignUp(args) => run_auth(&cli.base_url, timeout, Mode::SignUp, args).await,
        Command::Stash(args) => run_stash(&args),
    }
}

async fn run_auth(base_url: &str, timeout: Duration, mode: Mode, args: CredentialArgs) -> Result<(), CliError> {
    let api = Arc::new(HttpApi::new(base_url, timeout)?);
    let anon_work: Arc<dyn AnonWorkStore> = match args.anon_work {
        Some(path) => Arc::new(FileAnonWork::new(path)),
        None => Arc::new(NoAnonWork),
    };
    let controller = AuthController::new(api.clone(), anon_work, api, Arc::new(StdoutNavigator));

    let result = match mode {
        Mode::SignIn => controller.sign_in(&args.email, &args.password).await?,
        Mode::SignUp => controller.sign_up(&args.email, &args.password).await?,
    };

    if !result.success {
        tracing::warn!(email = %args.email, "authentication rejected");
        return Err(CliError::Rejected(result.error.unwrap_or_else(|| "authentication failed".to_owned())));
    }
    tracing::info!(email = %args.email, "authenticated");
    Ok(())
}

fn run_stash(args: &StashArgs) -> Result<(), CliError> {
    let messages: Vec<ChatMessage> = read_json(&args.messages)?;
    let files: Map<String, Value> = match &args.files {
        Some(path) => read_json(path)?,
        None => Map::new(),
    };

    let store = FileAnonWork::new(args.anon_work.clone());
    if store.save(messages, files).map_err(CliError::Write)? {
        tracing::info!(path = %args.anon_work.display(), "saved anonymous work");
    } else {
        tracing::warn!(path = %args.anon_work.display(), "no messages or files to save; anonymous work left unchanged");
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    serde_json::from_slice(&raw).map_err(|source| CliError::InvalidJson { path: path.to_owned(), source })
}
