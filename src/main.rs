use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gistsnip::commands::create::FIELD_LABELS;
use gistsnip::commands::source::{read_snippet, snippet_parm, HostHints};
use gistsnip::commands::whoami::whoami;
use gistsnip::commands::{CreateGist, Outcome};
use gistsnip::gist::HttpTransport;
use gistsnip::host::{BatchDialogs, Dialogs, TerminalDialogs};
use gistsnip::{Context, ErrorReporter, Settings};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gistsnip")]
#[command(about = "Publish code snippets as GitHub gists", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SettingsArgs {
    /// Gist creation endpoint
    #[arg(long, env = "GISTSNIP_API_URL", global = true)]
    api_url: Option<String>,
    /// Base URL for links to created gists
    #[arg(long, env = "GISTSNIP_WEB_URL", global = true)]
    web_url: Option<String>,
    /// Two-line file holding the GitHub username and access token
    #[arg(long, env = "GISTSNIP_TOKEN_FILE", global = true)]
    token_file: Option<PathBuf>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

impl SettingsArgs {
    fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            api_url: self.api_url.unwrap_or(defaults.api_url),
            web_url: self.web_url.unwrap_or(defaults.web_url),
            token_path: self.token_file.unwrap_or(defaults.token_path),
            timeout: self.timeout.map(Duration::from_secs).unwrap_or(defaults.timeout),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a gist from a snippet (file, `-` for stdin, or clipboard)
    Create {
        /// Snippet file (if not provided, reads from clipboard)
        file: Option<PathBuf>,
        /// Name of the node the snippet came from
        #[arg(long)]
        node_name: Option<String>,
        /// Type name of that node, e.g. Sop/attribwrangle
        #[arg(long)]
        node_type: Option<String>,
        /// Language of the editor field (python, vex, opencl)
        #[arg(long)]
        editor_lang: Option<String>,
        #[arg(long)]
        filename: Option<String>,
        #[arg(long)]
        file_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// public or private
        #[arg(long)]
        visibility: Option<String>,
        /// Never prompt; accept the guessed and given values
        #[arg(long)]
        batch: bool,
        /// Print the request body instead of posting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the credentials gists are created with
    Whoami,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "gistsnip=debug" } else { "gistsnip=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let settings = cli.settings.into_settings();

    match cli.command {
        Commands::Create {
            file,
            node_name,
            node_type,
            editor_lang,
            filename,
            file_type,
            description,
            visibility,
            batch,
            dry_run,
        } => {
            let text = read_snippet(file.as_deref())?;
            let hints = HostHints {
                node_name,
                node_type,
                editor_lang,
            };
            let parm = snippet_parm(text, file.as_deref(), hints);

            let fields = [filename, file_type, description, visibility];
            let overrides: BTreeMap<String, String> = FIELD_LABELS
                .iter()
                .zip(fields)
                .filter_map(|(label, value)| value.map(|v| (label.to_string(), v)))
                .collect();

            let from_stdin = file.as_deref() == Some(Path::new("-"));
            let interactive = !batch && !from_stdin && std::io::stdin().is_terminal();
            let context = if interactive {
                Context::HostInteractive
            } else {
                Context::HostBatch
            };

            let mut dialogs: Box<dyn Dialogs> = if interactive {
                Box::new(TerminalDialogs::stdio().with_prefill(overrides))
            } else {
                Box::new(BatchDialogs::stdout(overrides))
            };

            let transport = HttpTransport::new(settings.timeout)?;
            let command = CreateGist {
                settings: &settings,
                transport: &transport,
                reporter: ErrorReporter::new(context),
                dry_run,
            };
            match command.run(&parm, dialogs.as_mut())? {
                Outcome::Previewed { json } => println!("{}", json),
                Outcome::Rejected { .. } | Outcome::Aborted => process::exit(1),
                Outcome::Created { .. } | Outcome::Cancelled => {}
            }
        }
        Commands::Whoami => whoami(&settings)?,
    }

    Ok(())
}
