//! Showcase CLI - showcase command

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cmd::auth::AuthAction;
use std::path::PathBuf;
use std::process::ExitCode;

mod cmd;

/// Showcase - product catalog, sales leads and account tools
#[derive(Parser)]
#[command(name = "showcase")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the product catalog
    Products {
        /// Search term
        #[arg(short, long)]
        search: Option<String>,
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Show a single product
    Product {
        /// Product ID
        id: u64,
    },
    /// Browse the catalog interactively (search as you type)
    Browse,
    /// List sales leads
    Leads {
        /// Filter by name, company or email
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a lead and its conversation history
    Lead {
        /// Lead ID
        id: String,
    },
    /// Sign up, sign in and manage the current session
    #[command(subcommand)]
    Auth(AuthCommands),
    /// View or edit configuration
    Config(ConfigArgs),
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        /// Full name stored with the profile
        #[arg(long)]
        name: Option<String>,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Password confirmation (read from stdin when omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in with Google or Microsoft
    Oauth {
        /// google | azure (microsoft)
        provider: String,
        /// Finish sign-in with the URL the browser was redirected to
        #[arg(long, value_name = "REDIRECT_URL")]
        complete: Option<String>,
    },
    /// Email a password-reset link
    Forgot {
        #[arg(long)]
        email: String,
    },
    /// Set a new password (optionally from a recovery link)
    Reset {
        /// Recovery link from the reset email
        #[arg(long)]
        link: Option<String>,
        /// New password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Confirmation (read from stdin when omitted)
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Show the current session
    Session,
    /// Sign out
    Logout,
}

#[derive(Args)]
struct ConfigArgs {
    /// List all values (default)
    #[arg(long)]
    list: bool,
    /// Print one value
    #[arg(long, value_name = "KEY")]
    get: Option<String>,
    /// Set a value
    #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
    set: Option<Vec<String>>,
    /// Print the config file path
    #[arg(long)]
    path: bool,
    /// Print an annotated example config
    #[arg(long)]
    example: bool,
    /// With --path: create the file with defaults if missing
    #[arg(long, requires = "path")]
    create: bool,
}

impl From<AuthCommands> for AuthAction {
    fn from(command: AuthCommands) -> Self {
        match command {
            AuthCommands::Signup {
                email,
                name,
                password,
                confirm_password,
            } => AuthAction::SignUp {
                email,
                name,
                password,
                confirm_password,
            },
            AuthCommands::Login { email, password } => AuthAction::Login { email, password },
            AuthCommands::Oauth { provider, complete } => AuthAction::OAuth { provider, complete },
            AuthCommands::Forgot { email } => AuthAction::Forgot { email },
            AuthCommands::Reset {
                link,
                password,
                confirm_password,
            } => AuthAction::Reset {
                link,
                password,
                confirm_password,
            },
            AuthCommands::Session => AuthAction::Session,
            AuthCommands::Logout => AuthAction::Logout,
        }
    }
}

async fn run_config(args: ConfigArgs) -> Result<()> {
    if args.list {
        cmd::config::run_list().await
    } else if let Some(key) = args.get {
        cmd::config::run_get(&key).await
    } else if let Some(pair) = args.set {
        match pair.as_slice() {
            [key, value] => cmd::config::run_set(key, value).await,
            _ => anyhow::bail!("--set takes a key and a value"),
        }
    } else if args.path {
        cmd::config::run_path(args.create).await
    } else if args.example {
        cmd::config::run_example().await
    } else {
        cmd::config::run_list().await
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Products { search, page } => cmd::products::run(search, page).await,
        Commands::Product { id } => cmd::product::run(id).await,
        Commands::Browse => cmd::browse::run().await,
        Commands::Leads { search } => cmd::leads::run(search).await,
        Commands::Lead { id } => cmd::lead::run(&id).await,
        Commands::Auth(auth_cmd) => cmd::auth::run(auth_cmd.into()).await,
        Commands::Config(args) => run_config(args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let _log_guard = match cli_lib::logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", cli_lib::util::error_panel(&format!("{:#}", err)));
            return ExitCode::FAILURE;
        }
    };

    match dispatch(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {:?}", err);
            eprintln!("{}", cli_lib::util::error_panel(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}
