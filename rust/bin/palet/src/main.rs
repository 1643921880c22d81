//! `palet`: command-line client for the pallet catalogue backend.
//!
//! Manages contexts, lists and edits companies and pallet designs, and
//! runs the desi calculator offline.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use palet_core::Locale;
use tracing_subscriber::EnvFilter;

use commands::desi::DesiArgs;
use commands::pallet::FilterArgs;
use commands::{Output, Target};

/// Palet CLI tool.
#[derive(Parser, Debug)]
#[command(name = "palet", about = "Pallet catalogue CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.palet/config.toml).
    #[arg(long = "config", global = true, env = "PALET_CONFIG")]
    config: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = Output::Table)]
    output: Output,

    /// Message language (tr, en). Overrides the context's locale.
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage backend contexts.
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Companies.
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },

    /// Pallet designs.
    Pallet {
        #[command(subcommand)]
        action: PalletAction,
    },

    /// Compute pallet volume (desi) from dimensions.
    Desi(DesiArgs),

    /// Check the backend of the current context.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// List all contexts.
    List,
    /// Create a context or change its properties. `--locale` sets the
    /// context's default language.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[derive(Subcommand, Debug)]
enum CompanyAction {
    List {
        #[arg(long)]
        search: Option<String>,
        /// name_asc or name_desc.
        #[arg(long)]
        sort: Option<String>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PalletAction {
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// e.g. name_asc, price_desc, volume_asc, price_per_desi_desc.
        #[arg(long)]
        sort: Option<String>,
    },
    Get {
        id: i64,
    },
    /// Create from `field=value` pairs, e.g. `name="Euro Palet" price=250`.
    Create {
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Change fields of an existing pallet.
    Update {
        id: i64,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Print PDF/CSV export URLs for the given filters.
    ExportLinks {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the details page URL.
    View {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let target = || Target::resolve(&config_path, cli.locale, cli.output);

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::List => commands::context::list(&config_path)?,
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), cli.locale, &config_path)?
            }
            ContextAction::Delete { name } => commands::context::delete(&name, &config_path)?,
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => commands::context::use_context(&name, &config_path)?,
        },

        Commands::Company { action } => {
            let target = target()?;
            match action {
                CompanyAction::List { search, sort } => {
                    commands::company::list(&target, search.as_deref(), sort.as_deref()).await?
                }
                CompanyAction::Get { id } => commands::company::get(&target, id).await?,
                CompanyAction::Create { name, email } => {
                    commands::company::create(&target, &name, &email).await?
                }
                CompanyAction::Update { id, name, email } => {
                    commands::company::update(&target, id, name.as_deref(), email.as_deref())
                        .await?
                }
                CompanyAction::Delete { id, yes } => {
                    commands::company::delete(&target, id, yes).await?
                }
            }
        }

        Commands::Pallet { action } => {
            let target = target()?;
            match action {
                PalletAction::List { filters, sort } => {
                    commands::pallet::list(&target, &filters, sort.as_deref()).await?
                }
                PalletAction::Get { id } => commands::pallet::get(&target, id).await?,
                PalletAction::Create { fields } => {
                    commands::pallet::create(&target, &fields).await?
                }
                PalletAction::Update { id, fields } => {
                    commands::pallet::update(&target, id, &fields).await?
                }
                PalletAction::Delete { id, yes } => {
                    commands::pallet::delete(&target, id, yes).await?
                }
                PalletAction::ExportLinks { filters } => {
                    commands::pallet::export_links(&target, &filters)?
                }
                PalletAction::View { id } => commands::pallet::view(&target, id)?,
            }
        }

        Commands::Desi(args) => {
            let locale = cli.locale.or_else(|| {
                config::ClientConfig::load(&config_path)
                    .ok()
                    .and_then(|c| c.current().map(|ctx| ctx.locale))
            });
            commands::desi::run(&args, cli.output, locale.unwrap_or_default())?
        }

        Commands::Status => commands::status::run(&target()?).await?,

        Commands::Version => println!("palet cli v{}", env!("CARGO_PKG_VERSION")),
    }

    Ok(())
}
