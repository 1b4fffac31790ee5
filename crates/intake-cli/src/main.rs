mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{add::AddArgs, config::ConfigSubcommand, search::SearchArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "clients",
    about = "Client intake records: list, search, summarize, update, export, and report",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: nearest directory with intake.yaml, else cwd)
    #[arg(long, global = true, env = "CLIENTS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every client record, oldest first
    List,

    /// Show one client file: canonical view plus stored fields
    Show { file: String },

    /// Filter clients by business name, industry, or intake date
    Search(SearchArgs),

    /// Aggregate statistics over all clients
    Summary {
        /// Write the Markdown summary instead of printing the text one
        #[arg(long)]
        markdown: bool,
        /// Markdown output path (default: summary_file from intake.yaml)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Overwrite or add fields on a stored client file
    Update {
        file: String,
        /// KEY=VALUE; VALUE is parsed as JSON when possible, else kept as text
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Record a new client
    Add(AddArgs),

    /// Export all clients to CSV
    Export {
        /// Output path (default: export_file from intake.yaml)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a Markdown consulting report for one client
    Report {
        file: String,
        /// Custom template (default: template from intake.yaml, else built-in)
        #[arg(long)]
        template: Option<PathBuf>,
        /// Output path (default: reports_dir/<slug>-report-<date>.md)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Inspect the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::List => cmd::list::run(&root, cli.json),
        Commands::Show { file } => cmd::show::run(&root, &file, cli.json),
        Commands::Search(args) => cmd::search::run(&root, args, cli.json),
        Commands::Summary { markdown, out } => {
            cmd::summary::run(&root, markdown, out.as_deref(), cli.json)
        }
        Commands::Update { file, set } => cmd::update::run(&root, &file, &set, cli.json),
        Commands::Add(args) => cmd::add::run(&root, args, cli.json),
        Commands::Export { out } => cmd::export::run(&root, out.as_deref(), cli.json),
        Commands::Report {
            file,
            template,
            out,
        } => cmd::report::run(&root, &file, template.as_deref(), out.as_deref(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
