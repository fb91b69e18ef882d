//! gradepace CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use gradepace_core::reconcile::ReconcilePolicy;

mod commands;
mod session;

use session::Session;

#[derive(Parser)]
#[command(
    name = "gradepace",
    version,
    about = "Track assessment scores against a target percentage"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State file path (overrides config and GRADEPACE_STATE_FILE)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and state file
    Init,

    /// Show every subject's standing against the target
    Status {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show what the remaining assessments need
    Plan {
        /// Only show this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Enter or clear a score
    Score {
        #[arg(long)]
        subject: String,

        #[arg(long)]
        assessment: String,

        /// Marks earned (negative values are stored as 0)
        #[arg(
            long,
            allow_hyphen_values = true,
            required_unless_present = "clear",
            conflicts_with = "clear"
        )]
        value: Option<f64>,

        /// Mark the assessment as pending again
        #[arg(long)]
        clear: bool,
    },

    /// Add, remove or rename subjects
    #[command(subcommand)]
    Subject(SubjectCommand),

    /// Edit the shared assessment template
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Set the target percentage (60-100 in steps of 5)
    Target { pct: u32 },

    /// Check the state file for structural errors and warnings
    Validate,

    /// Write HTML, JSON or markdown reports
    Report {
        /// Output format: html, json, markdown, all
        #[arg(long, default_value = "html")]
        format: String,

        /// Output directory (defaults to output_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SubjectCommand {
    /// Add a subject with every assessment pending
    Add { name: String },
    /// Remove a subject and its scores
    Remove { name: String },
    /// Rename a subject
    Rename { from: String, to: String },
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List template entries
    Show,
    /// Append an assessment to every subject
    Add { name: String, max: u32 },
    /// Remove an assessment from every subject
    Remove { name: String },
    /// Rename an assessment, keeping its scores
    Rename { from: String, to: String },
    /// Change an assessment's max marks
    SetMax { name: String, max: u32 },
    /// Replace the whole template, carrying scores over
    Replace {
        /// Entries as NAME:MAX pairs, e.g. "Quiz:10,Midterm:40,Final:50"
        #[arg(long)]
        entries: String,

        /// How scores follow the new template: name or position
        #[arg(long)]
        policy: Option<ReconcilePolicy>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradepace=info")),
        )
        .init();

    let cli = Cli::parse();

    let result =
        Session::open(cli.config.as_deref(), cli.state).and_then(|session| run(&session, cli.command));

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(session: &Session, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::execute(session),
        Commands::Status { format } => commands::status::execute(session, &format),
        Commands::Plan { subject } => commands::plan::execute(session, subject.as_deref()),
        Commands::Score {
            subject,
            assessment,
            value,
            clear,
        } => {
            let value = if clear { None } else { value };
            commands::score::execute(session, &subject, &assessment, value)
        }
        Commands::Subject(cmd) => commands::subject::execute(session, cmd),
        Commands::Template(cmd) => commands::template::execute(session, cmd),
        Commands::Target { pct } => commands::target::execute(session, pct),
        Commands::Validate => commands::validate::execute(session),
        Commands::Report { format, output } => commands::report::execute(session, &format, output),
    }
}
