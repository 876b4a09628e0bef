use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

use signup_client::display::print_page;
use signup_client::{
    ClientConfig, HttpApi, Interaction, MemoryPage, MutationOutcome, Outcome, RefreshOutcome,
    SignupApp, SubmitEvent,
};

/// Activity signup client
#[derive(Parser, Debug)]
#[command(name = "signup-client")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Service root (overrides SIGNUP_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every activity and its roster
    #[command(alias = "ls")]
    List,

    /// Sign a participant up for an activity
    Signup {
        /// Activity name
        activity: String,
        /// Participant email
        email: String,
    },

    /// Remove a participant from an activity
    Remove {
        /// Activity name
        activity: String,
        /// Participant email
        email: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = ClientConfig::from_env().context("invalid environment configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    LocalSet::new().run_until(run(cli.command, config)).await
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, config: ClientConfig) -> Result<()> {
    let api = HttpApi::new(&config)?;
    let page = Rc::new(MemoryPage::new());
    let app = SignupApp::new(Rc::clone(&page), api, &config);

    if app.start().await == RefreshOutcome::Failed {
        bail!("failed to load activities from {}", config.base_url);
    }

    let outcome = match command {
        Command::List => None,
        Command::Signup { activity, email } => {
            if !page.picker_options().iter().any(|option| option.value == activity) {
                bail!("unknown activity '{}'", activity);
            }
            page.select_activity(&activity);
            page.type_contact(&email);
            Some(app.handle(Interaction::Submit(SubmitEvent::new())).await)
        }
        Command::Remove { activity, email, yes } => {
            let target = page
                .removal_for(&activity, &email)
                .with_context(|| format!("{} is not on the {} roster", email, activity))?;
            if yes {
                page.answer_confirmations(true);
            } else {
                page.set_confirmer(ask_on_stdin);
            }
            Some(app.handle(Interaction::Remove(target)).await)
        }
    };

    print_page(&app.store().displayed(), &page.message());

    match outcome {
        Some(Outcome::Mutated(MutationOutcome::Rejected | MutationOutcome::Failed)) => {
            bail!("{}", page.message().text)
        }
        _ => Ok(()),
    }
}

fn ask_on_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
