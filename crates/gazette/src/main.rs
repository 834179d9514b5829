// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! World Leaders' Gazette.
//!
//! This is the binary entry point: it loads configuration, initializes
//! tracing and dispatches to the subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod consult;
mod debate;
mod personas;
mod serve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gazette_config::GazetteConfig;

/// World Leaders' Gazette: AI persona debates streamed, archived and narrated.
#[derive(Parser, Debug)]
#[command(name = "gazette", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway (the default).
    Serve,
    /// Inspect the persona store.
    Personas {
        #[command(subcommand)]
        action: PersonasAction,
    },
    /// Run one debate in the terminal.
    Debate(DebateArgs),
    /// Ask one persona a question and print the reply.
    Consult(ConsultArgs),
    /// Manage Gazette configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum PersonasAction {
    /// List stored personas in creation order.
    List,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Validate configuration and print the effective settings.
    Check,
}

#[derive(Args, Debug)]
pub struct DebateArgs {
    /// Debate topic.
    pub topic: String,
    /// Persona id arguing the progressive side.
    #[arg(short = 'a', long)]
    pub persona_a: String,
    /// Persona id arguing the conservative side.
    #[arg(short = 'b', long)]
    pub persona_b: String,
    /// Number of rounds (defaults to `debate.default_rounds`).
    #[arg(long)]
    pub rounds: Option<u32>,
    /// Archive the transcript and synthesize the podcast afterwards.
    #[arg(long)]
    pub publish: bool,
}

#[derive(Args, Debug)]
pub struct ConsultArgs {
    /// Persona id to consult.
    pub persona: String,
    /// The question to ask.
    pub question: String,
    /// Sampling temperature (0..=2).
    #[arg(long)]
    pub temperature: Option<f32>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => gazette_config::load_and_validate_path(path),
        None => gazette_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            gazette_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Personas {
            action: PersonasAction::List,
        } => personas::list(&config).await,
        Commands::Debate(args) => debate::run_debate(config, args).await,
        Commands::Consult(args) => consult::run_consult(config, args).await,
        Commands::Config {
            action: ConfigAction::Check,
        } => {
            print_config_summary(&config);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over the config.
///
/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Workspace crates logged at the configured level; everything else at warn.
const LOG_TARGETS: &[&str] = &[
    "gazette",
    "gazette_debate",
    "gazette_gateway",
    "gazette_storage",
    "gazette_gemini",
    "gazette_pinata",
    "gazette_portrait",
    "gazette_wallet",
    "gazette_news",
];

fn default_filter(log_level: &str) -> String {
    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

fn print_config_summary(config: &GazetteConfig) {
    let set = |v: &Option<String>| if v.is_some() { "set" } else { "unset" };
    println!("config ok");
    println!("  server      {}:{}", config.server.host, config.server.port);
    println!("  database    {}", config.storage.database_path);
    println!("  public dir  {}", config.server.public_dir);
    println!(
        "  debate      {} rounds (max {}), window {}, delay {}ms",
        config.debate.default_rounds,
        config.debate.max_rounds,
        config.debate.context_window,
        config.debate.turn_delay_ms
    );
    println!("  gemini key  {}", set(&config.gemini.api_key));
    println!("  pinning key {}", set(&config.pinning.api_key));
    println!("  portrait    {}", set(&config.portrait.api_key));
    println!("  news key    {}", set(&config.news.api_key));
    println!("  wallet      {}", set(&config.wallet.session_token));
}
