//! smellbook - a field guide to code smells
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use smellbook::catalog::Catalog;
use smellbook::config::{crash_log_path, Config};
use smellbook::core::Tab;
use smellbook::error::exit_codes;
use smellbook::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

// =============================================================================
// CLI Definition
// =============================================================================

/// smellbook - a field guide to code smells
#[derive(Parser)]
#[command(name = "smellbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the smells in a tab
    List {
        /// Tab to list
        #[arg(long, short, value_enum)]
        tab: Option<TabArg>,
        /// Only smells whose name contains this text
        #[arg(long, short)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show a smell by name or share link
    Show {
        /// Smell name
        #[arg(required_unless_present = "link", conflicts_with = "link")]
        name: Vec<String>,
        /// Share link or fragment (e.g. long-method)
        #[arg(long, short)]
        link: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show a random smell
    Random {
        /// Tab to pick from
        #[arg(long, short, value_enum)]
        tab: Option<TabArg>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Mark a smell as learned
    Learn {
        /// Smell name
        #[arg(required = true)]
        name: Vec<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Clear the learned mark of a smell
    Unlearn {
        /// Smell name
        #[arg(required = true)]
        name: Vec<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show learning progress
    Stats {
        /// Tab to report on
        #[arg(long, short, value_enum)]
        tab: Option<TabArg>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Forget all learned progress
    Reset {
        /// Confirm the reset
        #[arg(long, short)]
        yes: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show a random refactoring tip
    Tip {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Print the share link for a smell
    Link {
        /// Smell name
        #[arg(required = true)]
        name: Vec<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show or dismiss the onboarding notice
    Welcome {
        /// Do not show the notice again
        #[arg(long, short)]
        dismiss: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Check the built-in catalog for structural problems
    Validate {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Browse interactively
    Browse {
        /// Tab to start on
        #[arg(long, short, value_enum)]
        tab: Option<TabArg>,
        /// Share link or fragment to open at start
        #[arg(long, short)]
        link: Option<String>,
        /// Do not print a tip at start
        #[arg(long)]
        no_tip: bool,
    },
}

/// Tab names accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabArg {
    General,
    Lambda,
    Workshop,
}

impl From<TabArg> for Tab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::General => Tab::General,
            TabArg::Lambda => Tab::Lambda,
            TabArg::Workshop => Tab::Workshop,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("smellbook error: {}", e);
            ExitCode::from(exit_codes::FAILURE as u8)
        }
    }
}

/// Install the stderr log subscriber, filtered by `SMELLBOOK_LOG`.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SMELLBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.smellbook/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("smellbook panic: {}", info);

        if let Some(crash_log) = crash_log_path() {
            if let Some(parent) = crash_log.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();
    let catalog = Catalog::builtin()?;

    match cli.command {
        Commands::List {
            tab,
            search,
            json,
            quiet,
        } => run_list(&catalog, &config, tab, search, json, quiet),
        Commands::Show {
            name,
            link,
            json,
            quiet,
        } => run_show(&catalog, &config, name, link, json, quiet),
        Commands::Random { tab, json, quiet } => run_random(&catalog, &config, tab, json, quiet),
        Commands::Learn { name, json, quiet } => {
            run_learn(&catalog, &config, &name, true, json, quiet)
        }
        Commands::Unlearn { name, json, quiet } => {
            run_learn(&catalog, &config, &name, false, json, quiet)
        }
        Commands::Stats { tab, json, quiet } => run_stats(&catalog, &config, tab, json, quiet),
        Commands::Reset { yes, json, quiet } => run_reset(&config, yes, json, quiet),
        Commands::Tip { json, quiet } => run_tip(&catalog, json, quiet),
        Commands::Link { name, json, quiet } => run_link(&catalog, &config, &name, json, quiet),
        Commands::Welcome {
            dismiss,
            json,
            quiet,
        } => run_welcome(&config, dismiss, json, quiet),
        Commands::Validate { json, quiet } => run_validate(&catalog, json, quiet),
        Commands::Browse { tab, link, no_tip } => run_browse(&catalog, &config, tab, link, no_tip),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Open the configured key/value store.
///
/// Progress must never block browsing: if the directory cannot be used the
/// session runs on an in-memory store and nothing is persisted.
fn open_store(config: &Config) -> Arc<dyn KeyValueStore> {
    let opened = match config.storage_dir() {
        Some(dir) => FileKeyValueStore::with_dir(dir),
        None => FileKeyValueStore::new(),
    };
    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("{} (fail-open: progress will not be saved)", e);
            Arc::new(MemoryKeyValueStore::new())
        }
    }
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::FAILURE as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted.trim_end());
    }
}

fn run_list(
    catalog: &Catalog,
    config: &Config,
    tab: Option<TabArg>,
    search: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::list::{ListCommand, ListOptions};

    let cmd = ListCommand::new(catalog, open_store(config), config.browse.default_tab);
    let options = ListOptions {
        json,
        quiet,
        tab: tab.map(Tab::from),
        search,
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_show(
    catalog: &Catalog,
    config: &Config,
    name: Vec<String>,
    link: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::show::{ShowCommand, ShowOptions, ShowTarget};

    let target = match link {
        Some(link) => ShowTarget::Link(link),
        None => ShowTarget::Name(name.join(" ")),
    };
    let cmd = ShowCommand::new(catalog, open_store(config), config.share.base_url.as_str());
    let options = ShowOptions { json, quiet };

    let output = cmd.run(&target);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_random(
    catalog: &Catalog,
    config: &Config,
    tab: Option<TabArg>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::random::{RandomCommand, RandomOptions};

    let cmd = RandomCommand::new(catalog, open_store(config), config.browse.default_tab);
    let options = RandomOptions {
        json,
        quiet,
        tab: tab.map(Tab::from),
    };

    let output = cmd.run(&options, &mut rand::rng());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_learn(
    catalog: &Catalog,
    config: &Config,
    name: &[String],
    learned: bool,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::learn::{LearnCommand, LearnOptions};

    let cmd = LearnCommand::new(catalog, open_store(config));
    let options = LearnOptions { json, quiet };

    let output = cmd.run(&name.join(" "), learned);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_stats(
    catalog: &Catalog,
    config: &Config,
    tab: Option<TabArg>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::stats::{StatsCommand, StatsOptions};

    let cmd = StatsCommand::new(catalog, open_store(config), config.browse.default_tab);
    let options = StatsOptions {
        json,
        quiet,
        tab: tab.map(Tab::from),
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_reset(
    config: &Config,
    yes: bool,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::reset::{ResetCommand, ResetOptions};

    let cmd = ResetCommand::new(open_store(config));
    let options = ResetOptions { json, quiet, yes };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_tip(
    catalog: &Catalog,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::tip::{TipCommand, TipOptions};

    let cmd = TipCommand::new(catalog);
    let options = TipOptions { json, quiet };

    let output = cmd.run(&mut rand::rng());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_link(
    catalog: &Catalog,
    config: &Config,
    name: &[String],
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::link::{LinkCommand, LinkOptions};

    let cmd = LinkCommand::new(catalog, config.share.base_url.as_str());
    let options = LinkOptions { json, quiet };

    let output = cmd.run(&name.join(" "));
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_welcome(
    config: &Config,
    dismiss: bool,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::welcome::{WelcomeCommand, WelcomeOptions};

    let cmd = WelcomeCommand::new(open_store(config));
    let options = WelcomeOptions {
        json,
        quiet,
        dismiss,
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_validate(
    catalog: &Catalog,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::validate::{ValidateCommand, ValidateOptions};

    let cmd = ValidateCommand::new(catalog);
    let options = ValidateOptions { json, quiet };

    let output = cmd.run();
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_browse(
    catalog: &Catalog,
    config: &Config,
    tab: Option<TabArg>,
    link: Option<String>,
    no_tip: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use smellbook::cli::browse::{BrowseOptions, Browser};

    let tab = tab.map(Tab::from).unwrap_or(config.browse.default_tab);
    let options = BrowseOptions {
        tab,
        link,
        show_welcome: config.browse.show_welcome,
        show_tip: config.browse.show_tip && !no_tip,
    };

    let mut browser = Browser::new(
        catalog,
        open_store(config),
        tab,
        config.share.base_url.as_str(),
    );
    browser.run(&options, &mut rand::rng())?;

    Ok(ExitCode::from(exit_codes::SUCCESS as u8))
}

// =============================================================================
// Tests
// =============================================================================
