use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use credit_calculator_core::prelude::*;
use credit_calculator_core::{coerce_rate, render_report, Catalog};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod views;

use config::{get_config_path, load_config, save_config, CalculatorConfig};
use views::*;

#[derive(Parser, Debug)]
#[clap(author = "Red", version, about)]
struct Args {
    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    /// Settings file (defaults to ~/.credit-calculator.json)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<String>,

    /// JSON catalog of journey stages to use instead of the built-in one
    #[arg(long = "catalog", global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List journey stages and message type ids
    Catalog,

    /// Print monthly and annual credits for the selected message types
    Summary(InputArgs),

    /// Write one of the CSV reports
    Export {
        #[arg(value_enum)]
        kind: ReportArg,

        #[command(flatten)]
        input: InputArgs,

        /// Configuration name for the template report
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Directory the report file is written to
        #[arg(short = 'o', long = "out-dir", default_value = ".")]
        out_dir: String,

        /// Print the report instead of writing a file
        #[arg(long = "stdout")]
        stdout: bool,
    },

    /// Show or edit the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Results CSV to import before reporting
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Frequency override as MESSAGE_TYPE_ID=FREQUENCY (repeatable)
    #[arg(short = 'f', long = "frequency", value_parser = parse_frequency_override)]
    frequencies: Vec<(String, Frequency)>,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetRate { channel: ChannelKind, value: String },
    Filter { channel: ChannelKind, state: Toggle },
    Frequency { id: String, frequency: Frequency },
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportArg {
    Results,
    Simple,
    Detailed,
    Template,
    Breakdown,
    Blank,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Results => ReportKind::Results,
            ReportArg::Simple => ReportKind::Simple,
            ReportArg::Detailed => ReportKind::Detailed,
            ReportArg::Template => ReportKind::Template,
            ReportArg::Breakdown => ReportKind::Breakdown,
            ReportArg::Blank => ReportKind::BlankTemplate,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Toggle {
    On,
    Off,
}

fn parse_frequency_override(s: &str) -> Result<(String, Frequency), String> {
    let (id, frequency) = s
        .split_once('=')
        .ok_or_else(|| format!("expected MESSAGE_TYPE_ID=FREQUENCY, got '{}'", s))?;
    let frequency = frequency.parse::<Frequency>().map_err(|e| e.to_string())?;
    Ok((id.trim().to_string(), frequency))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load_from_file(shellexpand::tilde(path).as_ref()),
        None => Ok(Catalog::new()),
    }
}

struct AppState {
    store: CalculatorStore,
}

impl AppState {
    fn new(catalog: Catalog, config: &CalculatorConfig) -> Self {
        let mut store = CalculatorStore::from_catalog(catalog);
        store.set_credit_rates(config.credit_rates);
        store.set_channel_filters(config.channel_filters);

        let mut state = Self { store };
        let saved: Vec<(String, Frequency)> = config
            .frequencies
            .iter()
            .map(|(id, frequency)| (id.clone(), *frequency))
            .collect();
        state.apply_frequencies(&saved);
        state
    }

    fn apply_frequencies(&mut self, frequencies: &[(String, Frequency)]) {
        for (id, frequency) in frequencies {
            let update = MessageTypeUpdate::new().frequency(*frequency);
            if !self.store.update_message_type(id, update) {
                warn!(id = %id, "Ignoring frequency for unknown message type");
            }
        }
    }

    fn load_input(&mut self, input: &InputArgs) -> Result<()> {
        self.apply_frequencies(&input.frequencies);

        if let Some(path) = &input.input {
            let path = shellexpand::tilde(path);
            let summary = self.store.import_results_file(Path::new(path.as_ref()))?;
            info!(
                path = %path,
                updated = summary.updated_count,
                "Loaded results file"
            );
            eprintln!("Updated {} message types with new data.", summary.updated_count);
        }

        Ok(())
    }
}

fn write_report(
    state: &AppState,
    kind: ReportKind,
    name: Option<String>,
    out_dir: &str,
    stdout: bool,
) -> Result<()> {
    let mut options = ReportOptions::new(Utc::now());
    if let Some(name) = name {
        options = options.with_config_name(name);
    }

    let csv = render_report(kind, &state.store, &options);
    if stdout {
        println!("{}", csv);
        return Ok(());
    }

    let dir = PathBuf::from(shellexpand::tilde(out_dir).as_ref());
    fs::create_dir_all(&dir)?;
    let path = dir.join(options.file_name(kind));
    fs::write(&path, csv)?;
    println!("Wrote {} to {}", kind.title(), path.display());
    Ok(())
}

fn run_config_action(
    action: ConfigAction,
    config_path: &Path,
    mut config: CalculatorConfig,
    catalog: Catalog,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        ConfigAction::SetRate { channel, value } => {
            config.credit_rates.set(channel, coerce_rate(&value));
        }
        ConfigAction::Filter { channel, state } => {
            config.channel_filters.set(channel, state == Toggle::On);
        }
        ConfigAction::Frequency { id, frequency } => {
            let store = CalculatorStore::from_catalog(catalog);
            if store.message_type(&id).is_none() {
                bail!("Unknown message type id: {} (see `catalog`)", id);
            }
            config.frequencies.insert(id, frequency);
        }
        ConfigAction::Reset => {
            config = CalculatorConfig::default();
        }
    }

    save_config(config_path, &config)?;
    println!("Saved settings to {}", config_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = get_config_path(args.config.as_deref());
    let config = load_config(&config_path)?;
    let catalog = load_catalog(args.catalog.as_deref())?;

    match args.command {
        Command::Catalog => {
            let state = AppState::new(catalog, &config);
            print!("{}", CatalogView::render(&state.store));
        }
        Command::Summary(input) => {
            let mut state = AppState::new(catalog, &config);
            state.load_input(&input)?;
            print!("{}", SummaryView::render(&state.store));
        }
        Command::Export {
            kind,
            input,
            name,
            out_dir,
            stdout,
        } => {
            let mut state = AppState::new(catalog, &config);
            state.load_input(&input)?;
            write_report(&state, kind.into(), name, &out_dir, stdout)?;
        }
        Command::Config { action } => {
            run_config_action(action, &config_path, config, catalog)?;
        }
    }

    Ok(())
}
