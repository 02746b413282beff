//! Rowpack CLI - run justified row layouts over JSON item lists.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

mod report;

use clap::{Args, Parser, Subcommand};
use rowpack_layout::{Item, RowCalculator, RowConfig};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::{parse_config, parse_items, render_rows, CliError, Format};

#[derive(Parser)]
#[command(name = "rowpack")]
#[command(about = "Justified row layout for items of varying aspect ratio")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out an item list in a single pass
    Layout {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Feed the item list in growing batches, as a scrolling feed would
    Append {
        #[command(flatten)]
        common: CommonArgs,

        /// Items added per pass
        #[arg(short, long, default_value = "10")]
        batch: usize,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// JSON item list (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Container width in pixels
    #[arg(short, long)]
    width: u32,

    /// YAML grid config (max_row_height, horizontal_padding)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum row height, overrides the config file
    #[arg(long)]
    max_row_height: Option<u32>,

    /// Spacing between items, overrides the config file
    #[arg(short, long)]
    padding: Option<u32>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Layout { common } => run_layout(&common),
        Commands::Append { common, batch } => run_append(&common, batch),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &CommonArgs) -> Result<RowConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => RowConfig::default(),
    };
    if let Some(max_row_height) = args.max_row_height {
        config = config.with_max_row_height(max_row_height);
    }
    if let Some(padding) = args.padding {
        config = config.with_horizontal_padding(padding);
    }
    Ok(config)
}

fn load_items(input: Option<&Path>) -> Result<Vec<Item<String>>, CliError> {
    let json = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_items(&json)
}

fn run_layout(args: &CommonArgs) -> Result<String, CliError> {
    let format: Format = args.format.parse()?;
    let config = load_config(args)?;
    let items = load_items(args.input.as_deref())?;

    let mut calc = RowCalculator::new(config)?;
    let rows = calc.layout(args.width, &items);
    info!(items = items.len(), rows = rows.len(), "layout complete");

    render_rows(rows, config.horizontal_padding, format)
}

fn run_append(args: &CommonArgs, batch: usize) -> Result<String, CliError> {
    let format: Format = args.format.parse()?;
    let config = load_config(args)?;
    let items = load_items(args.input.as_deref())?;

    let mut calc = RowCalculator::new(config)?;
    calc.set_width(args.width);

    let mut summary = String::new();
    let mut end = 0;
    while end < items.len() {
        end = (end + batch.max(1)).min(items.len());
        let before = *calc.stats();
        calc.add_items(&items[..end]);
        let after = calc.stats();
        summary.push_str(&format!(
            "pass {}: {} item(s), {} row(s) reused, {} row(s) computed\n",
            after.passes(),
            end,
            after.rows_reused() - before.rows_reused(),
            after.rows_computed() - before.rows_computed()
        ));
    }
    info!(
        passes = calc.stats().passes(),
        reuse_ratio = calc.stats().reuse_ratio(),
        "append run complete"
    );

    let rows = render_rows(calc.rows(), config.horizontal_padding, format)?;
    if format == Format::Json {
        // Keep stdout parseable.
        eprint!("{}", summary);
        Ok(rows)
    } else {
        Ok(format!("{}\n{}", summary, rows))
    }
}
