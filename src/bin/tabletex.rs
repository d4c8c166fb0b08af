//! tabletex CLI - Render CSV or JSON data as aligned text and LaTeX tables

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use tabletex::{CellContent, Table, TableConfig, TableError, TableResult, WriteMode, WriteOptions};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tabletex")]
#[command(version)]
#[command(about = "Render CSV or JSON data as aligned text tables and LaTeX tabulars", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Table style: T, A, MNRAS, NoLines or A&A
    #[arg(short, long)]
    style: Option<String>,

    /// Decimal places for numeric cells
    #[arg(short, long, allow_negative_numbers = true)]
    decimals: Option<i32>,

    /// Emit only the LaTeX table
    #[arg(long, conflicts_with = "both")]
    latex: bool,

    /// Emit the text table followed by the LaTeX table
    #[arg(long)]
    both: bool,

    /// LaTeX caption
    #[arg(long)]
    caption: Option<String>,

    /// LaTeX label
    #[arg(long)]
    label: Option<String>,

    /// Column alignments for the tabular column layout, e.g. "lcc"
    #[arg(long)]
    alignment: Option<String>,

    /// Extra vertical rule before the given column (repeatable)
    #[arg(long = "vline")]
    vlines: Vec<usize>,

    /// Extra horizontal rule above the given row (repeatable)
    #[arg(long = "hline")]
    hlines: Vec<usize>,

    /// TOML file with table settings; command-line flags take precedence
    #[arg(short, long)]
    config: Option<String>,

    /// Treat the input as a JSON array of rows instead of CSV
    #[arg(long)]
    json: bool,

    /// Append to the output file instead of replacing it
    #[arg(long)]
    append: bool,

    /// Log rendering details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
impl Cli {
    fn table_config(&self) -> TableConfig {
        TableConfig {
            style: self.style.clone(),
            decimal_places: self.decimals,
            caption: self.caption.clone(),
            label: self.label.clone(),
            alignment: self.alignment.clone(),
            vlines: self.vlines.clone(),
            hlines: self.hlines.clone(),
        }
    }

    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            mode: if self.append {
                WriteMode::Append
            } else {
                WriteMode::Truncate
            },
            write_table: !self.latex,
            write_latex: self.latex || self.both,
        }
    }

    fn is_json(&self) -> bool {
        self.json
            || self
                .input_file
                .as_deref()
                .is_some_and(|p| p.to_lowercase().ends_with(".json"))
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> TableResult<()> {
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let rows = if cli.is_json() {
        read_json(&input)?
    } else {
        read_csv(&input)?
    };
    let mut table = build_table(rows)?;

    let file_config = match cli.config {
        Some(ref path) => TableConfig::load(path)?,
        None => TableConfig::default(),
    };
    file_config.merge(cli.table_config()).apply(&mut table)?;

    let options = cli.write_options();
    match cli.output {
        Some(ref path) => {
            table.write_to_file(path, &options)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            if let Some(content) = table.to_output(&options) {
                print!("{}", content);
            }
        }
    }

    Ok(())
}

/// First row is the header, the rest are data rows
#[cfg(feature = "cli")]
fn build_table(rows: Vec<Vec<CellContent>>) -> TableResult<Table> {
    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| TableError::invalid("input has no header row"))?;

    let mut table = Table::new(header.iter().map(ToString::to_string));
    for row in rows {
        table.add_row(row);
    }
    Ok(table)
}

/// Numbers become numeric cells so decimal places apply to them
#[cfg(feature = "cli")]
fn parse_field(raw: &str) -> CellContent {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellContent::Integer(i);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => CellContent::Real(v),
        _ => CellContent::Text(raw.to_string()),
    }
}

#[cfg(feature = "cli")]
fn read_csv(input: &str) -> TableResult<Vec<Vec<CellContent>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(parse_field).collect())
                .map_err(|e| TableError::invalid(format!("malformed CSV: {}", e)))
        })
        .collect()
}

#[cfg(feature = "cli")]
fn read_json(input: &str) -> TableResult<Vec<Vec<CellContent>>> {
    use serde_json::Value;

    let rows: Vec<Vec<Value>> = serde_json::from_str(input)
        .map_err(|e| TableError::invalid(format!("expected a JSON array of rows: {}", e)))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|value| match value {
                    Value::Number(n) => match n.as_i64() {
                        Some(i) => CellContent::Integer(i),
                        None => CellContent::Real(n.as_f64().unwrap_or(f64::NAN)),
                    },
                    Value::String(s) => CellContent::Text(s),
                    Value::Null => CellContent::default(),
                    other => CellContent::Text(other.to_string()),
                })
                .collect()
        })
        .collect())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tabletex --features cli");
    eprintln!("  tabletex [OPTIONS] [INPUT_FILE]");
}
