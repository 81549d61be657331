//! duckchunk - Command line entry point
//!
//! Describes logical types and round-trips JSON rows through data chunks.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;
use tracing::Level;

use duckchunk::{
    chunks_from_json, convert_rows_from_chunks, from_fn, ChunkConfig, DataChunk, JsonObjectRows,
    JsonValueConverter, LogicalType, PerValue, TypeId, Value,
};

#[derive(Parser)]
#[command(name = "duckchunk")]
#[command(about = "Logical types and data chunks in the DuckDB vector layout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the id, code, alias and parameters of each type
    Describe {
        /// Type strings such as "DECIMAL(18,3)" or "MAP(VARCHAR, INTEGER[])"
        #[arg(required = true)]
        types: Vec<String>,
    },
    /// Read a JSON array of rows from stdin and print them back through a row converter
    Convert {
        /// Column type, once per column
        #[arg(short = 't', long = "type", required = true)]
        types: Vec<String>,

        /// Column name, once per column (defaults to column0, column1, ...)
        #[arg(short = 'n', long = "name")]
        names: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// JSON file with chunk settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One JSON array per row
    Json,
    /// One JSON object per row, keyed by column name
    Objects,
    /// Aligned text table
    Table,
    /// Comma separated values with a header line
    Csv,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_types(types: &[String]) -> Result<Vec<LogicalType>> {
    types
        .iter()
        .map(|text| {
            text.parse::<LogicalType>()
                .with_context(|| format!("invalid type '{}'", text))
        })
        .collect()
}

fn describe_type(out: &mut String, logical_type: &LogicalType, depth: usize) -> Result<()> {
    let pad = "  ".repeat(depth + 1);
    let id = logical_type.type_id();
    writeln!(out, "{}id: {} ({})", pad, id, id.code())?;
    if let Some(alias) = logical_type.alias() {
        writeln!(out, "{}alias: {}", pad, alias)?;
    }
    match id {
        TypeId::Decimal => writeln!(
            out,
            "{}width: {}, scale: {}, internal: {}",
            pad,
            logical_type.decimal_width()?,
            logical_type.decimal_scale()?,
            logical_type.decimal_internal_type()?
        )?,
        TypeId::Enum => writeln!(
            out,
            "{}members: {}, internal: {}",
            pad,
            logical_type.enum_dictionary_size()?,
            logical_type.enum_internal_type()?
        )?,
        TypeId::List => {
            let child = logical_type.list_child_type()?;
            writeln!(out, "{}child: {}", pad, child)?;
            describe_type(out, &child, depth + 1)?;
        }
        TypeId::Array => {
            let child = logical_type.array_child_type()?;
            writeln!(out, "{}size: {}", pad, logical_type.array_size()?)?;
            writeln!(out, "{}child: {}", pad, child)?;
            describe_type(out, &child, depth + 1)?;
        }
        TypeId::Map => {
            let key = logical_type.map_key_type()?;
            let value = logical_type.map_value_type()?;
            writeln!(out, "{}key: {}", pad, key)?;
            describe_type(out, &key, depth + 1)?;
            writeln!(out, "{}value: {}", pad, value)?;
            describe_type(out, &value, depth + 1)?;
        }
        TypeId::Struct => {
            for i in 0..logical_type.struct_child_count()? {
                let child = logical_type.struct_child_type(i)?;
                writeln!(
                    out,
                    "{}field {}: {}",
                    pad,
                    logical_type.struct_child_name(i)?,
                    child
                )?;
                describe_type(out, &child, depth + 1)?;
            }
        }
        TypeId::Union => {
            for i in 0..logical_type.union_member_count()? {
                let member = logical_type.union_member_type(i)?;
                writeln!(
                    out,
                    "{}member {}: {}",
                    pad,
                    logical_type.union_member_name(i)?,
                    member
                )?;
                describe_type(out, &member, depth + 1)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn run_describe(types: &[String]) -> Result<()> {
    for (text, logical_type) in types.iter().zip(parse_types(types)?) {
        let mut out = String::new();
        writeln!(out, "{}", logical_type)?;
        describe_type(&mut out, &logical_type, 0)
            .with_context(|| format!("cannot describe '{}'", text))?;
        print!("{}", out);
    }
    Ok(())
}

fn text_rows(chunks: &[DataChunk]) -> Result<Vec<Vec<String>>> {
    let to_text = from_fn(|row: Vec<Value>, _types: &[&LogicalType]| {
        Ok(row.iter().map(Value::to_string).collect::<Vec<_>>())
    });
    Ok(convert_rows_from_chunks(chunks, &to_text)?)
}

fn print_table(names: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = names.iter().map(|name| name.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!(" {:<width$} ", cell, width = *width))
            .collect::<Vec<_>>()
            .join("|")
    };
    println!("{}", line(names));
    println!(
        "{}",
        widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    for row in rows {
        println!("{}", line(&row[..]));
    }
    println!("({} rows)", rows.len());
}

fn run_convert(
    types: &[String],
    names: Vec<String>,
    format: OutputFormat,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(path) => ChunkConfig::from_json_file(&path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => ChunkConfig::default(),
    };
    let logical_types = parse_types(types)?;
    let names = if names.is_empty() {
        JsonObjectRows::numbered(logical_types.len()).names().to_vec()
    } else if names.len() == logical_types.len() {
        names
    } else {
        bail!(
            "got {} column names for {} column types",
            names.len(),
            logical_types.len()
        );
    };

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("cannot read rows from stdin")?;
    let rows: serde_json::Value = serde_json::from_str(&input).context("stdin is not valid JSON")?;
    let chunks = chunks_from_json(&rows, &logical_types, &names, &config)
        .context("cannot load rows into data chunks")?;

    match format {
        OutputFormat::Json => {
            let rows = convert_rows_from_chunks(&chunks, &PerValue(JsonValueConverter))?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Objects => {
            let rows = convert_rows_from_chunks(&chunks, &JsonObjectRows::new(names))?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => print_table(&names, &text_rows(&chunks)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(&names)?;
            for row in text_rows(&chunks)? {
                writer.write_record(&row)?;
            }
            writer.flush()?;
        }
    }

    for chunk in chunks {
        chunk.release();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Describe { types } => run_describe(&types),
        Command::Convert {
            types,
            names,
            format,
            config,
        } => run_convert(&types, names, format, config),
    }
}
