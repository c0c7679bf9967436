use anyhow::{anyhow, bail, Result};
use catalogo_core::{DatasetDescriptor, FilterKind};
use catalogo_storage::{preview_lines, read_collection, read_rows_blocking};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "catalogo")]
#[command(about="Catalogo dataset and user store tooling", long_about=None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the first lines of a file as-is
    Preview {
        file: PathBuf,
        #[arg(long, default_value_t = 5)]
        lines: usize,
    },
    /// Parse a CSV and print its rows as JSON, optionally filtered
    Query {
        file: PathBuf,
        #[arg(long, default_value_t = ',')]
        separator: char,
        /// lenguaje, institucion, salary or experiencia
        #[arg(long, requires = "value")]
        filter: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Dump registered users as JSON lines
    Users {
        store_dir: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn run(cmd: Cmd, out: &mut impl Write) -> Result<()> {
    match cmd {
        Cmd::Preview { file, lines } => {
            for line in preview_lines(&file, lines)? {
                writeln!(out, "{}", line)?;
            }
        }
        Cmd::Query {
            file,
            separator,
            filter,
            value,
        } => {
            let ds = DatasetDescriptor::new("/cli", file, separator)?;
            let mut rows = read_rows_blocking(&ds.source_location, ds.separator_byte()?)?;
            if let Some(f) = filter {
                let kind = FilterKind::from_segment(&f)
                    .ok_or_else(|| anyhow!("unknown filter {f:?}"))?;
                let value = value.ok_or_else(|| anyhow!("--filter needs --value"))?;
                rows = kind.criterion(&value)?.apply(rows);
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
        Cmd::Users { store_dir, out: dump } => {
            let n = dump_users(&store_dir, dump.as_deref(), out)?;
            eprintln!("{}", serde_json::json!({ "documents": n }));
        }
    }
    Ok(())
}

/// Writes the collection as JSON lines to `dump`, or to `out` when no file
/// is given. Returns the number of documents written.
fn dump_users(store_dir: &Path, dump: Option<&Path>, out: &mut impl Write) -> Result<usize> {
    if !store_dir.is_dir() {
        bail!("{} is not a directory", store_dir.display());
    }
    let docs = read_collection(store_dir)?;
    let mut s = String::new();
    for d in &docs {
        s.push_str(&serde_json::to_string(d)?);
        s.push('\n');
    }
    match dump {
        Some(path) => std::fs::write(path, s)?,
        None => out.write_all(s.as_bytes())?,
    }
    Ok(docs.len())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli.cmd, &mut stdout.lock())
}
