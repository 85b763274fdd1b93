use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use encoding_rs::Encoding;
use env_logger::{Builder, Env};
use log::error;
use sword_reader::sword::utils::lookup_encoding;
use sword_reader::{convert_batch, convert_module, ConvertOptions, DecodeOptions, WorkCatalog};

/// Convert compressed SWORD commentary modules to OSIS XML
#[derive(Parser, Debug)]
#[command(name = "sword2osis", version, about)]
#[command(group(ArgGroup::new("input").required(true).args(["root", "module"])))]
struct Cli {
    /// Directory whose subdirectories are modules (each with a mods.d/ folder)
    #[arg(long)]
    root: Option<PathBuf>,

    /// A single module directory
    #[arg(long)]
    module: Option<PathBuf>,

    /// Only decode the first N index slots
    #[arg(long)]
    max_slots: Option<usize>,

    /// Truncate each entry to N characters
    #[arg(long)]
    max_text_chars: Option<usize>,

    /// Write at most N entries per output document
    #[arg(long)]
    max_written: Option<usize>,

    /// Drop entries whose chapter exceeds the book's real chapter count
    #[arg(long)]
    strict: bool,

    /// Force a text encoding (e.g. UTF-8, Latin-1) instead of the descriptor's
    #[arg(long, value_parser = encoding_arg)]
    encoding: Option<&'static Encoding>,

    /// Output file extension
    #[arg(long, default_value = sword_reader::sword::convert::DEFAULT_OUTPUT_EXTENSION)]
    ext: String,

    /// Write outputs to this directory instead of each module directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Modules converted concurrently
    #[arg(long, default_value_t = 1)]
    jobs: usize,
}

fn encoding_arg(label: &str) -> Result<&'static Encoding, String> {
    lookup_encoding(label).ok_or_else(|| format!("unknown encoding label '{}'", label))
}

fn init_logger() {
    // RUST_LOG overrides; default is info.
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    let options = ConvertOptions {
        decode: DecodeOptions {
            max_slots: cli.max_slots,
            max_text_chars: cli.max_text_chars,
            strict: cli.strict,
            ..DecodeOptions::default()
        },
        encoding_override: cli.encoding,
        max_written: cli.max_written,
        extension: cli.ext,
        output_dir: cli.out_dir,
        jobs: cli.jobs.max(1),
    };
    let catalog = WorkCatalog::kjv();

    println!("SWORD module to OSIS converter");
    println!("{}", "=".repeat(60));

    if let Some(module_dir) = cli.module {
        return match convert_module(&module_dir, &catalog, &options) {
            Ok(summary) => {
                println!("OK   {}", summary);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to convert {}: {}", module_dir.display(), e);
                println!("FAIL {}: {}", module_dir.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    let Some(root) = cli.root else {
        return ExitCode::FAILURE;
    };
    let report = match convert_batch(&root, &catalog, &options) {
        Ok(report) => report,
        Err(e) => {
            error!("Cannot scan {}: {}", root.display(), e);
            return ExitCode::FAILURE;
        }
    };

    for (dir, result) in &report.results {
        match result {
            Ok(summary) => println!("OK   {}", summary),
            Err(e) => println!("FAIL {}: {}", dir.display(), e),
        }
    }
    println!("{}", "=".repeat(60));
    println!(
        "Conversion complete! ({}/{} successful)",
        report.succeeded(),
        report.total()
    );

    if report.total() > 0 && report.succeeded() == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
