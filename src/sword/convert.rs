//! Module-directory to OSIS conversion, for one module or a whole tree.
//!
//! A module directory looks like:
//!
//! ```text
//! <module_dir>/
//! ├── mods.d/mhc.conf          descriptor, DataPath=./modules/comments/zcom/mhc/
//! └── modules/comments/zcom/mhc/
//!     ├── mhc.zdx              index
//!     └── mhc.zdt              data
//! ```
//!
//! Conversion writes `<module_dir>/<dir name>.<extension>`. A module whose
//! descriptor, data directory or index is missing fails on its own; the rest
//! of a batch still runs.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use log::{error, info, warn};

use super::config::{self, ModuleDescriptor, DESCRIPTOR_DIR};
use super::decoder::ModuleDecoder;
use super::format::index::IndexReader;
use super::osis::OsisWriter;
use super::types::catalog::WorkCatalog;
use super::types::error::{Result, SwordError};
use super::types::models::{DecodeOptions, DecodeStats, IndexRecord};

pub const INDEX_EXTENSION: &str = "zdx";
pub const DATA_EXTENSION: &str = "zdt";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "osis.xml";

/// Caller policy for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Slot limit, text cap and strictness. The encoding here is only used
    /// when `encoding_override` is set; otherwise the descriptor decides.
    pub decode: DecodeOptions,
    /// Forces a text encoding regardless of the descriptor.
    pub encoding_override: Option<&'static Encoding>,
    /// Maximum number of records written per document.
    pub max_written: Option<usize>,
    /// Output file extension, without the leading dot.
    pub extension: String,
    /// Write outputs here instead of into each module directory.
    pub output_dir: Option<PathBuf>,
    /// Number of modules converted concurrently in a batch.
    pub jobs: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            decode: DecodeOptions::default(),
            encoding_override: None,
            max_written: None,
            extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            output_dir: None,
            jobs: 1,
        }
    }
}

/// Resolved on-disk locations of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFiles {
    pub data_dir: PathBuf,
    pub index: PathBuf,
    pub data: PathBuf,
}

impl ModuleFiles {
    /// Finds the index/data pair for `descriptor` under `module_dir`.
    ///
    /// Prefers `<name in lowercase>.zdx`; otherwise takes the first `*.zdx`
    /// by file name. The data file must share the index's stem.
    pub fn locate(module_dir: &Path, descriptor: &ModuleDescriptor) -> Result<Self> {
        let data_dir = module_dir.join(descriptor.data_path());
        if !data_dir.is_dir() {
            return Err(SwordError::Configuration(format!(
                "data directory not found: {}",
                data_dir.display()
            )));
        }

        let preferred = data_dir.join(format!(
            "{}.{}",
            descriptor.name.to_lowercase(),
            INDEX_EXTENSION
        ));
        let index = if preferred.is_file() {
            preferred
        } else {
            first_with_extension(&data_dir, INDEX_EXTENSION)?.ok_or_else(|| {
                SwordError::Configuration(format!(
                    "no .{} index found in {}",
                    INDEX_EXTENSION,
                    data_dir.display()
                ))
            })?
        };

        let data = index.with_extension(DATA_EXTENSION);
        if !data.is_file() {
            return Err(SwordError::Configuration(format!(
                "data file not found next to index: {}",
                data.display()
            )));
        }

        Ok(Self { data_dir, index, data })
    }
}

/// Outcome of converting one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    pub module: String,
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub index_records: usize,
    pub stats: DecodeStats,
    pub written: usize,
}

impl fmt::Display for ModuleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} index records, {} decoded, {} skipped ({} empty, {} failed, {} out of range), {} written to {}",
            self.module,
            self.index_records,
            self.stats.decoded,
            self.stats.skipped(),
            self.stats.empty,
            self.stats.failed,
            self.stats.out_of_range,
            self.written,
            self.output.display()
        )
    }
}

/// Per-module results of a batch, in directory-name order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<ModuleSummary>)>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Converts the module rooted at `module_dir`.
pub fn convert_module(
    module_dir: &Path,
    catalog: &WorkCatalog,
    options: &ConvertOptions,
) -> Result<ModuleSummary> {
    info!("Converting module directory: {}", module_dir.display());

    let descriptor = ModuleDescriptor::load(config::find_descriptor(module_dir)?)?;
    info!("Module: {}", descriptor.name);
    info!("Data path: {}", descriptor.data_path());
    if let Some(description) = descriptor.description() {
        info!("Description: {}", description);
    }
    check_driver(&descriptor);

    let files = ModuleFiles::locate(module_dir, &descriptor)?;
    info!("Reading index: {}", files.index.display());
    info!("Reading data: {}", files.data.display());

    let index_bytes = fs::read(&files.index)?;
    let index = IndexReader::new()
        .with_limit(options.decode.max_slots)
        .parse(&index_bytes)?;
    let index_records = index_bytes.len() / IndexRecord::ENCODED_LEN;
    info!("Found {} index entries", index_records);

    let decode_options = DecodeOptions {
        encoding: options.encoding_override.unwrap_or_else(|| descriptor.encoding()),
        ..options.decode
    };
    let mut blob = BufReader::new(File::open(&files.data)?);
    let report = ModuleDecoder::new(catalog, decode_options).decode(&index, &mut blob);
    if report.records.is_empty() {
        warn!("No entries decoded from {}, writing an empty document", descriptor.name);
    }

    let output = output_path(module_dir, options)?;
    let mut writer = OsisWriter::new(BufWriter::new(File::create(&output)?))?
        .with_max_records(options.max_written);
    writer.write_records(&report.records)?;
    let written = writer.written();
    writer.finish()?;

    let summary = ModuleSummary {
        module: descriptor.name,
        data_dir: files.data_dir,
        output,
        index_records,
        stats: report.stats,
        written,
    };
    info!("{}", summary);
    Ok(summary)
}

/// Lists every directory directly under `root` that has a `mods.d` folder.
pub fn discover_modules(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir() && p.join(DESCRIPTOR_DIR).is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Converts every module under `root`. Individual failures are recorded in
/// the report; only an unreadable `root` is an error.
pub fn convert_batch(
    root: &Path,
    catalog: &WorkCatalog,
    options: &ConvertOptions,
) -> Result<BatchReport> {
    let dirs = discover_modules(root)?;
    info!("Found {} module directories", dirs.len());

    let results = if options.jobs <= 1 {
        dirs.iter()
            .map(|dir| convert_module(dir, catalog, options))
            .collect::<Vec<_>>()
    } else {
        let mut results = Vec::with_capacity(dirs.len());
        for group in dirs.chunks(options.jobs) {
            std::thread::scope(|s| {
                let handles: Vec<_> = group
                    .iter()
                    .map(|dir| s.spawn(move || convert_module(dir, catalog, options)))
                    .collect();
                for handle in handles {
                    let result = handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                    results.push(result);
                }
            });
        }
        results
    };

    let report = BatchReport {
        results: dirs.into_iter().zip(results).collect(),
    };
    for (dir, result) in &report.results {
        if let Err(e) = result {
            error!("Module {} failed: {}", dir.display(), e);
        }
    }
    info!(
        "Conversion complete ({}/{} successful)",
        report.succeeded(),
        report.total()
    );
    Ok(report)
}

fn output_path(module_dir: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let dir_name = module_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            SwordError::Configuration(format!(
                "module directory has no name: {}",
                module_dir.display()
            ))
        })?;
    let file_name = format!("{}.{}", dir_name, options.extension.trim_start_matches('.'));

    let parent = match &options.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => module_dir.to_path_buf(),
    };
    Ok(parent.join(file_name))
}

fn check_driver(descriptor: &ModuleDescriptor) {
    if let Some(compress) = descriptor.compress_type() {
        if !compress.eq_ignore_ascii_case("ZIP") {
            warn!(
                "{}: CompressType={} is not supported, entries will likely fail to inflate",
                descriptor.name, compress
            );
        }
    }
    if let Some(driver) = descriptor.driver() {
        if !driver.starts_with('z') {
            warn!("{}: ModDrv={} is not a compressed driver", descriptor.name, driver);
        }
    }
}

fn first_with_extension(dir: &Path, extension: &str) -> Result<Option<PathBuf>> {
    let mut matches: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == extension))
        .collect();
    matches.sort();
    Ok(matches.into_iter().next())
}
