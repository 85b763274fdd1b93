//! Module descriptor (`mods.d/*.conf`) parsing.
//!
//! A descriptor is an INI-like file with one `[ModuleName]` section:
//!
//! ```text
//! [MHC]
//! DataPath=./modules/comments/zcom/mhc/
//! ModDrv=zCom
//! CompressType=ZIP
//! Encoding=UTF-8
//! About=First line\par\
//!  continued on the next line
//! ```
//!
//! Lines ending in `\` continue onto the next line. Keys may repeat; lookups
//! return the first value.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use log::debug;

use super::types::error::{Result, SwordError};
use super::utils;

/// Name of the descriptor directory inside a module tree.
pub const DESCRIPTOR_DIR: &str = "mods.d";

/// A parsed module descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    entries: Vec<(String, String)>,
}

impl ModuleDescriptor {
    /// Parses descriptor text. Only the first section is kept.
    pub fn parse(text: &str) -> Result<Self> {
        let mut name: Option<String> = None;
        let mut entries = Vec::new();
        let mut pending: Option<(String, String)> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim_end_matches('\r');

            if let Some((key, mut value)) = pending.take() {
                let (part, continues) = split_continuation(line);
                value.push_str(part);
                if continues {
                    pending = Some((key, value));
                } else {
                    entries.push((key, value));
                }
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if let Some(section) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                if name.is_some() {
                    debug!("Ignoring extra descriptor section [{}]", section);
                    break;
                }
                name = Some(section.trim().to_string());
                continue;
            }

            if name.is_none() {
                return Err(SwordError::Configuration(format!(
                    "descriptor entry before any [section]: '{}'",
                    trimmed
                )));
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                debug!("Ignoring malformed descriptor line: '{}'", trimmed);
                continue;
            };
            let (value, continues) = split_continuation(value.trim_start());
            let entry = (key.trim().to_string(), value.to_string());
            if continues {
                pending = Some(entry);
            } else {
                entries.push(entry);
            }
        }

        if let Some(entry) = pending {
            entries.push(entry);
        }

        let name = name.ok_or_else(|| {
            SwordError::Configuration("descriptor has no [module] section".to_string())
        })?;
        Ok(Self { name, entries })
    }

    /// Reads and parses a descriptor file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = utils::decode_text(&bytes, encoding_rs::UTF_8);
        Self::parse(&text)
    }

    /// First value for `key` (case-sensitive, as written by module authors).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `DataPath` with surrounding `.` and `/` characters removed.
    ///
    /// An absent key yields an empty path, i.e. the module directory itself.
    pub fn data_path(&self) -> &str {
        self.get("DataPath")
            .unwrap_or("")
            .trim()
            .trim_matches(|c| c == '.' || c == '/')
    }

    /// Text encoding of entries; UTF-8 unless the descriptor says otherwise.
    pub fn encoding(&self) -> &'static Encoding {
        self.get("Encoding")
            .map(utils::parse_encoding)
            .unwrap_or(encoding_rs::UTF_8)
    }

    pub fn driver(&self) -> Option<&str> {
        self.get("ModDrv")
    }

    pub fn compress_type(&self) -> Option<&str> {
        self.get("CompressType")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("Description")
    }
}

/// Returns the first `*.conf` under `<module_dir>/mods.d`, by file name.
pub fn find_descriptor(module_dir: &Path) -> Result<PathBuf> {
    let dir = module_dir.join(DESCRIPTOR_DIR);
    let entries = fs::read_dir(&dir).map_err(|e| {
        SwordError::Configuration(format!("cannot read {}: {}", dir.display(), e))
    })?;

    let mut confs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "conf"))
        .collect();
    confs.sort();

    confs.into_iter().next().ok_or_else(|| {
        SwordError::Configuration(format!("no .conf file found in {}", dir.display()))
    })
}

fn split_continuation(line: &str) -> (&str, bool) {
    match line.strip_suffix('\\') {
        Some(rest) => (rest, true),
        None => (line.trim_end(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MHC: &str = "\
# Matthew Henry
[MHC]
DataPath=./modules/comments/zcom/mhc/
ModDrv=zCom
CompressType=ZIP
Encoding=UTF-8
Description=Matthew Henry's Complete Commentary
About=Volume one\\par\\
 and more
GlobalOptionFilter=OSISFootnotes
GlobalOptionFilter=OSISHeadings
";

    #[test]
    fn parses_section_and_keys() {
        let conf = ModuleDescriptor::parse(MHC).unwrap();
        assert_eq!(conf.name, "MHC");
        assert_eq!(conf.data_path(), "modules/comments/zcom/mhc");
        assert_eq!(conf.driver(), Some("zCom"));
        assert_eq!(conf.compress_type(), Some("ZIP"));
        assert_eq!(conf.encoding(), encoding_rs::UTF_8);
        assert_eq!(conf.description(), Some("Matthew Henry's Complete Commentary"));
    }

    #[test]
    fn continuation_lines_are_joined() {
        let conf = ModuleDescriptor::parse(MHC).unwrap();
        assert_eq!(conf.get("About"), Some("Volume one\\par and more"));
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let conf = ModuleDescriptor::parse(MHC).unwrap();
        assert_eq!(conf.get("GlobalOptionFilter"), Some("OSISFootnotes"));
    }

    #[test]
    fn missing_section_is_configuration_error() {
        assert!(matches!(
            ModuleDescriptor::parse("DataPath=./x/"),
            Err(SwordError::Configuration(_))
        ));
        assert!(ModuleDescriptor::parse("").is_err());
    }

    #[test]
    fn absent_data_path_is_module_root() {
        let conf = ModuleDescriptor::parse("[X]\nModDrv=zCom\n").unwrap();
        assert_eq!(conf.data_path(), "");
    }

    #[test]
    fn latin1_descriptor_encoding() {
        let conf = ModuleDescriptor::parse("[X]\nEncoding=Latin-1\n").unwrap();
        assert_eq!(conf.encoding(), encoding_rs::WINDOWS_1252);
    }
}
