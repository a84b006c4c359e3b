use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::info;

/// Known-bad margin cells on the source page and their corrected text,
/// keyed by race year.
static BUILTIN: &[(i32, &str)] = &[(1929, "+ 44' 23\"")];

/// Year-keyed replacements applied to the margin column before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MarginCorrections(BTreeMap<i32, String>);

impl MarginCorrections {
    pub fn builtin() -> Self {
        Self(
            BUILTIN
                .iter()
                .map(|(year, value)| (*year, value.to_string()))
                .collect(),
        )
    }

    /// Parse a YAML map of `year: "margin"` entries.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("parsing margin corrections YAML")
    }

    /// Built-in corrections overlaid with the ones in `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading margin corrections {:?}", path))?;
        let extra = Self::from_yaml_str(&text)
            .with_context(|| format!("in {:?}", path))?;
        info!(path = %path.display(), entries = extra.len(), "loaded margin corrections");

        let mut merged = Self::builtin();
        merged.merge(extra);
        Ok(merged)
    }

    /// Entries in `other` win over existing ones.
    pub fn merge(&mut self, other: MarginCorrections) {
        self.0.extend(other.0);
    }

    pub fn get(&self, year: i32) -> Option<&str> {
        self.0.get(&year).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_fixes_1929() {
        let c = MarginCorrections::builtin();
        assert_eq!(c.get(1929), Some("+ 44' 23\""));
        assert_eq!(c.get(1930), None);
    }

    #[test]
    fn test_yaml_file_overrides_builtin() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "1929: \"+ 44' 24\\\"\"")?;
        writeln!(tmp, "1968: \"+ 38\\\"\"")?;

        let c = MarginCorrections::load(tmp.path())?;
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(1929), Some("+ 44' 24\""));
        assert_eq!(c.get(1968), Some("+ 38\""));
        Ok(())
    }

    #[test]
    fn test_empty_and_bad_yaml() {
        assert!(MarginCorrections::from_yaml_str("").unwrap().is_empty());
        assert!(MarginCorrections::from_yaml_str("not: [a, map").is_err());
        assert!(MarginCorrections::from_yaml_str("nineteen: \"+ 1\\\"\"").is_err());
    }
}
