//! Normalization configuration format.

use crate::{bndbox::DuplicatePolicy, common::*};

/// The normalization options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Drop `<?xml ...?>` declaration lines.
    pub strip_declaration: bool,
    /// The value written to `<source><database>`. Disabled if null.
    pub database: Option<String>,
    /// Tags removed from the whole document.
    pub strip_tags: Vec<String>,
    /// Which occurrence of a duplicated coordinate tag is kept.
    pub duplicate_policy: DuplicatePolicy,
}

impl NormalizeConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file '{}'", path.display()))?;
        Self::from_json5(&text)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    pub fn from_json5(text: &str) -> Result<Self> {
        let config = json5::from_str(text)?;
        Ok(config)
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            strip_declaration: true,
            database: Some("Unknown".into()),
            strip_tags: vec!["occluded".into()],
            duplicate_policy: DuplicatePolicy::First,
        }
    }
}
