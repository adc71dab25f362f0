//! Tag removal.

use crate::common::*;

/// Removes every `<tag>...</tag>` span of a fixed tag name.
#[derive(Debug, Clone)]
pub struct TagStripper {
    regex: Regex,
}

impl TagStripper {
    pub fn new(tag_name: &str) -> Result<Self> {
        ensure!(!tag_name.is_empty(), "tag name must not be empty");

        let tag = regex::escape(tag_name);
        let regex = Regex::new(&format!(r"(?s)\s*<{0}>.*?</{0}>\s*", tag))
            .with_context(|| format!("unable to build pattern for tag '{}'", tag_name))?;

        Ok(Self { regex })
    }

    /// Removes the spans along with their surrounding whitespace. Each removed
    /// region collapses into a single newline.
    pub fn strip<'a>(&self, content: &'a str) -> Cow<'a, str> {
        self.regex.replace_all(content, "\n")
    }
}

/// Removes every `<tag_name>...</tag_name>` span from `content`. An empty tag
/// name matches nothing.
pub fn strip_tag(content: &str, tag_name: &str) -> String {
    match TagStripper::new(tag_name) {
        Ok(stripper) => stripper.strip(content).into_owned(),
        Err(_) => content.to_owned(),
    }
}
