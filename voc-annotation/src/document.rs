//! Whole annotation document transforms.

use crate::{
    bndbox::{BndBoxRecord, BoundingBoxNormalizer},
    common::*,
    config::NormalizeConfig,
    strip::TagStripper,
};

static BNDBOX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<bndbox>.*?</bndbox>").unwrap());
static SOURCE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<source>.*?</source>").unwrap());
static DATABASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<database>.*?</database>|<database\s*/>").unwrap());

/// Removes the lines that carry an XML declaration.
pub fn strip_xml_declaration(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.trim_start().starts_with("<?xml"))
        .collect()
}

/// Sets the text of `<database>` inside the first `<source>` block.
pub fn rewrite_source_database(text: &str, database: &str) -> String {
    let source = match SOURCE_REGEX.find(text) {
        Some(source) => source,
        None => return text.to_owned(),
    };
    let element = format!("<database>{}</database>", escape_text(database));
    let rewritten = DATABASE_REGEX.replacen(source.as_str(), 1, regex::NoExpand(&element));

    let mut output = String::with_capacity(text.len());
    output.push_str(&text[..source.start()]);
    output.push_str(&rewritten);
    output.push_str(&text[source.end()..]);
    output
}

/// Finds the `<bndbox>` blocks of a document.
pub fn find_bndboxes(text: &str) -> impl Iterator<Item = &str> {
    BNDBOX_REGEX.find_iter(text).map(|found| found.as_str())
}

fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(|ch: char| matches!(ch, '&' | '<' | '>')) {
        return text.into();
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            ch => escaped.push(ch),
        }
    }
    escaped.into()
}

/// The outcome of normalizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    pub text: String,
    /// Number of rewritten `<bndbox>` blocks.
    pub bndboxes: usize,
    /// Whether `text` differs from the input.
    pub modified: bool,
}

/// The coordinates of one `<bndbox>` block as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BndBoxSummary<'a> {
    /// Unclamped digits in the order xmin, ymin, xmax, ymax.
    pub values: [Option<&'a str>; 4],
    /// Whether normalization leaves the block unchanged.
    pub canonical: bool,
}

/// Applies the configured transforms to whole annotation documents.
#[derive(Debug, Clone)]
pub struct AnnotationNormalizer {
    strip_declaration: bool,
    database: Option<String>,
    strippers: Vec<TagStripper>,
    bndbox: BoundingBoxNormalizer,
}

impl AnnotationNormalizer {
    pub fn new(config: &NormalizeConfig) -> Result<Self> {
        let NormalizeConfig {
            strip_declaration,
            ref database,
            ref strip_tags,
            duplicate_policy,
        } = *config;

        let strippers: Vec<_> = strip_tags
            .iter()
            .map(|tag| TagStripper::new(tag))
            .try_collect()?;

        Ok(Self {
            strip_declaration,
            database: database.clone(),
            strippers,
            bndbox: BoundingBoxNormalizer::new(duplicate_policy),
        })
    }

    /// Lists every `<bndbox>` block of a document without modifying it.
    pub fn inspect<'a>(&self, text: &'a str) -> Vec<BndBoxSummary<'a>> {
        let policy = self.bndbox.policy;
        find_bndboxes(text)
            .map(|block| BndBoxSummary {
                values: BndBoxRecord::raw_values(block, policy),
                canonical: self.bndbox.normalize(block) == block,
            })
            .collect()
    }

    /// Runs declaration stripping, database rewrite, tag stripping and
    /// bounding box normalization, in that order.
    pub fn normalize_document(&self, text: &str) -> NormalizedDocument {
        let mut output = if self.strip_declaration {
            strip_xml_declaration(text)
        } else {
            text.to_owned()
        };

        if let Some(database) = &self.database {
            output = rewrite_source_database(&output, database);
        }

        for stripper in &self.strippers {
            if let Cow::Owned(stripped) = stripper.strip(&output) {
                output = stripped;
            }
        }

        let mut bndboxes = 0;
        let output = BNDBOX_REGEX
            .replace_all(&output, |caps: &Captures| {
                bndboxes += 1;
                self.bndbox.normalize(&caps[0])
            })
            .into_owned();

        let modified = output != text;
        NormalizedDocument {
            text: output,
            bndboxes,
            modified,
        }
    }
}
