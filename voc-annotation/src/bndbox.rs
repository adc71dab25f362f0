//! Bounding box record normalization.

use crate::{
    common::*,
    coord::{parse_coord, CoordTag},
};

static COORD_REGEXES: Lazy<[Regex; 4]> = Lazy::new(|| {
    CoordTag::ALL.map(|tag| Regex::new(&format!("<{0}>([0-9]+)</{0}>", tag.name())).unwrap())
});

/// Selects the occurrence that is kept when a tag appears more than once in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    First,
    Last,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self::First
    }
}

/// The coordinates of one `<bndbox>` block.
///
/// Every stored value is already clamped to the frame. Missing tags are kept
/// as `None` and are left out when the record is written back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BndBoxRecord {
    values: [Option<u32>; 4],
}

impl BndBoxRecord {
    /// Extracts the coordinate tags from the text of a `<bndbox>` block.
    ///
    /// Only complete `<tag>digits</tag>` pairs are recognized. Anything else
    /// in the text is ignored.
    pub fn parse(text: &str, policy: DuplicatePolicy) -> Self {
        let values = Self::raw_values(text, policy).map(|digits| digits.map(parse_coord));
        Self { values }
    }

    /// Returns the unclamped digits of each tag in canonical order, picking
    /// the same occurrence as [`BndBoxRecord::parse`].
    pub fn raw_values(text: &str, policy: DuplicatePolicy) -> [Option<&str>; 4] {
        CoordTag::ALL.map(|tag| {
            let mut digits = COORD_REGEXES[tag.index()]
                .captures_iter(text)
                .filter_map(|caps| Some(caps.get(1)?.as_str()));

            match policy {
                DuplicatePolicy::First => digits.next(),
                DuplicatePolicy::Last => digits.last(),
            }
        })
    }

    pub fn get(&self, tag: CoordTag) -> Option<u32> {
        self.values[tag.index()]
    }

    /// Iterates over present tags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CoordTag, u32)> + '_ {
        CoordTag::ALL
            .into_iter()
            .filter_map(move |tag| Some((tag, self.get(tag)?)))
    }
}

impl Display for BndBoxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spans = self
            .iter()
            .map(|(tag, value)| format!("<{0}>{1}</{0}>", tag, value))
            .join("\n\t");
        write!(f, "<bndbox>\n\t{}\n</bndbox>", spans)
    }
}

/// Rewrites `<bndbox>` blocks into the canonical layout.
#[derive(Debug, Clone, Default)]
pub struct BoundingBoxNormalizer {
    pub(crate) policy: DuplicatePolicy,
}

impl BoundingBoxNormalizer {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    pub fn parse(&self, record_text: &str) -> BndBoxRecord {
        BndBoxRecord::parse(record_text, self.policy)
    }

    /// Clamps every coordinate and emits the tags in the order xmin, ymin,
    /// xmax, ymax, one per tab-indented line.
    pub fn normalize(&self, record_text: &str) -> String {
        self.parse(record_text).to_string()
    }
}

/// Normalizes a `<bndbox>` block, keeping the first occurrence of duplicated tags.
pub fn normalize_bndbox(record_text: &str) -> String {
    BoundingBoxNormalizer::default().normalize(record_text)
}
