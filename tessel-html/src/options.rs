use derive_builder::Builder;

/// Separator between adjacent table cells in a row
pub const DEFAULT_TABLE_CELL_SEPARATOR: &str = "\t";

/// Tags that are removed, with everything inside them, before flattening
pub const DEFAULT_NOISE_TAGS: &[&str] = &[
    "nav", "footer", "meta", "script", "style", "symbol", "aside",
];

/// Class tokens marking page chrome. Matched against whole tokens of the class list.
pub const DEFAULT_NOISE_CLASSES: &[&str] = &["sidebar", "footer"];

/// Element ids of well-known overlays, like cookie consent dialogs
pub const DEFAULT_NOISE_IDS: &[&str] = &["CybotCookiebotDialog"];

/// Options for the [`crate::DocumentFlattener`].
///
/// The defaults strip navigation, scripts, footers and cookie dialogs and separate table cells
/// with a tab.
///
/// # Example
///
/// ```
/// # use tessel_html::{DocumentFlattener, FlattenOptions};
/// let options = FlattenOptions::builder()
///     .table_cell_separator(" | ")
///     .build()
///     .unwrap();
///
/// let text = DocumentFlattener::new(options)
///     .flatten_str("<table><tr><td>a</td><td>b</td></tr></table>");
///
/// assert_eq!(text, "a | b");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct FlattenOptions {
    /// Inserted between cells of the same table row.
    #[builder(default = "DEFAULT_TABLE_CELL_SEPARATOR.to_string()")]
    pub(crate) table_cell_separator: String,

    /// Tag names removed before flattening.
    #[builder(default = "to_strings(DEFAULT_NOISE_TAGS)")]
    pub(crate) noise_tags: Vec<String>,

    /// Class tokens; any element carrying one is removed before flattening.
    #[builder(default = "to_strings(DEFAULT_NOISE_CLASSES)")]
    pub(crate) noise_classes: Vec<String>,

    /// Element ids removed before flattening.
    #[builder(default = "to_strings(DEFAULT_NOISE_IDS)")]
    pub(crate) noise_ids: Vec<String>,
}

impl FlattenOptions {
    pub fn builder() -> FlattenOptionsBuilder {
        FlattenOptionsBuilder::default()
    }

    pub fn table_cell_separator(&self) -> &str {
        &self.table_cell_separator
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            table_cell_separator: DEFAULT_TABLE_CELL_SEPARATOR.to_string(),
            noise_tags: to_strings(DEFAULT_NOISE_TAGS),
            noise_classes: to_strings(DEFAULT_NOISE_CLASSES),
            noise_ids: to_strings(DEFAULT_NOISE_IDS),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = FlattenOptions::builder().build().unwrap();
        let default = FlattenOptions::default();

        assert_eq!(built.table_cell_separator, default.table_cell_separator);
        assert_eq!(built.noise_tags, default.noise_tags);
        assert_eq!(built.noise_classes, default.noise_classes);
        assert_eq!(built.noise_ids, default.noise_ids);
    }

    #[test]
    fn test_override_noise_tags() {
        let options = FlattenOptions::builder()
            .noise_tags(vec!["header".to_string()])
            .build()
            .unwrap();

        assert_eq!(options.noise_tags, vec!["header".to_string()]);
        assert_eq!(options.noise_classes, vec!["sidebar", "footer"]);
    }
}
