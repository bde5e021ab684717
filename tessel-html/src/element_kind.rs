/// The elements that shape the flattened text.
///
/// Every tag the flattener does not know about parses to [`ElementKind::Other`] and only
/// contributes its text.
#[derive(Debug, PartialEq, Eq, Clone, Copy, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ElementKind {
    #[strum(serialize = "table")]
    Table,
    #[strum(serialize = "tr")]
    TableRow,
    #[strum(serialize = "td", serialize = "th")]
    TableCell,
    #[strum(serialize = "p", serialize = "div")]
    Paragraph,
    #[strum(serialize = "h1", serialize = "h2", serialize = "h3", serialize = "h4")]
    Heading,
    #[strum(serialize = "br")]
    LineBreak,
    #[strum(serialize = "li")]
    ListItem,
    #[strum(serialize = "pre")]
    Preformatted,
    #[strum(disabled)]
    Other,
}

impl ElementKind {
    pub fn from_tag(name: &str) -> Self {
        name.parse().unwrap_or(ElementKind::Other)
    }
}
