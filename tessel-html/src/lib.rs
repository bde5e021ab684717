//! Flatten html into plain text for language models
//!
//! The [`DocumentFlattener`] strips page chrome and renders a parsed document into readable text
//! that keeps the structure a reader would see: paragraphs and headings on their own line, list
//! items prefixed with a hyphen, table cells separated by tabs and preformatted blocks verbatim.
//!
//! Parsing is done with `scraper` (html5ever).
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod element_kind;
mod flatten;
mod noise;
pub mod normalize;
mod options;

pub use element_kind::ElementKind;
pub use flatten::DocumentFlattener;
pub use options::{
    DEFAULT_NOISE_CLASSES, DEFAULT_NOISE_IDS, DEFAULT_NOISE_TAGS, DEFAULT_TABLE_CELL_SEPARATOR,
    FlattenOptions, FlattenOptionsBuilder,
};

/// Re-exported so callers can parse once and flatten
pub use scraper::Html;
