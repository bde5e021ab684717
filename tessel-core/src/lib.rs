#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod errors;
pub mod loader_traits;
mod metadata;
mod text_unit;
mod type_aliases;

pub use crate::errors::LoaderError;
/// All traits are available from the root
pub use crate::loader_traits::*;
pub use crate::metadata::Metadata;
pub use crate::text_unit::{TextUnit, TextUnitBuilder};
pub use crate::type_aliases::*;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub mod util;
