pub use crate::elements::{extract_elements, Column, FieldParseError};
pub use crate::parser::{
    parse_tle_set, parse_tle_set_with, FormatError, FormatErrorKind, ScanMode, TleSet,
};

pub mod elements;
pub mod parser;

pub const LINE_DELIMETER: &str = "\n";
