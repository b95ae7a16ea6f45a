//! A simplistic parser for the 3-line ("0 NAME" / "1 ..." / "2 ...") TLE text format

use crate::LINE_DELIMETER;
use nom::{
    bytes::complete::tag,
    combinator::{map, recognize, rest},
    error::ErrorKind,
    sequence::preceded,
};
use orbit_types::{
    prelude::TleRecord,
    tle::{LINE1_PREFIX, LINE2_PREFIX, NAME_LINE_PREFIX},
};
use serde::Deserialize;
use tracing::{debug, warn};

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

/// How the scanner advances after a rejected 3-line window
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// Always advance by exactly 3 lines. A corrupt group misaligns every
    /// group that follows it.
    #[default]
    FixedWindow,
    /// Advance by a single line after a rejected window, so the scan picks
    /// up again at the next "0 " line.
    Resynchronize,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FormatErrorKind {
    NameLine,
    Line1,
    Line2,
}

impl std::fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (which, prefix) = match self {
            FormatErrorKind::NameLine => ("name line", NAME_LINE_PREFIX),
            FormatErrorKind::Line1 => ("line 1", LINE1_PREFIX),
            FormatErrorKind::Line2 => ("line 2", LINE2_PREFIX),
        };
        write!(f, "expected {which} starting with '{prefix}'")
    }
}

/// A rejected 3-line window
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("Invalid TLE format at lines {first_line}-{last_line}: {kind}")]
pub struct FormatError {
    /// Index of the window within the scan
    pub window: usize,
    /// Offsets into the non-blank lines of the input
    pub first_line: usize,
    pub last_line: usize,
    pub kind: FormatErrorKind,
}

/// Result of scanning a TLE text blob
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TleSet {
    /// Accepted records, in input order
    pub records: Vec<TleRecord>,
    /// Rejected windows, in input order
    pub rejected: Vec<FormatError>,
    /// Non-blank lines left over after the last full window
    pub trailing_lines: usize,
}

impl TleSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-serialize the accepted records in the 3-line text form
    pub fn to_text(&self) -> String {
        self.records
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(LINE_DELIMETER)
    }
}

pub fn parse_tle_set(text: &str) -> TleSet {
    parse_tle_set_with(text, ScanMode::FixedWindow)
}

pub fn parse_tle_set_with(text: &str, mode: ScanMode) -> TleSet {
    let lines: Vec<&str> = text
        .split(LINE_DELIMETER)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut set = TleSet {
        records: Vec::with_capacity(lines.len() / 3),
        ..Default::default()
    };

    let mut window = 0;
    let mut i = 0;
    while i + 2 < lines.len() {
        match tle(lines[i], lines[i + 1], lines[i + 2]) {
            Ok(record) => {
                set.records.push(record);
                i += 3;
            }
            Err(kind) => {
                let err = FormatError {
                    window,
                    first_line: i,
                    last_line: i + 2,
                    kind,
                };
                warn!(
                    name_line = lines[i],
                    line1 = lines[i + 1],
                    line2 = lines[i + 2],
                    "{err}"
                );
                set.rejected.push(err);
                i += match mode {
                    ScanMode::FixedWindow => 3,
                    ScanMode::Resynchronize => 1,
                };
            }
        }
        window += 1;
    }

    set.trailing_lines = lines.len() - i;
    if set.trailing_lines != 0 {
        debug!(
            trailing_lines = set.trailing_lines,
            "Dropping incomplete trailing TLE group"
        );
    }

    set
}

fn tle(
    name_line: &str,
    line1: &str,
    line2: &str,
) -> std::result::Result<TleRecord, FormatErrorKind> {
    let (_, name) = name(name_line).map_err(|_| FormatErrorKind::NameLine)?;
    let (_, line1) = data_line(LINE1_PREFIX, line1).map_err(|_| FormatErrorKind::Line1)?;
    let (_, line2) = data_line(LINE2_PREFIX, line2).map_err(|_| FormatErrorKind::Line2)?;
    Ok(TleRecord::new(name, line1, line2))
}

fn name(s: &str) -> Result<&str, &str> {
    map(preceded(tag(NAME_LINE_PREFIX), rest), str::trim)(s)
}

fn data_line<'a>(prefix: &'static str, s: &'a str) -> Result<&'a str, &'a str> {
    recognize(preceded(tag(prefix), rest))(s)
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}
