use derive_more::Display;

pub const NAME_LINE_PREFIX: &str = "0 ";
pub const LINE1_PREFIX: &str = "1 ";
pub const LINE2_PREFIX: &str = "2 ";

/// A named Two-Line Element set
/// https://en.wikipedia.org/wiki/Two-line_element_set
///
/// Identity is positional: two records may share a name.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Display)]
#[display(fmt = "0 {}\n{}\n{}", "name", "line1", "line2")]
pub struct TleRecord {
    /// Object name with the "0 " prefix stripped
    pub name: String,
    /// Data line 1, starts with "1 "
    pub line1: String,
    /// Data line 2, starts with "2 "
    pub line2: String,
}

impl TleRecord {
    pub fn new<N, L1, L2>(name: N, line1: L1, line2: L2) -> Self
    where
        N: Into<String>,
        L1: Into<String>,
        L2: Into<String>,
    {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// The 3-line text form, newline terminated
    pub fn to_three_line(&self) -> String {
        format!("{self}\n")
    }
}
