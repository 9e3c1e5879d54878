use std::fmt;
use std::str::FromStr;

/// A single-cell reference in A1 notation, e.g. `B4`.
///
/// Validated at parse time so a bad reference is rejected before any
/// network traffic happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef(String);

impl CellRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let letters = s.chars().take_while(|c| c.is_ascii_alphabetic()).count();
        let digits = &s[letters..];

        let column_ok = (1..=3).contains(&letters);
        let row_ok = !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');

        if !column_ok || !row_ok {
            return Err(format!("invalid cell reference: {s} (expected e.g. B4)"));
        }

        Ok(CellRef(s.to_ascii_uppercase()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
