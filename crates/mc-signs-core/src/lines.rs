//! The four lines of a sign.

use std::ops::Index;

/// Exactly four plain-text sign lines. Missing lines are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignLines([String; 4]);

impl SignLines {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any number of lines, padding with empty lines or
    /// dropping extras past the fourth.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::default();
        for (slot, line) in out.0.iter_mut().zip(lines) {
            *slot = line.into();
        }
        out
    }

    pub fn from_fn(f: impl FnMut(usize) -> String) -> Self {
        Self(std::array::from_fn(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> [String; 4] {
        self.0
    }
}

impl Index<usize> for SignLines {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_input() {
        let lines = SignLines::from_lines(["a", "b"]);
        assert_eq!(lines.iter().collect::<Vec<_>>(), ["a", "b", "", ""]);
    }

    #[test]
    fn truncates_long_input() {
        let lines = SignLines::from_lines(["1", "2", "3", "4", "5"]);
        assert_eq!(&lines[3], "4");
        assert_eq!(lines.into_inner().len(), 4);
    }

    #[test]
    fn empty_is_four_empty_strings() {
        assert!(SignLines::empty().iter().all(str::is_empty));
    }
}
