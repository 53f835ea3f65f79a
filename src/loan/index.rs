use std::fmt;

/// Position in the displayed loan list. Users type one-based numbers; the
/// model works with zero-based offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    pub const fn from_zero_based(zero_based: usize) -> Self {
        Self(zero_based)
    }

    /// Returns `None` for zero, which has no one-based meaning.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based.checked_sub(1).map(Self)
    }

    pub const fn zero_based(self) -> usize {
        self.0
    }

    pub const fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}
