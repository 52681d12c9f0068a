use std::fmt;

/// A logical clock value.
///
/// The clock starts at [`Tick::FIRST`] and advances once per blank line of
/// the script. Every event between two blank lines shares the same tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u32);

impl Tick {
    /// The tick of the first line of a script.
    pub const FIRST: Tick = Tick(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw clock value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the following tick.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
