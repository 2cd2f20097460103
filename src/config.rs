//! Parser configuration.

/// Knobs for a single parse.
///
/// The defaults follow the grammar exactly as written: only explicit `;`
/// tokens terminate productions. [`Config::go`] turns on Go-style
/// newline termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Turn qualifying newlines (and end of input) into `;` tokens.
    pub insert_semicolons: bool,
    /// Maximum nesting of array, struct and parenthesized types.
    pub max_depth: u32,
}

impl Config {
    /// Every level may be a struct, whose descent is the deepest stack path
    /// of the parser; the limit has to hold on a default 2 MiB thread.
    pub const DEFAULT_MAX_DEPTH: u32 = 128;

    pub const fn new() -> Self {
        Self {
            insert_semicolons: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Newlines terminate declarations where Go would insert a semicolon.
    pub const fn go() -> Self {
        Self::new().insert_semicolons(true)
    }

    pub const fn insert_semicolons(mut self, on: bool) -> Self {
        self.insert_semicolons = on;
        self
    }

    pub const fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
