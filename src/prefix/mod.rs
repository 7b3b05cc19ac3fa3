//! Prefix values and the prefix-space enumerator
//!
//! A run queries every 1, 2 and 3 character combination of the alphabet.
//! The enumeration order is stable so that a checkpoint written by one run
//! reads back in the same order in the next.

use std::fmt;

/// Longest prefix the enumerator produces
pub const MAX_PREFIX_LEN: usize = 3;

/// A search term of 1 to 3 alphabet characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(String);

impl Prefix {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Prefix {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generates the full prefix space over `alphabet`
///
/// Single characters come first in alphabet order, then every two-character
/// combination, then every three-character combination. Within each length
/// the leftmost character varies slowest, so for `"ab"` the two-character
/// block is `aa, ab, ba, bb`.
///
/// # Example
///
/// ```
/// use suggest_harvest::prefix::generate;
///
/// let prefixes = generate("ab");
/// assert_eq!(prefixes.len(), 2 + 4 + 8);
/// assert_eq!(prefixes[2].as_str(), "aa");
/// ```
pub fn generate(alphabet: &str) -> Vec<Prefix> {
    let chars: Vec<char> = alphabet.chars().collect();
    let mut prefixes = Vec::with_capacity(expected_count(chars.len()));

    prefixes.extend(chars.iter().map(|c| Prefix(c.to_string())));

    for outer in &chars {
        for inner in &chars {
            prefixes.push(Prefix([*outer, *inner].iter().collect()));
        }
    }

    for outer in &chars {
        for middle in &chars {
            for inner in &chars {
                prefixes.push(Prefix([*outer, *middle, *inner].iter().collect()));
            }
        }
    }

    prefixes
}

/// Number of prefixes [`generate`] yields for an alphabet of `size` characters
pub fn expected_count(size: usize) -> usize {
    size + size * size + size * size * size
}
