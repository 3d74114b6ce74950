use std::fmt;
use std::str::FromStr;

use crate::bit_set::BitSet;

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_binary_string())
    }
}

impl FromStr for BitSet {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> anyhow::Result<Self> {
        Self::from_binary_string(text)
    }
}

impl TryFrom<&str> for BitSet {
    type Error = anyhow::Error;

    fn try_from(text: &str) -> anyhow::Result<Self> {
        Self::from_binary_string(text)
    }
}

// Backs `#[serde(try_from = "String")]`.
impl TryFrom<String> for BitSet {
    type Error = anyhow::Error;

    fn try_from(text: String) -> anyhow::Result<Self> {
        Self::from_binary_string(&text)
    }
}

impl From<BitSet> for String {
    fn from(bit_set: BitSet) -> Self {
        bit_set.to_binary_string()
    }
}
