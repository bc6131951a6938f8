use std::{borrow::Borrow, fmt};

/// Opaque layer identifier, unique across every page held by a store.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Wrap an existing id string (ids loaded from documents, fixtures).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl PartialEq<str> for LayerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LayerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Deterministic id source.
///
/// Each call mixes `seed ^ counter` through SplitMix64, a bijection on `u64`,
/// and encodes the result in base 36. Two ids produced by the same generator
/// therefore never collide; collisions with ids loaded from elsewhere are
/// handled by the store.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    seed: u64,
    counter: u64,
}

impl IdGenerator {
    /// Create a generator for a given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Produce the next id.
    pub fn next_id(&mut self) -> LayerId {
        let raw = mix64(self.seed ^ self.counter);
        self.counter = self.counter.wrapping_add(1);
        LayerId(encode_base36(raw))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0x9E37_79B9_7F4A_7C15)
    }
}

fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn encode_base36(mut v: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if v == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::with_capacity(13);
    while v > 0 {
        out.push(DIGITS[(v % 36) as usize]);
        v /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ids.rs"]
mod tests;
