//! # Object Identifiers
//!
//! Store-assigned 12-byte document identifiers, rendered as 24-character
//! lowercase hex strings. The first four bytes are a big-endian UNIX-seconds
//! timestamp; the remaining eight are random.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::StoreError;

/// Length of the hex representation
pub const HEX_LEN: usize = 24;

/// A 12-byte document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        let seconds = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        rand::thread_rng().fill_bytes(&mut bytes[4..]);
        ObjectId(bytes)
    }

    /// Returns true iff `s` is a well-formed identifier: exactly 24 ASCII hex
    /// digits, either case.
    ///
    /// Pure and panic-free. Path segments used as lookup keys must pass this
    /// check before they are turned into a store filter.
    pub fn is_valid(s: &str) -> bool {
        s.len() == HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parse the 24-character hex form
    pub fn parse_str(s: &str) -> Result<Self, StoreError> {
        if !Self::is_valid(s) {
            return Err(StoreError::MalformedId(s.to_string()));
        }
        let mut bytes = [0u8; 12];
        for (i, pair) in s.as_bytes().chunks(2).enumerate() {
            bytes[i] = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(ObjectId(bytes))
    }

    /// The 24-character lowercase hex form
    pub fn to_hex(&self) -> String {
        use std::fmt::Write;
        let mut out = String::with_capacity(HEX_LEN);
        for b in self.0 {
            let _ = write!(out, "{:02x}", b);
        }
        out
    }

    /// The raw bytes
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Value of a single hex digit; guarded by `is_valid` at every call site
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse_str(&s).map_err(serde::de::Error::custom)
    }
}
