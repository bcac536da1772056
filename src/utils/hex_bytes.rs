// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Serde helpers for `0x`-prefixed hex byte strings
//!
//! Use with `#[serde(with = "crate::utils::hex_bytes")]` on `Vec<u8>` fields.
//! Deserialization accepts input with or without the `0x` prefix.

use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

pub fn serialize<S, T>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&to_prefixed_hex(bytes.as_ref()))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let hex_str = s.strip_prefix("0x").unwrap_or(&s);
    hex::decode(hex_str).map_err(|e| D::Error::custom(format!("invalid hex string: {}", e)))
}

/// Encode bytes as a `0x`-prefixed lowercase hex string
pub fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
