// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Trust Domain Sealing Primitives
//!
//! Confidential delivery of request fields to an off-chain Trust Domain (TD):
//!
//! - **ECIES**: secp256k1 ECDH + HKDF-SHA256 + AES-256-GCM, one blob per value
//! - **Blob**: fixed `ephemeral(65) | nonce(16) | tag(16) | ciphertext` layout
//! - **Public key**: parsing and validation of the TD's uncompressed key
//! - **Address**: Keccak-256 derived 20-byte TD identity
//!
//! ## Security Considerations
//!
//! - Every blob uses a fresh ephemeral key and nonce
//! - Invalid keys are rejected before any randomness is drawn
//! - No associated data is bound: each value is authenticated on its own,
//!   the structure around it is not
//!
//! ## Protocol Flow
//!
//! 1. Operator loads the TD public key once per run
//! 2. Each sensitive value is sealed independently with [`encrypt`]
//! 3. The TD address from [`TdPublicKey::address`] is attached to the patch
//! 4. The TD opens each blob with its secret key ([`decrypt`])

pub mod address;
pub mod blob;
pub mod ecies;
pub mod error;
pub mod public_key;

pub use address::{derive_td_address, keccak256, TdAddress, TD_ADDRESS_LEN};
pub use blob::{BlobParts, CiphertextBlob, BLOB_OVERHEAD, EPHEMERAL_KEY_LEN, NONCE_LEN, TAG_LEN};
pub use ecies::{decrypt, encrypt, encrypt_with_rng};
pub use error::CryptoError;
pub use public_key::{TdPublicKey, TD_PUBLIC_KEY_ENV, UNCOMPRESSED_KEY_LEN};
