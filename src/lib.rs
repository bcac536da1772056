// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod action;
pub mod cli;
pub mod crypto;
pub mod ledger;
pub mod patch;
pub mod utils;

// Re-export main types
pub use action::{ActionBuilder, ActionError, HttpMethod, OracleAction, RequestFile};
pub use crypto::{decrypt, encrypt, CiphertextBlob, CryptoError, TdAddress, TdPublicKey};
pub use ledger::{LedgerSubmitter, Provisioner, RecordId, Submission, SubmissionError};
pub use patch::{PatchEncryptor, PatchError, PatchSlot, PatchSpec, SealedPatch};
