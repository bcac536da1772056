// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Sealing for Trust Domains
//!
//! Single-value hybrid encryption toward a TD public key:
//!
//! 1. Sample an ephemeral scalar r in [1, n-1] from a CSPRNG
//! 2. E = r·G, S = r·P (ECDH with the TD key P)
//! 3. K = HKDF-SHA256(IKM = SEC1(E) || SEC1(S), no salt, empty info, 32 bytes),
//!    where SEC1 is the uncompressed `0x04 || x || y` encoding
//! 4. AES-256-GCM with a fresh 16-byte nonce and no AAD
//! 5. Output `E || nonce || tag || ciphertext` (see [`super::blob`])
//!
//! The key derivation input must stay byte-for-byte identical: the TD
//! decryptor re-derives K from the same concatenation.
//!
//! ## Security Considerations
//!
//! - r is never reused, logged or derived from the plaintext
//! - Every call derives a fresh key, so nonces never repeat under one key
//! - RNG failures are fatal; there is no fallback source
//! - Scalar candidates, IKM and K are zeroized on drop

use aes_gcm::{
    aead::{consts::U16, AeadInPlace, KeyInit},
    aes::Aes256,
    AesGcm, Nonce, Tag,
};
use hkdf::Hkdf;
use k256::{elliptic_curve::sec1::ToEncodedPoint, EncodedPoint, PublicKey, Scalar, SecretKey};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::Sha256;
use tracing::trace;
use zeroize::Zeroizing;

use super::blob::{CiphertextBlob, EPHEMERAL_KEY_LEN, NONCE_LEN};
use super::error::CryptoError;
use super::public_key::TdPublicKey;

/// AES-256-GCM with a 128-bit nonce
type Aes256Gcm16 = AesGcm<Aes256, U16>;

const SYMMETRIC_KEY_LEN: usize = 32;

/// Candidates outside [1, n-1] occur with probability ~2^-128; a source that
/// keeps producing them is broken.
const MAX_SCALAR_ATTEMPTS: usize = 64;

/// Seal `plaintext` for the Trust Domain owning `td_key` using the OS RNG
pub fn encrypt(plaintext: &[u8], td_key: &TdPublicKey) -> Result<CiphertextBlob, CryptoError> {
    encrypt_with_rng(plaintext, td_key, &mut OsRng)
}

/// Seal `plaintext` drawing all randomness from `rng`
pub fn encrypt_with_rng<R>(
    plaintext: &[u8],
    td_key: &TdPublicKey,
    rng: &mut R,
) -> Result<CiphertextBlob, CryptoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let ephemeral = sample_ephemeral_secret(rng)?;
    let ephemeral_point = ephemeral.public_key().to_encoded_point(false);

    let shared_point = shared_point(td_key.as_point(), &ephemeral, "ecdh")?;
    let key = derive_symmetric_key(&ephemeral_point, &shared_point)?;

    let mut nonce = [0u8; NONCE_LEN];
    rng.try_fill_bytes(&mut nonce)?;

    let cipher = Aes256Gcm16::new_from_slice(&key[..]).map_err(|e| {
        CryptoError::EncryptionFailed {
            reason: format!("failed to create AES-GCM cipher: {}", e),
        }
    })?;

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&nonce), b"", &mut ciphertext)
        .map_err(|e| CryptoError::EncryptionFailed {
            reason: format!("AES-GCM encryption failed: {}", e),
        })?;

    trace!(plaintext_len = plaintext.len(), "sealed value for trust domain");

    Ok(CiphertextBlob::assemble(
        ephemeral_point.as_bytes(),
        &nonce,
        tag.as_slice(),
        &ciphertext,
    ))
}

/// Open a blob with the Trust Domain's secret key
///
/// Inverse of [`encrypt`]. Used on the TD side and to verify that a
/// configured public key matches a known secret.
pub fn decrypt(blob: &CiphertextBlob, td_secret: &SecretKey) -> Result<Vec<u8>, CryptoError> {
    let parts = blob.parts();

    let ephemeral = PublicKey::from_sec1_bytes(parts.ephemeral_public_key).map_err(|_| {
        CryptoError::InvalidPayload {
            field: "ephemeral_public_key".to_string(),
            reason: "not a valid secp256k1 point".to_string(),
        }
    })?;
    let ephemeral_point = ephemeral.to_encoded_point(false);

    let shared_point = shared_point(&ephemeral, td_secret, "ecdh_open")?;
    let key = derive_symmetric_key(&ephemeral_point, &shared_point)?;

    let cipher = Aes256Gcm16::new_from_slice(&key[..]).map_err(|e| {
        CryptoError::DecryptionFailed {
            reason: format!("failed to create AES-GCM cipher: {}", e),
        }
    })?;

    let mut plaintext = parts.ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(parts.nonce),
            b"",
            &mut plaintext,
            Tag::from_slice(parts.tag),
        )
        .map_err(|_| CryptoError::DecryptionFailed {
            reason: "authentication tag mismatch (wrong key or tampered blob)".to_string(),
        })?;

    Ok(plaintext)
}

/// Rejection-sample a scalar uniformly from [1, n-1]
fn sample_ephemeral_secret<R>(rng: &mut R) -> Result<SecretKey, CryptoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = Zeroizing::new([0u8; 32]);
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        rng.try_fill_bytes(&mut candidate[..])?;
        if let Ok(secret) = SecretKey::from_slice(&candidate[..]) {
            return Ok(secret);
        }
    }

    Err(CryptoError::RngFailure {
        reason: format!(
            "no valid secp256k1 scalar after {} draws",
            MAX_SCALAR_ATTEMPTS
        ),
    })
}

/// Full shared point `secret · public`, uncompressed
fn shared_point(
    public: &PublicKey,
    secret: &SecretKey,
    operation: &str,
) -> Result<EncodedPoint, CryptoError> {
    let scalar: Scalar = *secret.to_nonzero_scalar();
    let shared = (public.to_projective() * scalar).to_affine();

    let shared = PublicKey::from_affine(shared).map_err(|_| CryptoError::KeyDerivationFailed {
        operation: operation.to_string(),
        reason: "shared point is the identity".to_string(),
    })?;

    Ok(shared.to_encoded_point(false))
}

fn derive_symmetric_key(
    ephemeral_point: &EncodedPoint,
    shared_point: &EncodedPoint,
) -> Result<Zeroizing<[u8; SYMMETRIC_KEY_LEN]>, CryptoError> {
    let mut ikm = Zeroizing::new(Vec::with_capacity(EPHEMERAL_KEY_LEN * 2));
    ikm.extend_from_slice(ephemeral_point.as_bytes());
    ikm.extend_from_slice(shared_point.as_bytes());

    let hkdf = Hkdf::<Sha256>::new(None, &ikm);
    let mut key = Zeroizing::new([0u8; SYMMETRIC_KEY_LEN]);
    hkdf.expand(&[], &mut key[..])
        .map_err(|e| CryptoError::KeyDerivationFailed {
            operation: "hkdf".to_string(),
            reason: e.to_string(),
        })?;

    Ok(key)
}
