// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Sealing values for a Trust Domain and opening them with its secret key

use k256::SecretKey;
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};
use td_patch_sealer::crypto::{
    decrypt, encrypt, encrypt_with_rng, CiphertextBlob, CryptoError, TdPublicKey, BLOB_OVERHEAD,
    EPHEMERAL_KEY_LEN, NONCE_LEN, TAG_LEN,
};

fn td_keypair() -> (SecretKey, TdPublicKey) {
    let secret = SecretKey::random(&mut OsRng);
    let public = TdPublicKey::from_public_key(secret.public_key());
    (secret, public)
}

/// Returns all-0xff candidates (above the group order) for the first draws
struct OutOfRangeFirst {
    remaining: usize,
}

impl RngCore for OutOfRangeFirst {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if self.remaining > 0 {
            self.remaining -= 1;
            dest.fill(0xff);
        } else {
            OsRng.fill_bytes(dest);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for OutOfRangeFirst {}

/// Entropy source that is always broken
struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("sealing must use try_fill_bytes")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("sealing must use try_fill_bytes")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("sealing must use try_fill_bytes")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

impl CryptoRng for FailingRng {}

#[test]
fn test_round_trip_various_plaintexts() {
    let (secret, public) = td_keypair();
    let large = vec![0x5au8; 64 * 1024];
    let plaintexts: Vec<&[u8]> = vec![
        &b""[..],
        &b"x"[..],
        &b"Bearer sk-live-1234567890"[..],
        "pässwörd ✓ 鍵".as_bytes(),
        &large[..],
    ];

    for plaintext in plaintexts {
        let blob = encrypt(plaintext, &public).unwrap();
        assert_eq!(blob.as_bytes().len(), BLOB_OVERHEAD + plaintext.len());
        assert_eq!(decrypt(&blob, &secret).unwrap(), plaintext);
    }
}

#[test]
fn test_empty_plaintext_is_exactly_overhead() {
    let (secret, public) = td_keypair();
    let blob = encrypt(b"", &public).unwrap();

    assert_eq!(blob.as_bytes().len(), 97);
    assert_eq!(blob.plaintext_len(), 0);
    assert!(decrypt(&blob, &secret).unwrap().is_empty());
}

#[test]
fn test_repeated_encryption_is_not_deterministic() {
    let (secret, public) = td_keypair();
    let first = encrypt(b"same value", &public).unwrap();
    let second = encrypt(b"same value", &public).unwrap();

    assert_ne!(first, second);
    assert_ne!(
        first.parts().ephemeral_public_key,
        second.parts().ephemeral_public_key
    );
    assert_ne!(first.parts().nonce, second.parts().nonce);
    assert_ne!(first.parts().ciphertext, second.parts().ciphertext);

    assert_eq!(decrypt(&first, &secret).unwrap(), b"same value");
    assert_eq!(decrypt(&second, &secret).unwrap(), b"same value");
}

#[test]
fn test_output_depends_only_on_rng_stream() {
    let (_, public) = td_keypair();

    let a = encrypt_with_rng(b"value", &public, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = encrypt_with_rng(b"value", &public, &mut StdRng::seed_from_u64(7)).unwrap();
    let c = encrypt_with_rng(b"value", &public, &mut StdRng::seed_from_u64(8)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_blob_layout() {
    let (_, public) = td_keypair();
    let blob = encrypt(b"layout", &public).unwrap();
    let bytes = blob.as_bytes();
    let parts = blob.parts();

    assert_eq!(bytes[0], 0x04);
    assert_eq!(parts.ephemeral_public_key, &bytes[..EPHEMERAL_KEY_LEN]);
    assert_eq!(
        parts.nonce,
        &bytes[EPHEMERAL_KEY_LEN..EPHEMERAL_KEY_LEN + NONCE_LEN]
    );
    assert_eq!(parts.tag.len(), TAG_LEN);
    assert_eq!(parts.ciphertext.len(), b"layout".len());

    // Ephemeral key is a valid point
    assert!(TdPublicKey::from_uncompressed(parts.ephemeral_public_key).is_ok());
}

#[test]
fn test_wrong_secret_fails_authentication() {
    let (_, public) = td_keypair();
    let (other_secret, _) = td_keypair();
    let blob = encrypt(b"only for the owner", &public).unwrap();

    let err = decrypt(&blob, &other_secret).unwrap_err();
    assert!(matches!(err, CryptoError::DecryptionFailed { .. }));
}

#[test]
fn test_tampered_ciphertext_fails_authentication() {
    let (secret, public) = td_keypair();
    let mut bytes = encrypt(b"integrity", &public).unwrap().into_bytes();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;

    let blob = CiphertextBlob::from_bytes(bytes).unwrap();
    assert!(matches!(
        decrypt(&blob, &secret),
        Err(CryptoError::DecryptionFailed { .. })
    ));
}

#[test]
fn test_corrupted_ephemeral_key_is_invalid_payload() {
    let (secret, public) = td_keypair();
    let mut bytes = encrypt(b"payload", &public).unwrap().into_bytes();
    bytes[0] = 0x09;

    let blob = CiphertextBlob::from_bytes(bytes).unwrap();
    assert!(matches!(
        decrypt(&blob, &secret),
        Err(CryptoError::InvalidPayload { .. })
    ));
}

#[test]
fn test_out_of_range_scalars_are_resampled() {
    let (secret, public) = td_keypair();
    let mut rng = OutOfRangeFirst { remaining: 3 };

    let blob = encrypt_with_rng(b"retry", &public, &mut rng).unwrap();
    assert_eq!(rng.remaining, 0);
    assert_eq!(decrypt(&blob, &secret).unwrap(), b"retry");
}

#[test]
fn test_persistently_bad_rng_is_rng_failure() {
    let (_, public) = td_keypair();
    let mut rng = OutOfRangeFirst {
        remaining: usize::MAX,
    };

    let err = encrypt_with_rng(b"never", &public, &mut rng).unwrap_err();
    assert!(matches!(err, CryptoError::RngFailure { .. }));
}

#[test]
fn test_entropy_failure_is_rng_failure() {
    let (_, public) = td_keypair();
    let err = encrypt_with_rng(b"never", &public, &mut FailingRng).unwrap_err();

    match err {
        CryptoError::RngFailure { reason } => {
            assert!(reason.contains("entropy source unavailable"))
        }
        other => panic!("Expected RngFailure, got {:?}", other),
    }
}

#[test]
fn test_blob_hex_round_trip_through_cli_format() {
    let (secret, public) = td_keypair();
    let blob = encrypt(b"hex", &public).unwrap();
    let hex_str = blob.to_hex();

    assert!(!hex_str.starts_with("0x"));
    assert_eq!(hex_str.len(), (BLOB_OVERHEAD + 3) * 2);

    let parsed = CiphertextBlob::from_hex(&hex_str).unwrap();
    assert_eq!(decrypt(&parsed, &secret).unwrap(), b"hex");
}

#[test]
fn test_short_blob_is_rejected() {
    let err = CiphertextBlob::from_bytes(vec![0u8; BLOB_OVERHEAD - 1]).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidPayload { .. }));
}
