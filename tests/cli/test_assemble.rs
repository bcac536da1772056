// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Offline CLI commands over request and patch files

use clap::Parser;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::rngs::OsRng;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use td_patch_sealer::cli::{
    assemble, execute, BuildActionArgs, BuildFeedArgs, Cli, SealPatchArgs, TdKeyArgs,
};
use td_patch_sealer::crypto::{decrypt, CiphertextBlob, TdPublicKey};
use tempfile::TempDir;

fn keypair() -> (SecretKey, String) {
    let secret = SecretKey::random(&mut OsRng);
    let encoded = secret.public_key().to_encoded_point(false);
    (secret, format!("0x{}", hex::encode(encoded.as_bytes())))
}

fn key_args(td_public_key: &str) -> TdKeyArgs {
    TdKeyArgs {
        td_public_key: td_public_key.to_string(),
        pretty: false,
    }
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

fn open_hex(hex_str: &str, secret: &SecretKey) -> String {
    let blob = CiphertextBlob::from_hex(hex_str).unwrap();
    String::from_utf8(decrypt(&blob, secret).unwrap()).unwrap()
}

fn request_json() -> Value {
    json!({
        "method": "POST",
        "host": "api.example.com",
        "path": "/v2/quote",
        "headers": [{"key": "Content-Type", "value": "application/json"}],
        "parameters": [],
        "body": {"pair": "ETH/USD"}
    })
}

#[test]
fn test_seal_patch_command() {
    let dir = TempDir::new().unwrap();
    let (secret, public_hex) = keypair();
    let patch_file = write_json(
        &dir,
        "patch.json",
        &json!({
            "body": "",
            "pathSuffix": "/private",
            "headers": [{"key": "Authorization", "value": "Bearer abc"}],
            "parameters": [{"key": "token", "value": "t1"}]
        }),
    );

    let output = assemble::seal_patch(&SealPatchArgs {
        patch_file,
        key: key_args(&public_hex),
    })
    .unwrap();
    let sealed: Value = serde_json::from_str(&output).unwrap();

    let expected_address = TdPublicKey::from_hex(&public_hex).unwrap().address();
    assert_eq!(sealed["tdAddress"], expected_address.to_string());
    assert_eq!(sealed["headers"][0]["key"], "Authorization");
    assert_eq!(
        open_hex(sealed["headers"][0]["ciphertext"].as_str().unwrap(), &secret),
        "Bearer abc"
    );
    assert_eq!(
        open_hex(sealed["pathSuffix"].as_str().unwrap(), &secret),
        "/private"
    );
}

#[test]
fn test_build_action_without_patch() {
    let dir = TempDir::new().unwrap();
    let (_, public_hex) = keypair();
    let request_file = write_json(
        &dir,
        "request.json",
        &json!({
            "request": request_json(),
            "jqFilter": ".quote.price",
            "responseSchema": "uint256"
        }),
    );

    let output = assemble::build_action(&BuildActionArgs {
        request_file,
        key: key_args(&public_hex),
    })
    .unwrap();
    let action: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(action["request"]["method"], 1);
    assert_eq!(
        action["request"]["body"],
        format!("0x{}", hex::encode(br#"{"pair":"ETH/USD"}"#))
    );
    assert_eq!(action["patch"]["body"], "0x");
    assert_eq!(
        action["patch"]["tdAddress"],
        "0x0000000000000000000000000000000000000000"
    );
    assert_eq!(action["jqFilter"], ".quote.price");
}

#[test]
fn test_build_feed_with_and_without_patch() {
    let dir = TempDir::new().unwrap();
    let (secret, public_hex) = keypair();

    let plain = write_json(
        &dir,
        "feed.json",
        &json!({"request": request_json(), "schema": "uint256", "filter": ".price"}),
    );
    let output = assemble::build_feed(&BuildFeedArgs {
        feed_file: plain,
        key: key_args(&public_hex),
    })
    .unwrap();
    let feed: Value = serde_json::from_str(&output).unwrap();
    assert!(feed["patch"].is_null());
    assert_eq!(feed["schema"], "uint256");

    let patched = write_json(
        &dir,
        "feed_patched.json",
        &json!({
            "request": request_json(),
            "patch": {"body": "{\"key\":\"v\"}"},
            "schema": "uint256",
            "filter": ".price"
        }),
    );
    let output = assemble::build_feed(&BuildFeedArgs {
        feed_file: patched,
        key: key_args(&public_hex),
    })
    .unwrap();
    let feed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        open_hex(feed["patch"]["body"].as_str().unwrap(), &secret),
        r#"{"key":"v"}"#
    );
}

#[test]
fn test_invalid_key_is_reported_before_reading_files() {
    let output = assemble::build_action(&BuildActionArgs {
        request_file: PathBuf::from("/nonexistent/request.json"),
        key: key_args("04abcdef"),
    });

    let message = format!("{:#}", output.unwrap_err());
    assert!(message.contains("trust domain public key"));
    assert!(message.contains("0x"));
}

#[test]
fn test_execute_encrypt_subcommand() {
    let (secret, public_hex) = keypair();
    let cli = Cli::try_parse_from([
        "oracle-flow",
        "encrypt",
        "--data",
        "api-key-123",
        "--td-public-key",
        public_hex.as_str(),
    ])
    .unwrap();

    let output = execute(cli).unwrap();
    assert_eq!(open_hex(&output, &secret), "api-key-123");
}

#[test]
fn test_pretty_output_is_multiline() {
    let dir = TempDir::new().unwrap();
    let (_, public_hex) = keypair();
    let patch_file = write_json(&dir, "patch.json", &json!({"body": "x"}));

    let output = assemble::seal_patch(&SealPatchArgs {
        patch_file,
        key: TdKeyArgs {
            td_public_key: public_hex,
            pretty: true,
        },
    })
    .unwrap();

    assert!(output.contains('\n'));
}
