// ABOUTME: Confidential input encoding seam between fitness records and contract payloads
// ABOUTME: Provides the InputEncryptor trait and the zero-filled PlaceholderEncryptor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Secure Stride

//! # Confidential Input Encoding
//!
//! The SecureStride contract accepts its numeric inputs as opaque `bytes`
//! payloads plus one input proof, the shape an FHE coprocessor would
//! consume. This module isolates payload preparation behind the
//! [`InputEncryptor`] trait so a genuine encryption scheme can be
//! substituted without touching the submission and confirmation flow.
//!
//! **The bundled [`PlaceholderEncryptor`] is a simulation, not
//! cryptography.** It emits zero-filled buffers of the correct sizes and
//! provides no confidentiality whatsoever. It exists so the wire format,
//! submission pipeline, and tests are exercised end-to-end while the real
//! encryption backend is external to this repository.

use crate::constants::payload::{ENCRYPTED_INPUT_LEN, INPUT_PROOF_LEN};
use crate::errors::AppResult;

/// One encrypted input value: a fixed-size opaque buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedInput([u8; ENCRYPTED_INPUT_LEN]);

impl EncryptedInput {
    /// Wrap a prepared buffer
    #[must_use]
    pub const fn new(bytes: [u8; ENCRYPTED_INPUT_LEN]) -> Self {
        Self(bytes)
    }

    /// View the payload bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ENCRYPTED_INPUT_LEN] {
        &self.0
    }

    /// Consume into an owned byte vector for calldata assembly
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// The proof accompanying a batch of encrypted inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProof([u8; INPUT_PROOF_LEN]);

impl InputProof {
    /// Wrap a prepared proof buffer
    #[must_use]
    pub const fn new(bytes: [u8; INPUT_PROOF_LEN]) -> Self {
        Self(bytes)
    }

    /// View the proof bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; INPUT_PROOF_LEN] {
        &self.0
    }

    /// Consume into an owned byte vector for calldata assembly
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Prepares confidential values for submission.
///
/// Implementations turn plaintext numeric fields into the contract's
/// opaque input format. The submitter calls `encrypt_u64` once per
/// confidential field and `proof` once per transaction, after the wallet
/// connectivity check and record validation have passed.
pub trait InputEncryptor: Send + Sync {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Encode one numeric value into an opaque 32-byte input
    fn encrypt_u64(&self, value: u64) -> AppResult<EncryptedInput>;

    /// Produce the proof covering a batch of encoded inputs
    fn proof(&self, inputs: &[EncryptedInput]) -> AppResult<InputProof>;
}

/// Zero-filled stand-in for a real encryption backend.
///
/// In a real implementation these buffers would carry FHE ciphertexts and
/// a coprocessor proof; here every buffer is zeroed and the plaintext is
/// discarded. Do not mistake this for a security boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEncryptor;

impl PlaceholderEncryptor {
    /// Create a placeholder encryptor
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InputEncryptor for PlaceholderEncryptor {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn encrypt_u64(&self, _value: u64) -> AppResult<EncryptedInput> {
        Ok(EncryptedInput::new([0u8; ENCRYPTED_INPUT_LEN]))
    }

    fn proof(&self, _inputs: &[EncryptedInput]) -> AppResult<InputProof> {
        Ok(InputProof::new([0u8; INPUT_PROOF_LEN]))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn placeholder_inputs_are_zero_filled() {
        let encryptor = PlaceholderEncryptor::new();
        let input = encryptor.encrypt_u64(9_000).unwrap();
        assert_eq!(input.as_bytes(), &[0u8; ENCRYPTED_INPUT_LEN]);

        let proof = encryptor.proof(&[input]).unwrap();
        assert_eq!(proof.as_bytes(), &[0u8; INPUT_PROOF_LEN]);
    }

    #[test]
    fn payload_sizes_match_the_contract_format() {
        let encryptor = PlaceholderEncryptor::new();
        assert_eq!(encryptor.encrypt_u64(1).unwrap().into_vec().len(), 32);
        assert_eq!(encryptor.proof(&[]).unwrap().into_vec().len(), 64);
    }
}
