//! Encryption vault for original, unredacted notes
//!
//! AES-256-GCM authenticated encryption keyed by a server-held secret. The
//! vault only ever wraps a JSON envelope containing the original note and
//! its creation timestamp; redacted notes remain the system of record, and
//! loss of the key makes the original permanently unrecoverable.
//!
//! # Example
//!
//! ```
//! use medrecall::config::secret_string;
//! use medrecall::vault::EncryptionVault;
//!
//! # fn example() -> medrecall::domain::Result<()> {
//! let vault = EncryptionVault::new(&secret_string("server-secret".to_string()))?;
//!
//! let sealed = vault.seal("Patient reported chest pain.")?;
//! let opened = vault.open(&sealed)?;
//! assert_eq!(opened, "Patient reported chest pain.");
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! - Every `seal` call draws a fresh random 96-bit nonce, so sealing the
//!   same plaintext twice yields different ciphertext.
//! - The authentication tag prevents tampering: `open` fails if the
//!   ciphertext, nonce, or tag has been modified or a different key is in
//!   use.
//! - Key material is derived from the configured secret with SHA-256 and is
//!   zeroed from memory on drop.

use crate::config::SecretString;
use crate::domain::{MedRecallError, Result};
use aes_gcm::{aead::Aead, Aes256Gcm, KeyInit, Nonce};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use rand::RngCore;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the AES-256-GCM key in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// Length of the AES-256-GCM nonce in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Length of the AES-GCM authentication tag in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Derived key material, zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
struct VaultKey {
    key: [u8; KEY_LENGTH],
}

/// The JSON envelope sealed by the vault
///
/// This is the only payload shape the vault is asked to wrap; structured
/// records are never encrypted directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesEnvelope {
    /// The original, unredacted note text
    pub original_notes: String,

    /// When the envelope was sealed
    pub sealed_at: DateTime<Utc>,
}

/// Symmetric vault for sealing and opening note envelopes
///
/// The key is read-only, process-wide state: loaded once from configuration
/// and shared by all operations. It is threaded in explicitly (rather than
/// read from ambient globals) so tests can exercise multiple keys in
/// isolation.
pub struct EncryptionVault {
    key: VaultKey,
}

impl EncryptionVault {
    /// Creates a vault keyed by the configured secret
    ///
    /// The 256-bit cipher key is the SHA-256 digest of the secret.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret is empty.
    pub fn new(secret: &SecretString) -> Result<Self> {
        let passphrase = secret.expose_secret();
        if passphrase.is_empty() {
            return Err(MedRecallError::Configuration(
                "encryption key must not be empty".to_string(),
            ));
        }

        let digest = Sha256::digest(passphrase.as_ref().as_bytes());
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&digest);

        Ok(Self {
            key: VaultKey { key },
        })
    }

    /// Encrypts `plaintext` under the vault key
    ///
    /// Returns base64(nonce || ciphertext || tag). Non-deterministic: a
    /// fresh nonce is drawn per call.
    pub fn seal(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key.key).expect("KEY_LENGTH is always valid");

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .expect("AES-GCM encryption cannot fail with valid inputs");

        let mut sealed = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(general_purpose::STANDARD.encode(sealed))
    }

    /// Decrypts ciphertext previously produced by [`seal`](Self::seal)
    ///
    /// # Errors
    ///
    /// Returns [`MedRecallError::Decrypt`] if the input is not valid
    /// base64, is too short to carry a nonce and tag, was sealed under a
    /// different key, or has been tampered with.
    pub fn open(&self, sealed: &str) -> Result<String> {
        let bytes = general_purpose::STANDARD
            .decode(sealed)
            .map_err(|e| MedRecallError::Decrypt(format!("ciphertext is not valid base64: {e}")))?;

        if bytes.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(MedRecallError::Decrypt(format!(
                "ciphertext too short: {} bytes, need at least {}",
                bytes.len(),
                NONCE_LENGTH + TAG_LENGTH
            )));
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LENGTH);
        let cipher = Aes256Gcm::new_from_slice(&self.key.key).expect("KEY_LENGTH is always valid");

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| {
                MedRecallError::Decrypt(
                    "authentication failed: wrong key or tampered ciphertext".to_string(),
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| MedRecallError::Decrypt(format!("plaintext is not valid UTF-8: {e}")))
    }

    /// Seals the original note inside a timestamped envelope
    pub fn seal_notes(&self, original_notes: &str) -> Result<String> {
        let envelope = NotesEnvelope {
            original_notes: original_notes.to_string(),
            sealed_at: Utc::now(),
        };
        let json = serde_json::to_string(&envelope)?;
        self.seal(&json)
    }

    /// Opens a sealed envelope back into its original note and timestamp
    ///
    /// # Errors
    ///
    /// Returns [`MedRecallError::Decrypt`] on any cipher failure, or a
    /// serialization error if the decrypted payload is not an envelope.
    pub fn open_notes(&self, sealed: &str) -> Result<NotesEnvelope> {
        let json = self.open(sealed)?;
        let envelope = serde_json::from_str(&json)?;
        Ok(envelope)
    }
}
