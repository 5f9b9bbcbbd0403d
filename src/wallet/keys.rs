//! Wallet key material.

use zeroize::Zeroizing;

use crate::crypto;
use crate::error::{CryptoError, CryptoResult};
use crate::types::PublicKey;

/// The key set needed to scan for and spend owned outputs.
///
/// Secrets are held in zeroizing buffers and never exposed by value; the
/// scanner borrows them for the duration of a derivation.
#[derive(Clone)]
pub struct WalletKeys {
    private_view_key: Zeroizing<[u8; 32]>,
    private_spend_key: Zeroizing<[u8; 32]>,
    public_spend_key: PublicKey,
    public_view_key: PublicKey,
}

impl WalletKeys {
    /// Build the key set from the two private keys, deriving the public
    /// halves.
    pub fn from_secrets(private_view_key: [u8; 32], private_spend_key: [u8; 32]) -> Self {
        let public_view_key = PublicKey(crypto::public_key_from_secret(&private_view_key));
        let public_spend_key = PublicKey(crypto::public_key_from_secret(&private_spend_key));
        Self {
            private_view_key: Zeroizing::new(private_view_key),
            private_spend_key: Zeroizing::new(private_spend_key),
            public_spend_key,
            public_view_key,
        }
    }

    /// Parse the two private keys from 64-character hex strings.
    pub fn from_hex(private_view_key: &str, private_spend_key: &str) -> CryptoResult<Self> {
        Ok(Self::from_secrets(
            parse_secret(private_view_key)?,
            parse_secret(private_spend_key)?,
        ))
    }

    /// The private view key, used to compute key derivations.
    pub fn private_view_key(&self) -> &[u8; 32] {
        &self.private_view_key
    }

    /// The private spend key, used to compute key images.
    pub fn private_spend_key(&self) -> &[u8; 32] {
        &self.private_spend_key
    }

    /// The public spend key ownership candidates are compared against.
    pub fn public_spend_key(&self) -> &PublicKey {
        &self.public_spend_key
    }

    /// The public view key (the sender-side derivation input).
    pub fn public_view_key(&self) -> &PublicKey {
        &self.public_view_key
    }
}

fn parse_secret(s: &str) -> CryptoResult<[u8; 32]> {
    let bytes = Zeroizing::new(hex::decode(s)?);
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })
}

impl std::fmt::Debug for WalletKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletKeys")
            .field("public_spend_key", &self.public_spend_key)
            .field("public_view_key", &self.public_view_key)
            .finish_non_exhaustive()
    }
}
