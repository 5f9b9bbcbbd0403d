//! Adapters over the CryptoNote elliptic-curve primitives.
//!
//! The scanning engine consumes these as black-box operations: derive a
//! shared secret from a transaction key and the private view key, recover a
//! candidate spend key from an output, and compute the key image that makes
//! an owned output spendable. The math is the standard CryptoNote scheme
//! over Ed25519 with Keccak-256 as the scalar hash.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use monero_generators::hash_to_point;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};

/// A key derivation: the shared secret `8·(secret·Public)` in compressed
/// form, used to unlock per-output key material.
pub type KeyDerivation = [u8; 32];

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn hash_to_scalar(data: &[u8]) -> Scalar {
    Scalar::from_bytes_mod_order(keccak256(data))
}

fn decompress(bytes: &[u8; 32]) -> CryptoResult<EdwardsPoint> {
    CompressedEdwardsY(*bytes)
        .decompress()
        .ok_or_else(|| CryptoError::InvalidPoint(hex::encode(bytes)))
}

/// CryptoNote varint: 7 bits per byte, little endian, high bit as
/// continuation flag.
fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Compute the shared key derivation `8·(secret_key · public_key)`.
///
/// For the wallet this is called with the transaction public key `R` and the
/// private view key `a`, yielding the same point the sender computed from
/// the recipient's public view key.
pub fn generate_key_derivation(
    public_key: &[u8; 32],
    secret_key: &[u8; 32],
) -> CryptoResult<KeyDerivation> {
    let point = decompress(public_key)?;
    let scalar = Zeroizing::new(Scalar::from_bytes_mod_order(*secret_key));
    let shared = (*scalar * point).mul_by_cofactor();
    Ok(shared.compress().to_bytes())
}

/// Hash a derivation and output index to the per-output secret scalar
/// `H_s(derivation ‖ varint(index))`.
fn derivation_to_scalar(derivation: &KeyDerivation, output_index: u64) -> Scalar {
    let mut buf = Zeroizing::new(Vec::with_capacity(32 + 10));
    buf.extend_from_slice(derivation);
    write_varint(output_index, &mut buf);
    hash_to_scalar(&buf)
}

/// Derive the one-time output key `H_s(derivation ‖ index)·G + base` the
/// sender attaches to an output destined for `base` (a public spend key).
pub fn derive_public_key(
    derivation: &KeyDerivation,
    output_index: u64,
    base: &[u8; 32],
) -> CryptoResult<[u8; 32]> {
    let base_point = decompress(base)?;
    let scalar = derivation_to_scalar(derivation, output_index);
    let derived = EdwardsPoint::mul_base(&scalar) + base_point;
    Ok(derived.compress().to_bytes())
}

/// Recover the candidate spend key `base − H_s(derivation ‖ index)·G` from a
/// one-time output key.
///
/// If the result equals the wallet's public spend key, the output belongs to
/// the wallet.
pub fn underive_public_key(
    derivation: &KeyDerivation,
    output_index: u64,
    base: &[u8; 32],
) -> CryptoResult<[u8; 32]> {
    let base_point = decompress(base)?;
    let scalar = derivation_to_scalar(derivation, output_index);
    let underived = base_point - EdwardsPoint::mul_base(&scalar);
    Ok(underived.compress().to_bytes())
}

/// Compute the key image `x·Hp(P)` for an owned output, where
/// `x = H_s(derivation ‖ index) + b` is the output's private ephemeral key
/// and `P = x·G` its one-time public key.
pub fn generate_key_image(
    derivation: &KeyDerivation,
    output_index: u64,
    secret_spend_key: &[u8; 32],
) -> CryptoResult<[u8; 32]> {
    let spend_scalar = Zeroizing::new(Scalar::from_bytes_mod_order(*secret_spend_key));
    let ephemeral = Zeroizing::new(derivation_to_scalar(derivation, output_index) + *spend_scalar);
    let one_time_key = EdwardsPoint::mul_base(&ephemeral).compress().to_bytes();
    let key_image = *ephemeral * hash_to_point(one_time_key);
    Ok(key_image.compress().to_bytes())
}

/// Public key `secret·G` for a secret scalar.
pub fn public_key_from_secret(secret_key: &[u8; 32]) -> [u8; 32] {
    let scalar = Zeroizing::new(Scalar::from_bytes_mod_order(*secret_key));
    EdwardsPoint::mul_base(&scalar).compress().to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_bytes(seed: u8) -> [u8; 32] {
        Scalar::from_bytes_mod_order([seed; 32]).to_bytes()
    }

    #[test]
    fn varint_encoding() {
        let mut buf = Vec::new();
        write_varint(0, &mut buf);
        assert_eq!(buf, [0x00]);

        buf.clear();
        write_varint(0x7f, &mut buf);
        assert_eq!(buf, [0x7f]);

        buf.clear();
        write_varint(0x80, &mut buf);
        assert_eq!(buf, [0x80, 0x01]);

        buf.clear();
        write_varint(300, &mut buf);
        assert_eq!(buf, [0xac, 0x02]);
    }

    #[test]
    fn sender_and_receiver_agree_on_derivation() {
        // Sender: ephemeral tx key r, recipient view key a.
        let tx_secret = scalar_bytes(3);
        let view_secret = scalar_bytes(7);
        let tx_public = public_key_from_secret(&tx_secret);
        let view_public = public_key_from_secret(&view_secret);

        // 8·(r·A) computed by the sender equals 8·(a·R) computed by the wallet.
        let sender = generate_key_derivation(&view_public, &tx_secret).unwrap();
        let receiver = generate_key_derivation(&tx_public, &view_secret).unwrap();
        assert_eq!(sender, receiver);
    }

    #[test]
    fn underive_inverts_derive() {
        let derivation = generate_key_derivation(
            &public_key_from_secret(&scalar_bytes(11)),
            &scalar_bytes(13),
        )
        .unwrap();
        let spend_public = public_key_from_secret(&scalar_bytes(17));

        let one_time = derive_public_key(&derivation, 2, &spend_public).unwrap();
        let recovered = underive_public_key(&derivation, 2, &one_time).unwrap();
        assert_eq!(recovered, spend_public);

        // A different index produces a different one-time key and fails to
        // recover the spend key.
        let recovered_wrong = underive_public_key(&derivation, 3, &one_time).unwrap();
        assert_ne!(recovered_wrong, spend_public);
    }

    #[test]
    fn key_image_is_deterministic() {
        let derivation = generate_key_derivation(
            &public_key_from_secret(&scalar_bytes(19)),
            &scalar_bytes(23),
        )
        .unwrap();
        let spend_secret = scalar_bytes(29);

        let first = generate_key_image(&derivation, 0, &spend_secret).unwrap();
        let second = generate_key_image(&derivation, 0, &spend_secret).unwrap();
        assert_eq!(first, second);

        let other_index = generate_key_image(&derivation, 1, &spend_secret).unwrap();
        assert_ne!(first, other_index);
    }

    #[test]
    fn rejects_invalid_point() {
        // Roughly half of all byte strings are not valid compressed Edwards
        // points; find one and check it is refused.
        let secret = scalar_bytes(31);
        let bad = (0u8..=255)
            .map(|b| [b; 32])
            .find(|candidate| CompressedEdwardsY(*candidate).decompress().is_none())
            .expect("some candidate must fail decompression");
        assert!(matches!(
            generate_key_derivation(&bad, &secret),
            Err(CryptoError::InvalidPoint(_))
        ));
    }
}
