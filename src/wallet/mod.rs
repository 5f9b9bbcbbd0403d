//! Wallet functionality: key material and output scanning.
//!
//! The scanner consumes fetched blocks in height order and tests every
//! transaction output against the wallet's keys, emitting spendable inputs
//! on the owned-input stream.

pub mod keys;
pub mod scanner;

#[cfg(test)]
mod scanner_test;

pub use keys::WalletKeys;
pub use scanner::OutputScanner;
