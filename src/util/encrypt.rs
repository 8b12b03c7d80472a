// Copyright 2019 The Grin Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Master secret encryption: a four-round Feistel network whose round
//! function is PBKDF2-HMAC-SHA256 keyed by round number and passphrase.

use crate::config::SchemeConfig;
use crate::error::{Error, ErrorKind};
use crate::util::rs1024;

#[cfg(feature = "ring_pbkdf2")]
use std::num::NonZeroU32;

#[cfg(all(feature = "rust_crypto_pbkdf2", not(feature = "ring_pbkdf2")))]
use sha2::Sha256;

#[cfg(not(any(feature = "ring_pbkdf2", feature = "rust_crypto_pbkdf2")))]
compile_error!("either the `ring_pbkdf2` or the `rust_crypto_pbkdf2` feature must be enabled");

/// Feistel cipher over the master secret, bound to one share set's
/// identifier, backup format and iteration exponent
pub struct MasterSecretCipher {
	identifier: u16,
	extendable: bool,
	iteration_exponent: u8,
	config: SchemeConfig,
}

impl MasterSecretCipher {
	/// Create a cipher for the given share set parameters
	pub fn new(identifier: u16, extendable: bool, iteration_exponent: u8) -> MasterSecretCipher {
		MasterSecretCipher {
			identifier,
			extendable,
			iteration_exponent,
			config: SchemeConfig::new(),
		}
	}

	/// Encrypt the master secret. Length must be even.
	pub fn encrypt(&self, master_secret: &[u8], passphrase: &str) -> Vec<u8> {
		let rounds: Vec<u8> = (0..self.config.round_count).collect();
		self.feistel(master_secret, passphrase, &rounds)
	}

	/// Decrypt an encrypted master secret. Length must be even.
	pub fn decrypt(&self, enc_master_secret: &[u8], passphrase: &str) -> Vec<u8> {
		let rounds: Vec<u8> = (0..self.config.round_count).rev().collect();
		self.feistel(enc_master_secret, passphrase, &rounds)
	}

	fn feistel(&self, input: &[u8], passphrase: &str, rounds: &[u8]) -> Vec<u8> {
		debug_assert!(input.len() % 2 == 0, "input length must be even");
		let mut left = input[..input.len() / 2].to_vec();
		let mut right = input[input.len() / 2..].to_vec();
		let salt_prefix = self.salt_prefix();
		for round in rounds {
			let f = self.round_function(*round, passphrase, &salt_prefix, &right);
			let next = xor(&left, &f);
			left = std::mem::replace(&mut right, next);
		}
		let mut out = right;
		out.append(&mut left);
		out
	}

	// the extendable format leaves the identifier out of the salt so that
	// further shares can be derived later
	fn salt_prefix(&self) -> Vec<u8> {
		if self.extendable {
			vec![]
		} else {
			let mut salt = rs1024::CUSTOMIZATION_STRING.to_vec();
			salt.extend_from_slice(&self.identifier.to_be_bytes());
			salt
		}
	}

	fn round_function(&self, round: u8, passphrase: &str, salt_prefix: &[u8], r: &[u8]) -> Vec<u8> {
		let iterations = (self.config.min_iteration_count / u32::from(self.config.round_count))
			<< self.iteration_exponent;
		let mut password = Vec::with_capacity(1 + passphrase.len());
		password.push(round);
		password.extend_from_slice(passphrase.as_bytes());
		let mut salt = salt_prefix.to_vec();
		salt.extend_from_slice(r);
		derive_key(&password, &salt, iterations, r.len())
	}
}

/// Every passphrase code point must be printable ASCII; the empty string
/// is "no passphrase".
pub fn check_passphrase(passphrase: &str) -> Result<(), Error> {
	if !passphrase.chars().all(|c| matches!(c, ' '..='~')) {
		return Err(ErrorKind::NonAsciiPassphrase)?;
	}
	Ok(())
}

#[cfg(all(feature = "rust_crypto_pbkdf2", not(feature = "ring_pbkdf2")))]
fn derive_key(password: &[u8], salt: &[u8], iterations: u32, out_length: usize) -> Vec<u8> {
	let mut out = vec![0u8; out_length];
	pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
	out
}

#[cfg(feature = "ring_pbkdf2")]
fn derive_key(password: &[u8], salt: &[u8], iterations: u32, out_length: usize) -> Vec<u8> {
	let mut out = vec![0u8; out_length];
	ring::pbkdf2::derive(
		ring::pbkdf2::PBKDF2_HMAC_SHA256,
		NonZeroU32::new(iterations).expect("iteration count is never zero"),
		salt,
		password,
		&mut out,
	);
	out
}

// xor values in both slices, up to the length of b
fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
	a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util;
	use rand::rngs::StdRng;
	use rand::{RngCore, SeedableRng};

	fn enc_dec_impl(secret: &[u8], passphrase: &str, identifier: u16, extendable: bool) {
		let cipher = MasterSecretCipher::new(identifier, extendable, 0);
		let encrypted = cipher.encrypt(secret, passphrase);
		assert_ne!(encrypted, secret.to_vec());
		assert_eq!(encrypted.len(), secret.len());
		let decrypted = cipher.decrypt(&encrypted, passphrase);
		assert_eq!(decrypted, secret.to_vec());
	}

	#[test]
	fn encrypt_decrypt() {
		let mut rng = StdRng::seed_from_u64(42);
		let s = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		enc_dec_impl(&s, "", 7470, false);
		enc_dec_impl(&s, "", 7470, true);
		for len in &[16usize, 18, 32] {
			let secret = util::fill_vec_rand(&mut rng, *len);
			let id = (rng.next_u32() & 0x7fff) as u16;
			enc_dec_impl(&secret, "", id, false);
			enc_dec_impl(&secret, "pebkac", id, true);
		}
	}

	#[test]
	fn passphrase_changes_ciphertext() {
		let secret = b"ABCDEFGHIJKLMNOP";
		let cipher = MasterSecretCipher::new(1234, false, 0);
		let with = cipher.encrypt(secret, "TREZOR");
		let without = cipher.encrypt(secret, "");
		assert_ne!(with, without);
		// decrypting with the wrong passphrase yields same-length garbage
		let garbled = cipher.decrypt(&with, "");
		assert_eq!(garbled.len(), secret.len());
		assert_ne!(garbled, secret.to_vec());
	}

	#[test]
	fn extendable_ignores_identifier() {
		let secret = b"ABCDEFGHIJKLMNOP";
		let a = MasterSecretCipher::new(100, true, 0).encrypt(secret, "x");
		let b = MasterSecretCipher::new(29999, true, 0).encrypt(secret, "x");
		assert_eq!(a, b);
		let a = MasterSecretCipher::new(100, false, 0).encrypt(secret, "x");
		let b = MasterSecretCipher::new(29999, false, 0).encrypt(secret, "x");
		assert_ne!(a, b);
	}

	#[test]
	fn passphrase_validation() {
		assert!(check_passphrase("").is_ok());
		assert!(check_passphrase("TREZOR").is_ok());
		assert!(check_passphrase("with spaces & ~tildes~").is_ok());
		assert_eq!(
			check_passphrase("tab\there").unwrap_err().kind(),
			ErrorKind::NonAsciiPassphrase
		);
		assert_eq!(
			check_passphrase("héllo").unwrap_err().kind(),
			ErrorKind::NonAsciiPassphrase
		);
	}
}
