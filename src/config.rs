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

//! Wire-level constants of the sharing scheme and the word lengths derived
//! from them. All values are fixed by SLIP-0039; changing any of them
//! breaks compatibility with other implementations.

/// Scheme constants plus derived lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeConfig {
	/// The length of one mnemonic word in bits
	pub radix_bits: u8,
	/// The length of the random identifier in bits
	pub id_length_bits: u8,
	/// The length of the extendable backup flag in bits
	pub extendable_length_bits: u8,
	/// The length of the iteration exponent in bits
	pub iteration_exp_length_bits: u8,
	/// The maximum number of shares (and groups) that can be created
	pub max_share_count: u8,
	/// The length of the RS1024 checksum in words
	pub checksum_length_words: u8,
	/// The length of the digest of the shared secret in bytes
	pub digest_length_bytes: u8,
	/// The minimum allowed entropy of the master secret in bits
	pub min_strength_bits: u16,
	/// The total number of PBKDF2 iterations at exponent 0
	pub min_iteration_count: u32,
	/// The number of rounds in the Feistel cipher
	pub round_count: u8,
	/// The x coordinate carrying the shared secret
	pub secret_index: u8,
	/// The x coordinate carrying the digest of the shared secret
	pub digest_index: u8,
	/// The number of words in the word list
	pub radix: u16,
	/// The length of identifier, flag and iteration exponent in words
	pub id_exp_length_words: u8,
	/// The length of a mnemonic in words, not counting the share value
	pub metadata_length_words: u8,
	/// The minimum allowed length of a mnemonic in words
	pub min_mnemonic_length_words: u8,
}

impl Default for SchemeConfig {
	fn default() -> Self {
		let radix_bits = 10;
		let id_length_bits = 15;
		let extendable_length_bits = 1;
		let iteration_exp_length_bits = 4;
		let max_share_count = 16;
		let checksum_length_words = 3;
		let digest_length_bytes = 4;
		let min_strength_bits = 128;
		let min_iteration_count = 10000;
		let round_count = 4;
		let secret_index = 255;
		let digest_index = 254;

		// derived values
		let radix = 2u16.pow(u32::from(radix_bits));
		let id_exp_length_words =
			(id_length_bits + extendable_length_bits + iteration_exp_length_bits) / radix_bits;
		let metadata_length_words = id_exp_length_words + 2 + checksum_length_words;
		let min_mnemonic_length_words =
			metadata_length_words + (f64::from(min_strength_bits) / 10f64).ceil() as u8;

		SchemeConfig {
			radix_bits,
			id_length_bits,
			extendable_length_bits,
			iteration_exp_length_bits,
			max_share_count,
			checksum_length_words,
			digest_length_bytes,
			min_strength_bits,
			min_iteration_count,
			round_count,
			secret_index,
			digest_index,
			radix,
			id_exp_length_words,
			metadata_length_words,
			min_mnemonic_length_words,
		}
	}
}

impl SchemeConfig {
	/// Scheme constants as fixed by the standard
	pub fn new() -> Self {
		SchemeConfig {
			..Default::default()
		}
	}
}
