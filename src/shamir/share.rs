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

//! Definition of a share and its serialization to and from mnemonic words

use crate::config::SchemeConfig;
use crate::error::{Error, ErrorKind};
use crate::util::bitpacker::BitPacker;
use crate::util::rs1024;
use crate::wordlist::WordList;

/// One member share of a two-level split, together with the metadata every
/// mnemonic carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
	/// Random 15 bit value shared by all shares of one split; it also
	/// salts the encryption of the master secret
	pub identifier: u16,
	/// Whether the share belongs to an extendable backup, in which case
	/// the identifier is left out of the encryption salt (1 bit)
	pub extendable: bool,
	/// The total number of PBKDF2 iterations is 2500 << e (4 bits)
	pub iteration_exponent: u8,
	/// The x value of the group share (4 bits)
	pub group_index: u8,
	/// How many group shares are needed to reconstruct the master secret;
	/// encoded on the wire as GT - 1 (4 bits)
	pub group_threshold: u8,
	/// The total number of groups, encoded as g - 1 (4 bits)
	pub group_count: u8,
	/// The x value of the member share within its group (4 bits)
	pub member_index: u8,
	/// How many member shares are needed to reconstruct the group share,
	/// encoded as t - 1 (4 bits)
	pub member_threshold: u8,
	/// The y values of the member polynomials, one byte per byte of the
	/// master secret, big-endian and zero-padded to a word boundary on
	/// the wire
	pub share_value: Vec<u8>,
}

impl Share {
	/// Parse and validate a share from a whitespace-separated sentence
	pub fn from_mnemonic(sentence: &str, wordlist: &WordList) -> Result<Share, Error> {
		let indices = wordlist.words_to_indices(sentence)?;
		Share::unpack(&indices)
	}

	/// Render the share as a space-joined mnemonic sentence
	pub fn to_mnemonic(&self, wordlist: &WordList) -> Result<String, Error> {
		Ok(wordlist.indices_to_words(&self.pack()?))
	}

	/// The share as word indices: metadata prefix, padded share value and
	/// checksum
	pub fn pack(&self) -> Result<Vec<u16>, Error> {
		let config = SchemeConfig::new();
		let radix_bits = config.radix_bits as usize;
		let value_bits = self.share_value.len() * 8;
		let padding_bits = (radix_bits - value_bits % radix_bits) % radix_bits;

		let mut bp = BitPacker::new();
		bp.write_bits(
			u64::from(self.identifier),
			config.id_length_bits as usize,
		);
		bp.write_bits(
			u64::from(self.extendable),
			config.extendable_length_bits as usize,
		);
		bp.write_bits(
			u64::from(self.iteration_exponent),
			config.iteration_exp_length_bits as usize,
		);
		bp.write_bits(u64::from(self.group_index), 4);
		bp.write_bits(u64::from(self.group_threshold - 1), 4);
		bp.write_bits(u64::from(self.group_count - 1), 4);
		bp.write_bits(u64::from(self.member_index), 4);
		bp.write_bits(u64::from(self.member_threshold - 1), 4);
		bp.write_bits(0, padding_bits);
		bp.write_bytes(&self.share_value);
		debug_assert_eq!(bp.len() % radix_bits, 0);

		let mut words = Vec::with_capacity(bp.len() / radix_bits + 3);
		for _ in 0..bp.len() / radix_bits {
			words.push(bp.read_bits(radix_bits)? as u16);
		}
		let checksum = rs1024::create_checksum(
			rs1024::customization(self.extendable),
			&words,
			config.checksum_length_words,
		);
		words.extend_from_slice(&checksum);
		Ok(words)
	}

	/// Rebuild a share from word indices, verifying checksum and padding
	pub fn unpack(indices: &[u16]) -> Result<Share, Error> {
		let config = SchemeConfig::new();
		let radix_bits = config.radix_bits as usize;
		if indices.len() < config.min_mnemonic_length_words as usize {
			return Err(ErrorKind::TooShort(
				indices.len(),
				config.min_mnemonic_length_words as usize,
			))?;
		}

		let mut bp = BitPacker::new();
		for w in indices {
			bp.write_bits(u64::from(*w), radix_bits);
		}

		// the extendable flag selects the checksum customization, so pull
		// it out before verifying
		let identifier = bp.read_bits(config.id_length_bits as usize)? as u16;
		let extendable = bp.read_bits(config.extendable_length_bits as usize)? == 1;
		rs1024::verify_checksum(rs1024::customization(extendable), indices)?;

		let iteration_exponent =
			bp.read_bits(config.iteration_exp_length_bits as usize)? as u8;
		let group_index = bp.read_bits(4)? as u8;
		let group_threshold = bp.read_bits(4)? as u8 + 1;
		let group_count = bp.read_bits(4)? as u8 + 1;
		let member_index = bp.read_bits(4)? as u8;
		let member_threshold = bp.read_bits(4)? as u8 + 1;

		if group_threshold > group_count {
			return Err(ErrorKind::InvalidGroupConfig(format!(
				"group threshold ({}) cannot exceed group count ({})",
				group_threshold, group_count
			)))?;
		}

		let value_words = indices.len() - config.metadata_length_words as usize;
		let padding_bits = (value_words * radix_bits) % 16;
		if padding_bits > 8 {
			return Err(ErrorKind::InvalidPadding)?;
		}
		if padding_bits > 0 && bp.read_bits(padding_bits)? != 0 {
			return Err(ErrorKind::InvalidPadding)?;
		}

		let value_bytes = (value_words * radix_bits - padding_bits) / 8;
		let mut share_value = Vec::with_capacity(value_bytes);
		for _ in 0..value_bytes {
			share_value.push(bp.read_bits(8)? as u8);
		}

		Ok(Share {
			identifier,
			extendable,
			iteration_exponent,
			group_index,
			group_threshold,
			group_count,
			member_index,
			member_threshold,
			share_value,
		})
	}
}
