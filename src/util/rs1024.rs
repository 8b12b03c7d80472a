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

//! Reed-Solomon style checksum over the 10-bit word alphabet. A mnemonic
//! is valid iff the recurrence over customization string plus word indices
//! leaves a residue of 1.

use crate::error::{Error, ErrorKind};

/// Customization string binding the plain backup format
pub const CUSTOMIZATION_STRING: &[u8] = b"shamir";
/// Customization string binding the extendable backup format
pub const CUSTOMIZATION_STRING_EXTENDABLE: &[u8] = b"shamir_extendable";

const GEN: [u32; 10] = [
	0xe0e040, 0x1c1c080, 0x3838100, 0x7070200, 0xe0e0009, 0x1c0c2412, 0x38086c24, 0x3090fc48,
	0x21b1f890, 0x3f3f120,
];

/// The customization string for the given backup format
pub fn customization(extendable: bool) -> &'static [u8] {
	if extendable {
		CUSTOMIZATION_STRING_EXTENDABLE
	} else {
		CUSTOMIZATION_STRING
	}
}

// values interpreted as a list of 10 bit integers
fn polymod(values: &[u32]) -> u32 {
	let mut chk: u32 = 1;
	for v in values {
		let b = chk >> 20;
		chk = ((chk & 0xf_ffff) << 10) ^ v;
		for (i, g) in GEN.iter().enumerate() {
			if (b >> i) & 1 == 1 {
				chk ^= g;
			}
		}
	}
	chk
}

fn lanes(customization: &[u8], data: &[u16]) -> Vec<u32> {
	// each customization byte is its own 10-bit lane entry, prepended to
	// the word indices
	customization
		.iter()
		.map(|b| u32::from(*b))
		.chain(data.iter().map(|d| u32::from(*d)))
		.collect()
}

/// Computes the checksum words for `data`, most significant limb first
pub fn create_checksum(customization: &[u8], data: &[u16], checksum_length_words: u8) -> Vec<u16> {
	let len = checksum_length_words as usize;
	let mut values = lanes(customization, data);
	values.extend(std::iter::repeat(0).take(len));
	let polymod = polymod(&values) ^ 1;
	(0..len)
		.map(|i| ((polymod >> (10 * (len - 1 - i))) & 1023) as u16)
		.collect()
}

/// Verifies the checksum carried in the trailing words of `data`
pub fn verify_checksum(customization: &[u8], data: &[u16]) -> Result<(), Error> {
	if polymod(&lanes(customization, data)) != 1 {
		return Err(ErrorKind::BadChecksum)?;
	}
	Ok(())
}
