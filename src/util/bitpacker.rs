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

//! Bit-level packing over a bitvec. Slower than raw bit twiddling but much
//! easier to follow and modify. Big-endian bit order throughout: the most
//! significant bit of each written value comes first.

use bitvec::prelude::*;

use crate::error::{Error, ErrorKind};

/// Resizable bit buffer with independent write and read cursors. Writes
/// always append; reads consume from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitPacker {
	bits: BitVec<u8, Msb0>,
	cursor: usize,
}

impl BitPacker {
	/// Create a new, empty bitpacker
	pub fn new() -> Self {
		BitPacker {
			bits: BitVec::new(),
			cursor: 0,
		}
	}

	/// Append the low `count` bits of `value`, most significant first.
	/// `count` must be at most 63.
	pub fn write_bits(&mut self, value: u64, count: usize) {
		debug_assert!(count <= 63, "bit count out of range");
		for i in (0..count).rev() {
			self.bits.push(value & (1 << i) != 0);
		}
	}

	/// Append each byte of `data` as eight bits
	pub fn write_bytes(&mut self, data: &[u8]) {
		for b in data {
			self.write_bits(u64::from(*b), 8);
		}
	}

	/// Consume and return the next `count` bits as an unsigned integer,
	/// most significant first. `count` must be at most 63.
	pub fn read_bits(&mut self, count: usize) -> Result<u64, Error> {
		debug_assert!(count <= 63, "bit count out of range");
		if count > self.available() {
			return Err(ErrorKind::ShortBuffer(count, self.available()))?;
		}
		let mut out = 0u64;
		for _ in 0..count {
			out = (out << 1) | u64::from(self.bits[self.cursor]);
			self.cursor += 1;
		}
		Ok(out)
	}

	/// Number of written bits not yet read
	pub fn available(&self) -> usize {
		self.bits.len() - self.cursor
	}

	/// Total number of written bits
	pub fn len(&self) -> usize {
		self.bits.len()
	}

	/// Whether nothing has been written yet
	pub fn is_empty(&self) -> bool {
		self.bits.is_empty()
	}

	/// The written bits as bytes, the final byte zero-padded
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity((self.bits.len() + 7) / 8);
		for chunk in self.bits.chunks(8) {
			let mut byte = 0u8;
			for (i, bit) in chunk.iter().enumerate() {
				if *bit {
					byte |= 1 << (7 - i);
				}
			}
			out.push(byte);
		}
		out
	}
}
