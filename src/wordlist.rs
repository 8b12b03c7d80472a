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

//! Word to index codec over a caller-supplied dictionary. Loading the
//! dictionary itself (from file, embedded asset, ...) is the caller's
//! concern; this module only enforces the 1024-entry contract.

use std::collections::HashMap;

use crate::config::SchemeConfig;
use crate::error::{Error, ErrorKind};

/// An ordered 1024-entry list of lowercase words and its inverse mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
	words: Vec<String>,
	indices: HashMap<String, u16>,
}

impl WordList {
	/// Build a word list from any ordered word source. The list must hold
	/// exactly 1024 entries.
	pub fn new<I, S>(words: I) -> Result<WordList, Error>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let config = SchemeConfig::new();
		let words: Vec<String> = words.into_iter().map(|w| w.into()).collect();
		if words.len() != config.radix as usize {
			return Err(ErrorKind::InvalidWordList(config.radix as usize, words.len()))?;
		}
		let indices = words
			.iter()
			.enumerate()
			.map(|(i, w)| (w.clone(), i as u16))
			.collect();
		Ok(WordList { words, indices })
	}

	/// The word at the given index. Indices come from 10-bit fields and
	/// are always in range.
	pub fn word(&self, index: u16) -> &str {
		&self.words[index as usize]
	}

	/// The index of a word
	pub fn index_of(&self, word: &str) -> Result<u16, Error> {
		match self.indices.get(word) {
			Some(i) => Ok(*i),
			None => Err(ErrorKind::UnknownWord(word.to_owned()))?,
		}
	}

	/// Resolve a whitespace-separated sentence to word indices, folding
	/// each token to lowercase
	pub fn words_to_indices(&self, sentence: &str) -> Result<Vec<u16>, Error> {
		sentence
			.split_ascii_whitespace()
			.map(|token| self.index_of(&token.to_lowercase()))
			.collect()
	}

	/// Render word indices as a space-joined sentence
	pub fn indices_to_words(&self, indices: &[u16]) -> String {
		indices
			.iter()
			.map(|i| self.word(*i))
			.collect::<Vec<_>>()
			.join(" ")
	}
}

/// A deterministic stand-in dictionary for tests: 1024 distinct
/// three-letter lowercase words.
#[cfg(test)]
pub(crate) fn test_word_list() -> WordList {
	let letters = b"abcdefghijklmnopqrstuvwxyz";
	let words = (0..1024usize).map(|i| {
		format!(
			"{}{}{}",
			letters[i % 26] as char,
			letters[(i / 26) % 26] as char,
			letters[(i / 676) % 26] as char,
		)
	});
	WordList::new(words).expect("test word list is 1024 entries")
}
