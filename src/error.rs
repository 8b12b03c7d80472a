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

//! Error types for the slip39 crate

use failure::{Backtrace, Context, Fail};
use std::fmt::{self, Display};

/// Error definition
#[derive(Debug, Fail)]
pub struct Error {
	inner: Context<ErrorKind>,
}

/// Every failure the crate can report
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
	/// Master secret shorter than 16 bytes or of odd length
	#[fail(
		display = "master secret must be at least 16 bytes and of even length (got {} bytes)",
		_0
	)]
	InvalidSeedLength(usize),

	/// Group or member threshold/count outside the scheme limits
	#[fail(display = "invalid group configuration: {}", _0)]
	InvalidGroupConfig(String),

	/// Mnemonic token absent from the word list
	#[fail(display = "'{}' is not a word from the list", _0)]
	UnknownWord(String),

	/// Mnemonic word count below the minimum
	#[fail(display = "mnemonic must be at least {} words (got {})", _1, _0)]
	TooShort(usize, usize),

	/// RS1024 residue of the mnemonic is not 1
	#[fail(display = "mnemonic checksum is invalid")]
	BadChecksum,

	/// Share value padding too long or with set bits
	#[fail(display = "share value padding bits must be zero")]
	InvalidPadding,

	/// Shares disagree on common metadata
	#[fail(display = "mismatched shares: {}", _0)]
	MixedShareSet(String),

	/// Number of distinct groups differs from the group threshold
	#[fail(display = "shares from exactly {} groups are required (got {})", _0, _1)]
	WrongGroupCount(u8, usize),

	/// Number of members in a group differs from its member threshold
	#[fail(display = "exactly {} member shares are required (got {})", _0, _1)]
	WrongMemberCount(u8, usize),

	/// Repeated group or member index within its scope
	#[fail(display = "duplicate {} index {}", _0, _1)]
	DuplicateIndex(&'static str, u8),

	/// Reconstructed digest does not match the recomputed HMAC prefix
	#[fail(display = "digest of the shared secret does not match")]
	DigestMismatch,

	/// Passphrase contains a character outside printable ASCII
	#[fail(display = "passphrase must consist of printable ASCII characters")]
	NonAsciiPassphrase,

	/// Bit reader exhausted before the requested count
	#[fail(display = "bit buffer exhausted: {} bits requested, {} available", _0, _1)]
	ShortBuffer(usize, usize),

	/// Word list of the wrong size
	#[fail(display = "word list must contain exactly {} words (got {})", _0, _1)]
	InvalidWordList(usize, usize),
}

impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.inner, f)
	}
}

impl Error {
	/// get kind
	pub fn kind(&self) -> ErrorKind {
		self.inner.get_context().clone()
	}
	/// get cause
	pub fn cause(&self) -> Option<&dyn Fail> {
		self.inner.cause()
	}
	/// get backtrace
	pub fn backtrace(&self) -> Option<&Backtrace> {
		self.inner.backtrace()
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error {
			inner: Context::new(kind),
		}
	}
}

impl From<Context<ErrorKind>> for Error {
	fn from(inner: Context<ErrorKind>) -> Error {
		Error { inner }
	}
}
