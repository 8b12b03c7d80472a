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

//! Two-level Shamir's Secret Sharing for Mnemonic Codes (SLIP-0039).
//!
//! A master secret is optionally encrypted with a passphrase, split into
//! group shares, and each group share split again into member shares; every
//! member share serializes to a checksummed mnemonic sentence over a
//! 1024-word dictionary. Reconstruction needs a threshold of members inside
//! a threshold of groups.
//!
//! The crate is the computational core only: callers supply the random
//! source ([`rand::RngCore`]) and the dictionary ([`WordList`]); command
//! line handling, word-list loading and persistence live elsewhere.

#[macro_use]
extern crate lazy_static;

mod config;
mod error;
pub mod field;
mod shamir;
pub mod util;
mod wordlist;

pub use crate::config::SchemeConfig;
pub use crate::error::{Error, ErrorKind};
pub use crate::shamir::{
	combine_mnemonics, combine_shares, generate_mnemonics, generate_mnemonics_random, GroupShare,
	Share, SharePoint, Splitter,
};
pub use crate::wordlist::WordList;
