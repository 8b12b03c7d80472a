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

//! The two-level sharing scheme: generation of grouped member shares from
//! a master secret and recovery of the master secret from a share set

use std::collections::BTreeMap;

use rand::RngCore;

use crate::config::SchemeConfig;
use crate::error::{Error, ErrorKind};
use crate::shamir::share::Share;
use crate::shamir::splitter::Splitter;
use crate::util;
use crate::util::encrypt::{check_passphrase, MasterSecretCipher};
use crate::wordlist::WordList;

/// The shares generated for one group, along with the metadata common to
/// the whole share set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupShare {
	/// Identifier shared by the whole share set
	pub identifier: u16,
	/// Whether the set is an extendable backup
	pub extendable: bool,
	/// Iteration exponent of the set
	pub iteration_exponent: u8,
	/// Index of this group
	pub group_index: u8,
	/// Number of groups needed to reconstruct the master secret
	pub group_threshold: u8,
	/// Total number of groups
	pub group_count: u8,
	/// Number of members needed to reconstruct this group's share
	pub member_threshold: u8,
	/// Member shares of the group
	pub member_shares: Vec<Share>,
}

impl GroupShare {
	/// The group's member shares as mnemonic sentences
	pub fn mnemonic_list(&self, wordlist: &WordList) -> Result<Vec<String>, Error> {
		self.member_shares
			.iter()
			.map(|s| s.to_mnemonic(wordlist))
			.collect()
	}
}

/// Split a master secret into grouped mnemonic shares.
///
/// `group_threshold` groups out of `groups` are needed to reconstruct the
/// secret; each `groups` entry is a (member_threshold, member_count) pair
/// describing one group. The secret is first encrypted with `passphrase`
/// (an empty string for none) under the given iteration exponent, and with
/// the identifier mixed into the key derivation unless `extendable`.
pub fn generate_mnemonics<R: RngCore>(
	rng: &mut R,
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase: &str,
	iteration_exponent: u8,
	extendable: bool,
) -> Result<Vec<GroupShare>, Error> {
	let config = SchemeConfig::new();

	if master_secret.len() * 8 < config.min_strength_bits as usize
		|| master_secret.len() % 2 != 0
	{
		return Err(ErrorKind::InvalidSeedLength(master_secret.len()))?;
	}
	if group_threshold == 0
		|| groups.is_empty()
		|| group_threshold as usize > groups.len()
		|| groups.len() > config.max_share_count as usize
	{
		return Err(ErrorKind::InvalidGroupConfig(format!(
			"group threshold ({}) and group count ({}) must be between 1 and {}, with the \
			 threshold not exceeding the count",
			group_threshold,
			groups.len(),
			config.max_share_count
		)))?;
	}
	for (i, (member_threshold, member_count)) in groups.iter().enumerate() {
		if *member_threshold == 0
			|| member_threshold > member_count
			|| *member_count > config.max_share_count
		{
			return Err(ErrorKind::InvalidGroupConfig(format!(
				"member threshold ({}) and member count ({}) of group {} must be between 1 \
				 and {}, with the threshold not exceeding the count",
				member_threshold, member_count, i, config.max_share_count
			)))?;
		}
		if *member_threshold == 1 && *member_count > 1 {
			return Err(ErrorKind::InvalidGroupConfig(format!(
				"group {} has a member threshold of 1, which requires a member count of 1 \
				 (use a larger threshold for redundancy)",
				i
			)))?;
		}
	}
	if iteration_exponent > 15 {
		return Err(ErrorKind::InvalidGroupConfig(format!(
			"iteration exponent ({}) must fit in four bits",
			iteration_exponent
		)))?;
	}
	check_passphrase(passphrase)?;

	let identifier = random_identifier(rng, &config);
	let cipher = MasterSecretCipher::new(identifier, extendable, iteration_exponent);
	let encrypted_master = cipher.encrypt(master_secret, passphrase);

	let splitter = Splitter::new(Some(&config));
	let group_secrets = splitter.split_secret(
		rng,
		group_threshold,
		groups.len() as u8,
		&encrypted_master,
	)?;

	let mut group_shares = Vec::with_capacity(groups.len());
	for (group_index, group_secret) in group_secrets {
		let (member_threshold, member_count) = groups[group_index as usize];
		let members = splitter.split_secret(rng, member_threshold, member_count, &group_secret)?;
		let member_shares = members
			.into_iter()
			.map(|(member_index, share_value)| Share {
				identifier,
				extendable,
				iteration_exponent,
				group_index,
				group_threshold,
				group_count: groups.len() as u8,
				member_index,
				member_threshold,
				share_value,
			})
			.collect();
		group_shares.push(GroupShare {
			identifier,
			extendable,
			iteration_exponent,
			group_index,
			group_threshold,
			group_count: groups.len() as u8,
			member_threshold,
			member_shares,
		});
	}

	Ok(group_shares)
}

/// As [`generate_mnemonics`], with a freshly drawn master secret of
/// `strength_bits` entropy
pub fn generate_mnemonics_random<R: RngCore>(
	rng: &mut R,
	group_threshold: u8,
	groups: &[(u8, u8)],
	strength_bits: u16,
	passphrase: &str,
	iteration_exponent: u8,
	extendable: bool,
) -> Result<Vec<GroupShare>, Error> {
	let config = SchemeConfig::new();
	if strength_bits < config.min_strength_bits || strength_bits % 16 != 0 {
		return Err(ErrorKind::InvalidSeedLength(strength_bits as usize / 8))?;
	}
	let master_secret = util::fill_vec_rand(rng, strength_bits as usize / 8);
	generate_mnemonics(
		rng,
		group_threshold,
		groups,
		&master_secret,
		passphrase,
		iteration_exponent,
		extendable,
	)
}

/// Combine mnemonic sentences back into the master secret
pub fn combine_mnemonics(
	mnemonics: &[String],
	wordlist: &WordList,
	passphrase: &str,
) -> Result<Vec<u8>, Error> {
	let shares = mnemonics
		.iter()
		.map(|m| Share::from_mnemonic(m, wordlist))
		.collect::<Result<Vec<_>, _>>()?;
	combine_shares(&shares, passphrase)
}

/// Combine decoded shares back into the master secret. The collection may
/// be in any order but must contain exactly the required number of groups
/// and, per group, exactly that group's member threshold of shares.
pub fn combine_shares(shares: &[Share], passphrase: &str) -> Result<Vec<u8>, Error> {
	check_passphrase(passphrase)?;

	let first = match shares.first() {
		Some(s) => s,
		None => return Err(ErrorKind::WrongGroupCount(1, 0))?,
	};
	for s in shares {
		if s.identifier != first.identifier || s.extendable != first.extendable {
			return Err(ErrorKind::MixedShareSet(
				"all shares must begin with the same identifier and backup format".to_owned(),
			))?;
		}
		if s.iteration_exponent != first.iteration_exponent {
			return Err(ErrorKind::MixedShareSet(
				"all shares must use the same iteration exponent".to_owned(),
			))?;
		}
		if s.group_threshold != first.group_threshold || s.group_count != first.group_count {
			return Err(ErrorKind::MixedShareSet(
				"all shares must agree on group threshold and group count".to_owned(),
			))?;
		}
	}
	if first.group_threshold > first.group_count {
		return Err(ErrorKind::InvalidGroupConfig(format!(
			"group threshold ({}) cannot exceed group count ({})",
			first.group_threshold, first.group_count
		)))?;
	}

	let mut groups: BTreeMap<u8, Vec<&Share>> = BTreeMap::new();
	for s in shares {
		groups.entry(s.group_index).or_insert_with(Vec::new).push(s);
	}
	if groups.len() != first.group_threshold as usize {
		return Err(ErrorKind::WrongGroupCount(
			first.group_threshold,
			groups.len(),
		))?;
	}

	let config = SchemeConfig::new();
	let splitter = Splitter::new(Some(&config));

	let mut group_points = Vec::with_capacity(groups.len());
	for (group_index, members) in groups {
		let member_threshold = members[0].member_threshold;
		for (i, m) in members.iter().enumerate() {
			if m.member_threshold != member_threshold {
				return Err(ErrorKind::MixedShareSet(format!(
					"shares of group {} disagree on the member threshold",
					group_index
				)))?;
			}
			if members[..i].iter().any(|o| o.member_index == m.member_index) {
				return Err(ErrorKind::DuplicateIndex("member", m.member_index))?;
			}
		}
		if members.len() != member_threshold as usize {
			return Err(ErrorKind::WrongMemberCount(
				member_threshold,
				members.len(),
			))?;
		}
		let points: Vec<(u8, Vec<u8>)> = members
			.iter()
			.map(|m| (m.member_index, m.share_value.clone()))
			.collect();
		let group_secret = splitter.recover_secret(&points, member_threshold)?;
		group_points.push((group_index, group_secret));
	}

	let encrypted_master = splitter.recover_secret(&group_points, first.group_threshold)?;
	let cipher = MasterSecretCipher::new(
		first.identifier,
		first.extendable,
		first.iteration_exponent,
	);
	Ok(cipher.decrypt(&encrypted_master, passphrase))
}

// four bytes from the source, masked down to the 15 bit identifier space
fn random_identifier<R: RngCore>(rng: &mut R, config: &SchemeConfig) -> u16 {
	let mut buf = [0u8; 4];
	rng.fill_bytes(&mut buf);
	(u32::from_be_bytes(buf) & ((1 << config.id_length_bits) - 1)) as u16
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	fn flatten_shares(group_shares: &[GroupShare]) -> Vec<Share> {
		group_shares
			.iter()
			.flat_map(|g| g.member_shares.clone())
			.collect()
	}

	#[test]
	fn generate_and_combine() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(0);
		let master_secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();

		// single 3 of 5 group
		let group_shares =
			generate_mnemonics(&mut rng, 1, &[(3, 5)], &master_secret, "", 0, true)?;
		assert_eq!(group_shares.len(), 1);
		assert_eq!(group_shares[0].member_shares.len(), 5);
		let subset = group_shares[0].member_shares[1..4].to_vec();
		assert_eq!(combine_shares(&subset, "")?, master_secret);

		// a few distinct groups, recovered from the leading members of the
		// first two
		let group_shares = generate_mnemonics(
			&mut rng,
			2,
			&[(3, 5), (2, 5), (3, 3), (13, 16)],
			&master_secret,
			"",
			0,
			false,
		)?;
		let mut subset = group_shares[0].member_shares[..3].to_vec();
		subset.extend_from_slice(&group_shares[1].member_shares[..2]);
		assert_eq!(combine_shares(&subset, "")?, master_secret);
		Ok(())
	}

	#[test]
	fn share_metadata_is_consistent() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(1);
		let master_secret = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567".to_vec();
		let group_shares =
			generate_mnemonics(&mut rng, 2, &[(2, 3), (1, 1)], &master_secret, "", 2, true)?;
		let all = flatten_shares(&group_shares);
		let first = &all[0];
		assert!(first.identifier < (1 << 15));
		for s in &all {
			assert_eq!(s.identifier, first.identifier);
			assert!(s.extendable);
			assert_eq!(s.iteration_exponent, 2);
			assert_eq!(s.group_threshold, 2);
			assert_eq!(s.group_count, 2);
			assert!(s.member_index < 16);
			assert_eq!(s.share_value.len(), master_secret.len());
		}
		Ok(())
	}

	#[test]
	fn mixed_share_sets_are_rejected() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(2);
		let master_secret = b"ABCDEFGHIJKLMNOP".to_vec();
		let a = generate_mnemonics(&mut rng, 1, &[(2, 2)], &master_secret, "", 0, false)?;

		// a share that claims another identifier
		let mut foreign = a[0].member_shares[1].clone();
		foreign.identifier ^= 1;
		let mixed = vec![a[0].member_shares[0].clone(), foreign];
		assert!(matches!(
			combine_shares(&mixed, "").unwrap_err().kind(),
			ErrorKind::MixedShareSet(_)
		));

		// duplicated member share
		let dup = vec![
			a[0].member_shares[0].clone(),
			a[0].member_shares[0].clone(),
		];
		assert_eq!(
			combine_shares(&dup, "").unwrap_err().kind(),
			ErrorKind::DuplicateIndex("member", 0)
		);

		// empty input
		assert_eq!(
			combine_shares(&[], "").unwrap_err().kind(),
			ErrorKind::WrongGroupCount(1, 0)
		);
		Ok(())
	}

	#[test]
	fn surplus_members_are_rejected() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(3);
		let master_secret = b"ABCDEFGHIJKLMNOP".to_vec();
		let group_shares =
			generate_mnemonics(&mut rng, 1, &[(3, 5)], &master_secret, "", 0, false)?;
		let all = group_shares[0].member_shares.clone();
		assert_eq!(
			combine_shares(&all, "").unwrap_err().kind(),
			ErrorKind::WrongMemberCount(3, 5)
		);
		Ok(())
	}

	#[test]
	fn random_master_secret() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(4);
		let group_shares =
			generate_mnemonics_random(&mut rng, 1, &[(2, 3)], 256, "", 0, true)?;
		let subset = group_shares[0].member_shares[..2].to_vec();
		assert_eq!(combine_shares(&subset, "")?.len(), 32);

		assert_eq!(
			generate_mnemonics_random(&mut rng, 1, &[(2, 3)], 120, "", 0, true)
				.unwrap_err()
				.kind(),
			ErrorKind::InvalidSeedLength(15)
		);
		assert!(
			generate_mnemonics_random(&mut rng, 1, &[(2, 3)], 136, "", 0, true).is_err()
		);
		Ok(())
	}

	#[test]
	fn invalid_generation_inputs() {
		let mut rng = StdRng::seed_from_u64(5);
		let master_secret = b"ABCDEFGHIJKLMNOP".to_vec();

		// iteration exponent must fit the wire field
		assert!(matches!(
			generate_mnemonics(&mut rng, 1, &[(3, 5)], &master_secret, "", 16, false)
				.unwrap_err()
				.kind(),
			ErrorKind::InvalidGroupConfig(_)
		));
		// passphrase must be printable ASCII
		assert_eq!(
			generate_mnemonics(&mut rng, 1, &[(3, 5)], &master_secret, "bell\x07", 0, false)
				.unwrap_err()
				.kind(),
			ErrorKind::NonAsciiPassphrase
		);
		// no groups at all
		assert!(matches!(
			generate_mnemonics(&mut rng, 1, &[], &master_secret, "", 0, false)
				.unwrap_err()
				.kind(),
			ErrorKind::InvalidGroupConfig(_)
		));
	}
}
