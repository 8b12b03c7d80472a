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

//! Single-level secret splitting and recovery. A split secret is a set of
//! (x, value) points on per-byte polynomials over GF(256); the secret
//! itself sits at the reserved x=255 and a truncated HMAC digest of it at
//! x=254, so that recovery can detect wrong or insufficient shares.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::config::SchemeConfig;
use crate::error::{Error, ErrorKind};
use crate::field::lagrange;
use crate::util;

type HmacSha256 = Hmac<Sha256>;

/// One share of a split secret: the x coordinate and one polynomial byte
/// per byte of the secret
pub type SharePoint = (u8, Vec<u8>);

/// Splits and recovers secrets at one level of the share hierarchy
pub struct Splitter {
	config: SchemeConfig,
}

impl Splitter {
	/// Create new
	pub fn new(config: Option<&SchemeConfig>) -> Splitter {
		Splitter {
			config: match config {
				Some(c) => *c,
				None => SchemeConfig::new(),
			},
		}
	}

	/// Split `secret` into `share_count` points of which any `threshold`
	/// recover it. The secret must be at least 16 bytes and of even length.
	pub fn split_secret<R: RngCore>(
		&self,
		rng: &mut R,
		threshold: u8,
		share_count: u8,
		secret: &[u8],
	) -> Result<Vec<SharePoint>, Error> {
		if threshold == 0 || threshold > self.config.max_share_count {
			return Err(ErrorKind::InvalidGroupConfig(format!(
				"threshold must be between 1 and {}",
				self.config.max_share_count
			)))?;
		}
		if share_count < threshold || share_count > self.config.max_share_count {
			return Err(ErrorKind::InvalidGroupConfig(format!(
				"share count must be between the threshold ({}) and {}",
				threshold, self.config.max_share_count
			)))?;
		}
		if secret.len() < self.config.min_strength_bits as usize / 8 || secret.len() % 2 != 0 {
			return Err(ErrorKind::InvalidSeedLength(secret.len()))?;
		}

		// a threshold of one needs no polynomial and no digest
		if threshold == 1 {
			return Ok((0..share_count).map(|i| (i, secret.to_vec())).collect());
		}

		let random_share_count = threshold - 2;
		let mut shares: Vec<SharePoint> = (0..random_share_count)
			.map(|i| (i, util::fill_vec_rand(rng, secret.len())))
			.collect();

		let random_part =
			util::fill_vec_rand(rng, secret.len() - self.config.digest_length_bytes as usize);
		let mut digest_value = self.create_digest(&random_part, secret);
		digest_value.extend_from_slice(&random_part);

		let mut base_points = shares.clone();
		base_points.push((self.config.digest_index, digest_value));
		base_points.push((self.config.secret_index, secret.to_vec()));

		for i in random_share_count..share_count {
			shares.push((i, lagrange::interpolate(&base_points, i)));
		}

		Ok(shares)
	}

	/// Recover a secret from exactly `threshold` points
	pub fn recover_secret(&self, points: &[SharePoint], threshold: u8) -> Result<Vec<u8>, Error> {
		debug_assert!(!points.is_empty());
		for (i, (x, value)) in points.iter().enumerate() {
			if points[..i].iter().any(|(ox, _)| ox == x) {
				return Err(ErrorKind::DuplicateIndex("share", *x))?;
			}
			if value.len() != points[0].1.len() {
				return Err(ErrorKind::MixedShareSet(
					"all share values must have the same length".to_owned(),
				))?;
			}
		}
		if points.len() != threshold as usize {
			return Err(ErrorKind::WrongMemberCount(threshold, points.len()))?;
		}

		if threshold == 1 {
			return Ok(points[0].1.clone());
		}

		let secret = lagrange::interpolate(points, self.config.secret_index);
		self.check_digest(points, &secret)?;
		Ok(secret)
	}

	fn create_digest(&self, random_data: &[u8], secret: &[u8]) -> Vec<u8> {
		let mut mac =
			HmacSha256::new_from_slice(random_data).expect("HMAC accepts keys of any length");
		mac.update(secret);
		let code = mac.finalize().into_bytes();
		code[..self.config.digest_length_bytes as usize].to_vec()
	}

	fn check_digest(&self, points: &[SharePoint], secret: &[u8]) -> Result<(), Error> {
		let digest_value = lagrange::interpolate(points, self.config.digest_index);
		let (digest, random_part) =
			digest_value.split_at(self.config.digest_length_bytes as usize);
		let expected = self.create_digest(random_part, secret);
		// accumulate over every byte rather than bailing at the first
		// difference
		let diff = digest
			.iter()
			.zip(expected.iter())
			.fold(0u8, |acc, (a, b)| acc | (a ^ b));
		if diff != 0 {
			return Err(ErrorKind::DigestMismatch)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	// split, then check that every leading threshold-sized subset (and a
	// couple of offset ones) recovers the secret
	fn split_recover_impl(
		rng: &mut StdRng,
		secret_length_bytes: usize,
		threshold: u8,
		share_count: u8,
	) -> Result<(), Error> {
		let sp = Splitter::new(None);
		let secret = util::fill_vec_rand(rng, secret_length_bytes);
		let shares = sp.split_secret(rng, threshold, share_count, &secret)?;
		assert_eq!(shares.len(), share_count as usize);

		for offset in 0..=(share_count - threshold) as usize {
			let subset = &shares[offset..offset + threshold as usize];
			assert_eq!(sp.recover_secret(subset, threshold)?, secret);
		}
		Ok(())
	}

	#[test]
	fn split_recover() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(0);
		let config = SchemeConfig::new();
		for sc in 1..=config.max_share_count {
			for t in 1..=sc {
				split_recover_impl(&mut rng, 16, t, sc)?;
			}
		}
		for sl in (16..32).step_by(2) {
			split_recover_impl(&mut rng, sl, 3, 5)?;
			split_recover_impl(&mut rng, sl, 2, 3)?;
		}
		split_recover_impl(&mut rng, 32, 16, 16)?;
		Ok(())
	}

	#[test]
	fn invalid_split_inputs() {
		let mut rng = StdRng::seed_from_u64(1);
		let sp = Splitter::new(None);
		let secret = util::fill_vec_rand(&mut rng, 16);
		// threshold and count limits
		assert!(sp.split_secret(&mut rng, 0, 5, &secret).is_err());
		assert!(sp.split_secret(&mut rng, 5, 3, &secret).is_err());
		assert!(sp.split_secret(&mut rng, 17, 17, &secret).is_err());
		// secret length limits
		let short = util::fill_vec_rand(&mut rng, 14);
		let odd = util::fill_vec_rand(&mut rng, 17);
		assert_eq!(
			sp.split_secret(&mut rng, 3, 5, &short).unwrap_err().kind(),
			ErrorKind::InvalidSeedLength(14)
		);
		assert_eq!(
			sp.split_secret(&mut rng, 3, 5, &odd).unwrap_err().kind(),
			ErrorKind::InvalidSeedLength(17)
		);
	}

	#[test]
	fn recovery_validation() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(2);
		let sp = Splitter::new(None);
		let secret = util::fill_vec_rand(&mut rng, 16);
		let shares = sp.split_secret(&mut rng, 3, 5, &secret)?;

		// too few shares for the threshold
		assert_eq!(
			sp.recover_secret(&shares[..2], 3).unwrap_err().kind(),
			ErrorKind::WrongMemberCount(3, 2)
		);

		// duplicated x coordinate
		let dup = vec![shares[0].clone(), shares[0].clone(), shares[1].clone()];
		assert_eq!(
			sp.recover_secret(&dup, 3).unwrap_err().kind(),
			ErrorKind::DuplicateIndex("share", shares[0].0)
		);

		// tampered share value
		let mut tampered = shares[..3].to_vec();
		tampered[1].1[0] ^= 0xff;
		assert_eq!(
			sp.recover_secret(&tampered, 3).unwrap_err().kind(),
			ErrorKind::DigestMismatch
		);

		// mismatched value lengths
		let mut mixed = shares[..3].to_vec();
		mixed[2].1.push(0);
		assert!(matches!(
			sp.recover_secret(&mixed, 3).unwrap_err().kind(),
			ErrorKind::MixedShareSet(_)
		));
		Ok(())
	}

	#[test]
	fn threshold_of_one_copies() -> Result<(), Error> {
		let mut rng = StdRng::seed_from_u64(3);
		let sp = Splitter::new(None);
		let secret = util::fill_vec_rand(&mut rng, 16);
		let shares = sp.split_secret(&mut rng, 1, 4, &secret)?;
		for (i, (x, value)) in shares.iter().enumerate() {
			assert_eq!(*x, i as u8);
			assert_eq!(*value, secret);
		}
		assert_eq!(sp.recover_secret(&shares[2..3], 1)?, secret);
		Ok(())
	}
}
