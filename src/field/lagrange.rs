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

//! Lagrange interpolation over GF(256) in the log domain. Basis factors
//! are accumulated as signed sums of discrete logs and reduced mod 255 at
//! use, which avoids a field division per byte position.

use crate::field::gf256::{mod255, TABLES};

/// Evaluates at `x` the polynomials defined by `points`, treating each byte
/// position of the point values as an independent polynomial. The x
/// coordinates must be pairwise distinct and the values of equal length.
pub fn interpolate(points: &[(u8, Vec<u8>)], x: u8) -> Vec<u8> {
	debug_assert!(!points.is_empty());

	// the polynomial passes through the given points
	if let Some((_, value)) = points.iter().find(|(px, _)| *px == x) {
		return value.clone();
	}

	let t = &*TABLES;
	let log_prod: i32 = points
		.iter()
		.map(|(px, _)| i32::from(t.log[(px ^ x) as usize]))
		.sum();

	let mut result = vec![0u8; points[0].1.len()];
	for (px, value) in points {
		let log_others: i32 = points
			.iter()
			.filter(|(ox, _)| ox != px)
			.map(|(ox, _)| i32::from(t.log[(px ^ ox) as usize]))
			.sum();
		let log_basis = log_prod - i32::from(t.log[(px ^ x) as usize]) - log_others;

		for (r, y) in result.iter_mut().zip(value.iter()) {
			if *y != 0 {
				*r ^= t.exp[mod255(log_basis + i32::from(t.log[*y as usize]))];
			}
		}
	}
	result
}
