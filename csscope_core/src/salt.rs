//! Salt generation for scoped class names.
//!
//! Salts are short base-36 strings (`[0-9a-z]`). The randomness comes from a
//! [`TokenSource`] so callers can swap the thread-local generator for a
//! seeded one, or for a fixed [`SequenceTokenSource`] in tests.

use std::fmt;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::ThreadRng;

/// Number of usable base-36 digits taken from a single draw.
pub const DIGITS_PER_DRAW: usize = 16;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A source of pseudo-random base-36 digit blocks.
pub trait TokenSource {
	/// Draw the next block of digits. Blocks are expected to hold at least
	/// [`DIGITS_PER_DRAW`] characters, shorter blocks are topped up by further
	/// draws.
	fn draw(&mut self) -> String;
}

/// A [`TokenSource`] backed by a `rand` generator.
pub struct RngTokenSource<R> {
	rng: R,
}

impl RngTokenSource<ThreadRng> {
	/// Use the thread-local generator. Salts differ on every run.
	pub fn new() -> Self {
		Self { rng: rand::rng() }
	}
}

impl Default for RngTokenSource<ThreadRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl RngTokenSource<StdRng> {
	/// Use a generator seeded with `seed`, so the same input always produces
	/// the same salts.
	pub fn seeded(seed: u64) -> Self {
		Self {
			rng: StdRng::seed_from_u64(seed),
		}
	}
}

impl<R> fmt::Debug for RngTokenSource<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RngTokenSource").finish_non_exhaustive()
	}
}

impl<R: Rng> TokenSource for RngTokenSource<R> {
	fn draw(&mut self) -> String {
		// 36^16 < 2^83, so a u128 always has at least 16 base-36 digits of
		// entropy to give.
		let mut value: u128 = self.rng.random();
		let mut digits = String::with_capacity(DIGITS_PER_DRAW);
		for _ in 0..DIGITS_PER_DRAW {
			digits.push(char::from(ALPHABET[(value % 36) as usize]));
			value /= 36;
		}
		digits
	}
}

/// A [`TokenSource`] that replays a fixed list of blocks, cycling back to the
/// start once the list is exhausted.
#[derive(Debug, Clone, Default)]
pub struct SequenceTokenSource {
	tokens: Vec<String>,
	cursor: usize,
}

impl SequenceTokenSource {
	pub fn new<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			tokens: tokens.into_iter().map(Into::into).collect(),
			cursor: 0,
		}
	}
}

impl TokenSource for SequenceTokenSource {
	fn draw(&mut self) -> String {
		if self.tokens.is_empty() {
			return String::new();
		}

		let token = self.tokens[self.cursor % self.tokens.len()].clone();
		self.cursor += 1;
		token
	}
}

/// Build a salt of exactly `length` base-36 characters.
///
/// Up to 16 digits fit in one draw. Longer salts concatenate
/// `ceil(length / 16)` draws and truncate the result. Characters outside
/// `[0-9a-z]` are dropped from a draw, and a source that stops producing
/// digits has the remainder padded with `0`.
pub fn generate_token<S: TokenSource + ?Sized>(source: &mut S, length: usize) -> String {
	let mut token = String::with_capacity(length);

	while token.len() < length {
		let block = source.draw();
		let before = token.len();
		token.extend(
			block
				.chars()
				.map(|c| c.to_ascii_lowercase())
				.filter(char::is_ascii_alphanumeric)
				.take(DIGITS_PER_DRAW),
		);

		if token.len() == before {
			break;
		}
	}

	token.truncate(length);
	while token.len() < length {
		token.push('0');
	}

	token
}

/// Pick the token source for a run: seeded when `seed` is set, thread-local
/// otherwise.
pub fn token_source(seed: Option<u64>) -> Box<dyn TokenSource> {
	match seed {
		Some(seed) => Box::new(RngTokenSource::seeded(seed)),
		None => Box::new(RngTokenSource::new()),
	}
}
