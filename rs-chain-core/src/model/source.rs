use rand::Rng;

/// Source of uniformly distributed indices used by the generator.
///
/// The generator only ever needs "pick one of `bound` entries", so the
/// randomness it depends on is reduced to this single call. Production
/// code wraps a `rand` generator in [`RngSource`]; tests can script the
/// exact sequence of picks.
pub trait IndexSource {
	/// Returns an index in `0..bound`.
	///
	/// Callers never pass `bound == 0`.
	fn next_index(&mut self, bound: usize) -> usize;
}

/// Adapts any `rand::Rng` into an [`IndexSource`].
///
/// Seed the wrapped generator (e.g. `StdRng::seed_from_u64`) for
/// reproducible output.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
	rng: R,
}

impl<R: Rng> RngSource<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}

	/// Returns the wrapped generator.
	pub fn into_inner(self) -> R {
		self.rng
	}
}

impl<R: Rng> IndexSource for RngSource<R> {
	fn next_index(&mut self, bound: usize) -> usize {
		self.rng.random_range(0..bound)
	}
}

impl<S: IndexSource + ?Sized> IndexSource for &mut S {
	fn next_index(&mut self, bound: usize) -> usize {
		(**self).next_index(bound)
	}
}
