// Couleurs – A colour-naming game for young children
// Copyright (C) 2023  The Couleurs authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

pub trait RandomSource {
    /// Returns a uniformly distributed number in the range [0, max).
    /// `max` must be greater than zero.
    fn random_range(&mut self, max: usize) -> usize;
}

/// Random source backed by the platform: `Math.random()` in the
/// browser and the thread RNG from `rand` elsewhere.
#[derive(Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn random_range(&mut self, max: usize) -> usize {
        random_range(max)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn random_range(max: usize) -> usize {
    // Math.random() is in [0, 1) so the floor is always below max,
    // but clamp anyway in case of rounding at the top of the range
    ((js_sys::Math::random() * max as f64) as usize).min(max - 1)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn random_range(max: usize) -> usize {
    use rand::Rng;

    rand::thread_rng().gen_range(0..max)
}

/// Fisher–Yates shuffle. Walks from the last element down to the
/// second, swapping each with a uniformly chosen element at or before
/// it.
pub fn shuffle<T>(random: &mut dyn RandomSource, values: &mut [T]) {
    for i in (1..values.len()).rev() {
        let j = random.random_range(i + 1);
        values.swap(i, j);
    }
}

#[cfg(test)]
pub mod test_source {
    use super::RandomSource;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    pub struct SeededRandom {
        rng: StdRng,
    }

    impl SeededRandom {
        pub fn new(seed: u64) -> SeededRandom {
            SeededRandom { rng: StdRng::seed_from_u64(seed) }
        }
    }

    impl RandomSource for SeededRandom {
        fn random_range(&mut self, max: usize) -> usize {
            self.rng.gen_range(0..max)
        }
    }

    /// Replays a fixed list of picks, each reduced modulo the requested
    /// range. Once the list runs out it keeps returning zero.
    pub struct ScriptedRandom {
        picks: std::vec::IntoIter<usize>,
    }

    impl ScriptedRandom {
        pub fn new(picks: &[usize]) -> ScriptedRandom {
            ScriptedRandom { picks: picks.to_vec().into_iter() }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn random_range(&mut self, max: usize) -> usize {
            self.picks.next().unwrap_or(0) % max
        }
    }
}
