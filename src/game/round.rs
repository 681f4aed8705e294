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

use std::fmt;
use super::catalog::{ColorEntry, Level};
use super::random::{self, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    EmptyCatalog,
    NoOptions,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoundError::EmptyCatalog => write!(f, "No colours to choose from"),
            RoundError::NoOptions => write!(f, "A round needs at least one option"),
        }
    }
}

impl std::error::Error for RoundError {}

/// A colour to find along with the swatches to find it among
#[derive(Debug, Clone)]
pub struct Round<'a> {
    target: &'a ColorEntry,
    options: Vec<&'a ColorEntry>,
}

impl Round<'static> {
    pub fn generate(
        level: Level,
        exclude: Option<&ColorEntry>,
        random: &mut dyn RandomSource,
    ) -> Round<'static> {
        // The catalog never has an empty level so this can’t fail
        match Round::generate_from(
            level.colors(),
            level.max_options(),
            exclude,
            random,
        ) {
            Ok(round) => round,
            Err(e) => unreachable!("bad catalog for {:?}: {}", level, e),
        }
    }
}

/// Picks a single colour from the level, avoiding `exclude`
pub fn pick_level_color(
    level: Level,
    exclude: Option<&ColorEntry>,
    random: &mut dyn RandomSource,
) -> &'static ColorEntry {
    match pick_target(level.colors(), exclude, random) {
        Ok(color) => color,
        Err(e) => unreachable!("bad catalog for {:?}: {}", level, e),
    }
}

impl<'a> Round<'a> {
    pub fn generate_from(
        colors: &'a [ColorEntry],
        max_options: usize,
        exclude: Option<&ColorEntry>,
        random: &mut dyn RandomSource,
    ) -> Result<Round<'a>, RoundError> {
        if max_options == 0 {
            return Err(RoundError::NoOptions);
        }

        let target = pick_target(colors, exclude, random)?;

        let mut distractors = Vec::<&ColorEntry>::with_capacity(colors.len());

        // Entries sharing a hex value would look like the same swatch
        for color in colors.iter() {
            if color.hex != target.hex
                && distractors.iter().all(|other| other.hex != color.hex)
            {
                distractors.push(color);
            }
        }

        random::shuffle(random, &mut distractors);

        distractors.truncate(max_options - 1);

        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(target);
        options.extend(distractors);

        // Shuffle again so that the target isn’t always first
        random::shuffle(random, &mut options);

        Ok(Round { target, options })
    }

    pub fn target(&self) -> &'a ColorEntry {
        self.target
    }

    pub fn options(&self) -> &[&'a ColorEntry] {
        &self.options
    }

    pub fn is_target(&self, hex: u32) -> bool {
        self.target.hex == hex
    }
}

/// Picks a colour uniformly at random. If `exclude` is given, the
/// result will have a different hex value unless every colour has the
/// excluded value.
pub fn pick_target<'a>(
    colors: &'a [ColorEntry],
    exclude: Option<&ColorEntry>,
    random: &mut dyn RandomSource,
) -> Result<&'a ColorEntry, RoundError> {
    if colors.is_empty() {
        return Err(RoundError::EmptyCatalog);
    }

    let exclude = exclude.filter(|exclude| {
        colors.iter().any(|color| color.hex != exclude.hex)
    });

    loop {
        let color = &colors[random.random_range(colors.len())];

        match exclude {
            Some(exclude) if exclude.hex == color.hex => continue,
            _ => break Ok(color),
        }
    }
}
