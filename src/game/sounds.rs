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

use super::config::SoundConfig;

#[derive(PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Sound {
    Success,
    Failure,
}

pub const N_SOUNDS: usize = 2;

pub static SOUNDS: [Sound; N_SOUNDS] = [Sound::Success, Sound::Failure];

// IDs of the audio elements in the page
static ELEMENT_IDS: [&str; N_SOUNDS] = [
    "son-succes",
    "son-echec",
];

impl Sound {
    pub fn for_answer(correct: bool) -> Sound {
        if correct {
            Sound::Success
        } else {
            Sound::Failure
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element_id(self) -> &'static str {
        ELEMENT_IDS[self.index()]
    }

    pub fn filename(self, config: &SoundConfig) -> &str {
        match self {
            Sound::Success => &config.success,
            Sound::Failure => &config.failure,
        }
    }
}
