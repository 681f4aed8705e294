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

use serde::Deserialize;

pub const N_LANGUAGES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
}

impl Language {
    pub fn index(self) -> usize {
        match self {
            Language::Fr => 0,
            Language::En => 1,
        }
    }

    /// BCP 47 tag handed to the speech synthesiser
    pub fn speech_tag(self) -> &'static str {
        match self {
            Language::Fr => "fr-FR",
            Language::En => "en-US",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "fr" => Some(Language::Fr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn other(self) -> Language {
        match self {
            Language::Fr => Language::En,
            Language::En => Language::Fr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[serde(alias = "debutant")]
    Beginner,
    #[serde(alias = "intermediaire")]
    Intermediate,
    #[serde(alias = "avance")]
    Advanced,
}

pub static LEVELS: [Level; 3] = [
    Level::Beginner,
    Level::Intermediate,
    Level::Advanced,
];

impl Level {
    /// Number of swatches offered in each round of this level
    pub fn max_options(self) -> usize {
        match self {
            Level::Beginner => 4,
            Level::Intermediate => 6,
            Level::Advanced => 8,
        }
    }

    /// All of the colours playable at this level. Each level contains
    /// every colour of the levels below it.
    pub fn colors(self) -> &'static [ColorEntry] {
        let n_colors = match self {
            Level::Beginner => N_BEGINNER_COLORS,
            Level::Intermediate => N_INTERMEDIATE_COLORS,
            Level::Advanced => COLORS.len(),
        };

        &COLORS[0..n_colors]
    }

    pub fn from_name(name: &str) -> Option<Level> {
        match name {
            "debutant" | "beginner" => Some(Level::Beginner),
            "intermediaire" | "intermediate" => Some(Level::Intermediate),
            "avance" | "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }

    /// Value used for the level in the page’s select element
    pub fn name(self) -> &'static str {
        match self {
            Level::Beginner => "debutant",
            Level::Intermediate => "intermediaire",
            Level::Advanced => "avance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub names: [&'static str; N_LANGUAGES],
    pub hex: u32,
}

impl ColorEntry {
    pub fn name(&self, language: Language) -> &'static str {
        self.names[language.index()]
    }
}

const N_BEGINNER_COLORS: usize = 4;
const N_INTERMEDIATE_COLORS: usize = N_BEGINNER_COLORS + 4;

// Ordered so that each level is a prefix of the table
pub static COLORS: [ColorEntry; 12] = [
    // Beginner: primary colours
    ColorEntry { names: ["ROUGE", "RED"], hex: 0xe74c3c },
    ColorEntry { names: ["BLEU", "BLUE"], hex: 0x3498db },
    ColorEntry { names: ["VERT", "GREEN"], hex: 0x2ecc71 },
    ColorEntry { names: ["JAUNE", "YELLOW"], hex: 0xf1c40f },
    // Intermediate: secondary colours
    ColorEntry { names: ["ORANGE", "ORANGE"], hex: 0xe67e22 },
    ColorEntry { names: ["VIOLET", "PURPLE"], hex: 0x9b59b6 },
    ColorEntry { names: ["ROSE", "PINK"], hex: 0xffc0cb },
    ColorEntry { names: ["MARRON", "BROWN"], hex: 0x8b4513 },
    // Advanced: shades
    ColorEntry { names: ["GRIS", "GRAY"], hex: 0x7f8c8d },
    ColorEntry { names: ["NOIR", "BLACK"], hex: 0x000000 },
    ColorEntry { names: ["BLANC", "WHITE"], hex: 0xecf0f1 },
    ColorEntry { names: ["CYAN", "CYAN"], hex: 0x00ffff },
];
