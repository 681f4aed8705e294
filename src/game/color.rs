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

use color_space::{FromRgb, Lab, Rgb};

// Colours with an L* above this are hard to read on the light page
// background so text drawn in them gets an outline
const LIGHT_THRESHOLD: f64 = 85.0;

pub fn css_color(hex: u32) -> String {
    format!("#{:06X}", hex & 0xffffff)
}

/// Parses a colour in the `#RRGGBB` form written by `css_color`
pub fn parse_css_color(s: &str) -> Option<u32> {
    let digits = s.strip_prefix('#')?;

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(digits, 16).ok()
}

pub fn rgb_components(hex: u32) -> (u8, u8, u8) {
    ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub fn lightness(hex: u32) -> f64 {
    Lab::from_rgb(&Rgb::from_hex(hex & 0xffffff)).l
}

pub fn is_light(hex: u32) -> bool {
    lightness(hex) > LIGHT_THRESHOLD
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::catalog::COLORS;

    #[test]
    fn css() {
        assert_eq!(css_color(0xe74c3c), "#E74C3C");
        assert_eq!(css_color(0x000000), "#000000");
        assert_eq!(parse_css_color("#E74C3C"), Some(0xe74c3c));
        assert_eq!(parse_css_color("#00ffff"), Some(0x00ffff));
        assert_eq!(parse_css_color("E74C3C"), None);
        assert_eq!(parse_css_color("#E74C3"), None);
        assert_eq!(parse_css_color("#+74C3C"), None);

        for color in COLORS.iter() {
            assert_eq!(parse_css_color(&css_color(color.hex)), Some(color.hex));
        }
    }

    #[test]
    fn components() {
        assert_eq!(rgb_components(0x3498db), (0x34, 0x98, 0xdb));
    }

    #[test]
    fn light_colors() {
        assert!(is_light(0xecf0f1));
        assert!(is_light(0xffffff));
        assert!(!is_light(0x000000));
        assert!(!is_light(0x3498db));
        assert!(!is_light(0xe74c3c));
    }
}
