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

#[derive(Eq, PartialEq, PartialOrd, Ord, Debug, Clone, Copy)]
pub enum Timeout {
    Milliseconds(i64),
    Forever,
}

pub const IMMEDIATELY: Timeout = Timeout::Milliseconds(0);

impl Timeout {
    /// Milliseconds clamped to fit the argument of the browser’s
    /// setTimeout or SDL’s event wait, or None for Forever.
    pub fn as_millis_u32(self) -> Option<u32> {
        match self {
            Timeout::Milliseconds(ms) => {
                Some(ms.clamp(0, i32::MAX as i64) as u32)
            },
            Timeout::Forever => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order() {
        assert!(Timeout::Forever > Timeout::Milliseconds(12));
        assert!(Timeout::Milliseconds(11) > Timeout::Milliseconds(10));

        assert_eq!(
            Timeout::Forever.min(Timeout::Milliseconds(12)),
            Timeout::Milliseconds(12),
        );
    }

    #[test]
    fn millis() {
        assert_eq!(IMMEDIATELY.as_millis_u32(), Some(0));
        assert_eq!(Timeout::Milliseconds(-3).as_millis_u32(), Some(0));
        assert_eq!(Timeout::Milliseconds(1500).as_millis_u32(), Some(1500));
        assert_eq!(
            Timeout::Milliseconds(i64::MAX).as_millis_u32(),
            Some(i32::MAX as u32),
        );
        assert_eq!(Timeout::Forever.as_millis_u32(), None);
    }
}
