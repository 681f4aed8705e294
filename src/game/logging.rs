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

use log::LevelFilter;

/// Installs the logging backend. Natively `RUST_LOG` overrides
/// `level`. Calling this more than once keeps the first backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    // The subscriber also picks up the log crate macros
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        log::debug!("logger already installed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    let Some(level) = level.to_level()
    else {
        log::set_max_level(LevelFilter::Off);
        return;
    };

    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already installed");
    }
}
