// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt::Display;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Noisy detail
    Verbose,
    /// Print-style debugging
    Debug,
    Info,
    /// Suspicious condition
    Warn,
    /// Runtime error
    Error,
    /// A condition that should never happen
    Assert,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Level::Verbose => "V",
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warn => "W",
            Level::Error => "E",
            Level::Assert => "A",
        };
        f.write_str(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::Level;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn letters() {
        let letters: String = [
            Level::Verbose,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Assert,
        ]
        .iter()
        .map(|level| level.to_string())
        .collect();
        assert_eq!(letters, "VDIWEA");
    }
}
