// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options.
//!
//! Optional values are never rejected. A missing value, a zero, or a `NaN`
//! is replaced by the documented default, so a caller forwarding loosely
//! typed options (e.g. from JavaScript) always gets a usable engine.

use alloc::string::String;

/// Default damping factor. Stored on the engine and reserved for speed
/// scaling; no formula reads it yet.
pub const DEFAULT_DAMPING: f64 = 40.0;

/// Options for constructing a [`Parallax`](crate::parallax::Parallax) and
/// its surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallaxConfig {
    /// Style class applied verbatim to the drawable surface.
    pub class_name: Option<String>,
    /// Damping override. Defaults to [`DEFAULT_DAMPING`].
    pub damping: Option<f64>,
}

impl ParallaxConfig {
    /// Creates a config with every option unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style class.
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the damping factor.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    /// Applies defaults to every unset or falsy option.
    #[must_use]
    pub fn normalized(&self) -> ResolvedConfig {
        ResolvedConfig {
            class_name: self.class_name.clone().filter(|name| !name.is_empty()),
            damping: or_default(self.damping, DEFAULT_DAMPING),
        }
    }
}

/// A [`ParallaxConfig`] with defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Style class, or `None` when no class should be set.
    pub class_name: Option<String>,
    /// Damping factor.
    pub damping: f64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ParallaxConfig::default().normalized()
    }
}

/// Returns `value` unless it is absent, zero, or `NaN`.
pub(crate) fn or_default(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = ParallaxConfig::new().normalized();
        assert_eq!(resolved.class_name, None);
        assert_eq!(resolved.damping, DEFAULT_DAMPING);
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn falsy_values_fall_back() {
        let resolved = ParallaxConfig::new()
            .with_class_name("")
            .with_damping(0.0)
            .normalized();
        assert_eq!(resolved.class_name, None, "empty class is treated as unset");
        assert_eq!(resolved.damping, DEFAULT_DAMPING, "zero damping is falsy");

        let nan = ParallaxConfig::new().with_damping(f64::NAN).normalized();
        assert_eq!(nan.damping, DEFAULT_DAMPING, "NaN damping is falsy");
    }

    #[test]
    fn explicit_values_are_kept_verbatim() {
        let resolved = ParallaxConfig::new()
            .with_class_name("clouds bg-layer")
            .with_damping(-12.5)
            .normalized();
        assert_eq!(resolved.class_name.as_deref(), Some("clouds bg-layer"));
        assert_eq!(resolved.damping, -12.5, "negative values are not validated");
    }
}
