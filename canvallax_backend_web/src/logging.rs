// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A `log` sink for the browser console.
//!
//! Records are routed to the matching `console` method so browser devtools
//! can filter them by severity.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Writes `log` records to `console.error` / `warn` / `info` / `debug` /
/// `log`.
#[derive(Debug)]
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug => console::debug_1(&message),
            Level::Trace => console::log_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Installs [`ConsoleLogger`] as the global logger with the given maximum
/// level.
///
/// With the `console_error_panic_hook` feature, also routes panics to
/// `console.error`.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Parses a level name (`"off"`, `"error"`, ... `"trace"`, any case).
/// Unknown names fall back to `Info`.
#[must_use]
pub fn parse_level(name: Option<&str>) -> LevelFilter {
    name.and_then(|name| name.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// JavaScript entry point: `initLogging("debug")`.
///
/// Calling it more than once keeps the first logger and only updates the
/// level.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    let level = parse_level(level.as_deref());
    if init(level).is_err() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("WARN")), LevelFilter::Warn);
        assert_eq!(parse_level(Some(" off ")), LevelFilter::Off);
    }

    #[test]
    fn unknown_or_missing_level_is_info() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
    }
}
