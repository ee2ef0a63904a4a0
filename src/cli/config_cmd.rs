// Copyright 2024-2026 tasklog Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults.

use crate::config::{self, EffectiveConfig, EnvConfig};

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    print_config(&config::load().effective_config());
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    print_config(&EnvConfig::default().effective_config());
}

/// Render config as `KEY=value` lines.
pub fn render_config(cfg: &EffectiveConfig) -> String {
    cfg.entries
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

fn print_config(cfg: &EffectiveConfig) {
    print!("{}", render_config(cfg));
}
