// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{DEFAULT_CURRENCY, get_setting, set_setting};
use anyhow::{Result, bail};
use rusqlite::Connection;

const KNOWN_KEYS: &[(&str, &str)] = &[("currency", DEFAULT_CURRENCY)];

fn default_for(key: &str) -> Result<&'static str> {
    match KNOWN_KEYS.iter().find(|(k, _)| *k == key) {
        Some((_, default)) => Ok(*default),
        None => bail!(
            "Unknown setting '{}' (known: {})",
            key,
            KNOWN_KEYS
                .iter()
                .map(|(k, _)| *k)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let default = default_for(key)?;
            let value = get_setting(conn, key)?.unwrap_or_else(|| default.to_string());
            println!("{} = {}", key, value);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            default_for(key)?;
            let value = sub.get_one::<String>("value").unwrap().trim().to_uppercase();
            if value.is_empty() {
                bail!("Value for '{}' must not be empty", key);
            }
            set_setting(conn, key, &value)?;
            tracing::info!(key = %key, value = %value, "setting changed");
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
