// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod config;
pub mod doctor;
pub mod exporter;
pub mod reports;
pub mod transactions;

use crate::models::Period;
use crate::utils::{now_local, parse_datetime};
use anyhow::Result;
use chrono::NaiveDateTime;

/// Reads `--period` and `--as-of`; the reference instant defaults to now.
pub fn period_selection(sub: &clap::ArgMatches) -> Result<(Period, NaiveDateTime)> {
    let period = match sub.get_one::<String>("period") {
        Some(p) => p.parse::<Period>()?,
        None => Period::default(),
    };
    let reference = match sub.get_one::<String>("as_of") {
        Some(s) => parse_datetime(s)?,
        None => now_local(),
    };
    Ok((period, reference))
}
