// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-site options from the environment.
//!
//! | Variable                 | Option             | Format          |
//! |--------------------------|--------------------|-----------------|
//! | `HOOKWISE_CALLER_KEY`    | `field_key`        | string          |
//! | `HOOKWISE_APP_ROOT`      | `app_root_prefix`  | string          |
//! | `HOOKWISE_SKIP_PACKAGES` | `packages_to_skip` | comma separated |
//! | `HOOKWISE_SKIP_DEPTH`    | `skip_depth_start` | integer         |
//!
//! Unset variables leave gaps, which [`CallSiteHook`](crate::CallSiteHook) fills with the
//! defaults.  A value that cannot be used is logged and also treated as a gap.

use crate::callsite::CallSiteOptions;
use crate::error::ConfigError;

const CALLER_KEY: &str = "HOOKWISE_CALLER_KEY";
const APP_ROOT: &str = "HOOKWISE_APP_ROOT";
const SKIP_PACKAGES: &str = "HOOKWISE_SKIP_PACKAGES";
const SKIP_DEPTH: &str = "HOOKWISE_SKIP_DEPTH";

impl CallSiteOptions {
    /// Reads options from `HOOKWISE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(key) = lookup(CALLER_KEY) {
            options.field_key = key.trim().to_string();
        }
        if let Some(prefix) = lookup(APP_ROOT) {
            options.app_root_prefix = prefix.trim().to_string();
        }
        if let Some(packages) = lookup(SKIP_PACKAGES) {
            options.packages_to_skip = packages
                .split(',')
                .map(str::trim)
                .filter(|package| !package.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(depth) = lookup(SKIP_DEPTH) {
            match parse_depth(&depth) {
                Ok(depth) => options.skip_depth_start = depth,
                Err(err) => tracing::warn!(error = %err, "ignoring environment value"),
            }
        }
        options
    }
}

fn parse_depth(value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidDepth {
            name: SKIP_DEPTH,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_is_all_gaps() {
        assert_eq!(CallSiteOptions::from_lookup(lookup(&[])), CallSiteOptions::new());
    }

    #[test]
    fn reads_every_variable() {
        let options = CallSiteOptions::from_lookup(lookup(&[
            ("HOOKWISE_CALLER_KEY", "origin"),
            ("HOOKWISE_APP_ROOT", "/srv/app"),
            ("HOOKWISE_SKIP_PACKAGES", " vendor/log , ,wrappers/ "),
            ("HOOKWISE_SKIP_DEPTH", "3"),
        ]));
        assert_eq!(
            options,
            CallSiteOptions::new()
                .with_field_key("origin")
                .with_app_root_prefix("/srv/app")
                .skip_package("vendor/log")
                .skip_package("wrappers/")
                .with_skip_depth_start(3)
        );
    }

    #[test]
    fn bad_depth_is_a_gap() {
        let options = CallSiteOptions::from_lookup(lookup(&[("HOOKWISE_SKIP_DEPTH", "-2")]));
        assert_eq!(options.skip_depth_start, 0);
        assert_eq!(
            parse_depth("seven"),
            Err(ConfigError::InvalidDepth {
                name: SKIP_DEPTH,
                value: "seven".to_string()
            })
        );
    }
}
