//! Environment file synthesis for appforge.
//! Produces `.env.example` content from a template's declared variables and
//! the user's customization choices: unselected features are commented out
//! and secret-like keys receive freshly generated values.

use crate::catalog::{CustomizationValue, EnvVarSpec};
use crate::constants::{PAYMENT_MARKER, PROVIDER_MARKERS, SECRET_MARKER};
use indexmap::IndexMap;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt::Write as _;

/// A source of generated secret values, injectable so tests can pin it.
pub trait SecretSource {
    fn generate(&self) -> String;
}

/// Secrets drawn from the operating system's CSPRNG: 32 random bytes
/// rendered as 64 lowercase hex characters.
pub struct OsRandomSecret;

impl SecretSource for OsRandomSecret {
    fn generate(&self) -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }
}

/// Renders the `.env.example` content for a generated project, one line per
/// declared variable in declaration order.
///
/// Returns `None` when the template declares no environment variables,
/// meaning no file should be written at all.
pub fn synthesize_env(
    env_vars: &[EnvVarSpec],
    customizations: &IndexMap<String, CustomizationValue>,
    secrets: &dyn SecretSource,
) -> Option<String> {
    if env_vars.is_empty() {
        return None;
    }

    let mut out = String::new();
    let date = chrono::Utc::now().format("%Y-%m-%d");
    let _ = writeln!(out, "# Generated by appforge on {date}");
    let _ = writeln!(out, "# Copy to .env and fill in real values before running the project.");
    let _ = writeln!(out);

    for spec in env_vars {
        let value = if is_generated_secret(&spec.key) {
            secrets.generate()
        } else {
            resolve_value(spec)
        };
        // Gated-off variables keep their value visible for reference.
        if is_feature_enabled(spec, customizations) {
            let _ = writeln!(out, "{}={value}", spec.key);
        } else {
            let _ = writeln!(out, "# {}={value}", spec.key);
        }
    }

    Some(out)
}

/// Value resolution order: a default wins for optional variables, required
/// ones fall back to the example placeholder, then to an empty string.
pub fn resolve_value(spec: &EnvVarSpec) -> String {
    if !spec.required {
        if let Some(default) = &spec.default {
            return default.clone();
        }
    }
    if let Some(example) = &spec.example {
        return example.clone();
    }
    spec.default.clone().unwrap_or_default()
}

/// Keys carrying the secret marker get generated values, except
/// payment-provider secrets which must come from the provider dashboard.
pub fn is_generated_secret(key: &str) -> bool {
    key.contains(SECRET_MARKER) && !key.contains(PAYMENT_MARKER)
}

/// Decides whether a variable's feature was selected.
///
/// The explicit `feature` tag wins when declared; otherwise the legacy
/// marker-substring heuristic applies for compatibility with untagged
/// catalogs. Variables with no recognizable feature stay enabled.
pub fn is_feature_enabled(
    spec: &EnvVarSpec,
    customizations: &IndexMap<String, CustomizationValue>,
) -> bool {
    if let Some(feature) = &spec.feature {
        return resolve_feature(feature, customizations);
    }

    for (marker, provider) in PROVIDER_MARKERS {
        if spec.key.contains(marker) {
            return match customizations.get("authProviders") {
                Some(value) => value.selects(provider),
                None => true,
            };
        }
    }
    if spec.key.contains(PAYMENT_MARKER) {
        return match customizations.get("includeStripe") {
            Some(value) => value.is_enabled(),
            None => true,
        };
    }
    true
}

/// Resolves a `feature` reference: a bare `key` checks the customization is
/// enabled at all, `key:option` checks that the option was selected. A
/// reference to a customization the template does not declare leaves the
/// variable enabled.
fn resolve_feature(feature: &str, customizations: &IndexMap<String, CustomizationValue>) -> bool {
    let (key, option) = match feature.split_once(':') {
        Some((key, option)) => (key, Some(option)),
        None => (feature, None),
    };
    match (customizations.get(key), option) {
        (Some(value), Some(option)) => value.selects(option),
        (Some(value), None) => value.is_enabled(),
        (None, _) => true,
    }
}
