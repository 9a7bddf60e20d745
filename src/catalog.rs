//! Template catalog handling for appforge.
//! This module provides functionality for loading and validating the
//! declarative manifest that describes every available starter template.

use crate::constants::CATALOG_FILES;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The resolved value of a single customization, matching its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomizationValue {
    /// Single choice from a `select`
    Choice(String),
    /// Subset of choices from a `multiselect`
    Choices(Vec<String>),
    /// A `boolean` toggle
    Flag(bool),
}

impl CustomizationValue {
    /// Whether this value selects the given option: membership for
    /// multi-choice values, equality for single choices, truthiness for
    /// toggles.
    pub fn selects(&self, option: &str) -> bool {
        match self {
            CustomizationValue::Choice(choice) => choice == option,
            CustomizationValue::Choices(choices) => choices.iter().any(|c| c == option),
            CustomizationValue::Flag(flag) => *flag,
        }
    }

    /// Whether this value enables its feature at all
    pub fn is_enabled(&self) -> bool {
        match self {
            CustomizationValue::Choice(_) => true,
            CustomizationValue::Choices(choices) => !choices.is_empty(),
            CustomizationValue::Flag(flag) => *flag,
        }
    }
}

/// A user-selectable option declared by a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CustomizationSpec {
    Select {
        label: String,
        options: Vec<String>,
        default: String,
    },
    Multiselect {
        label: String,
        options: Vec<String>,
        default: Vec<String>,
    },
    Boolean {
        label: String,
        default: bool,
    },
}

impl CustomizationSpec {
    /// Prompt text shown for this option
    pub fn label(&self) -> &str {
        match self {
            CustomizationSpec::Select { label, .. }
            | CustomizationSpec::Multiselect { label, .. }
            | CustomizationSpec::Boolean { label, .. } => label,
        }
    }

    /// The catalog default, as a resolved value
    pub fn default_value(&self) -> CustomizationValue {
        match self {
            CustomizationSpec::Select { default, .. } => {
                CustomizationValue::Choice(default.clone())
            }
            CustomizationSpec::Multiselect { default, .. } => {
                CustomizationValue::Choices(default.clone())
            }
            CustomizationSpec::Boolean { default, .. } => CustomizationValue::Flag(*default),
        }
    }

    /// Checks the default-is-a-member-of-options invariant.
    fn validate(&self, template_id: &str, key: &str) -> Result<()> {
        match self {
            CustomizationSpec::Select { options, default, .. } => {
                if !options.contains(default) {
                    return Err(Error::Catalog(format!(
                        "template '{template_id}', option '{key}': default '{default}' is not one of the declared options"
                    )));
                }
            }
            CustomizationSpec::Multiselect { options, default, .. } => {
                if let Some(bad) = default.iter().find(|d| !options.contains(*d)) {
                    return Err(Error::Catalog(format!(
                        "template '{template_id}', option '{key}': default '{bad}' is not one of the declared options"
                    )));
                }
            }
            CustomizationSpec::Boolean { .. } => {}
        }
        Ok(())
    }
}

/// One environment variable declared by a template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSpec {
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    /// Customization reference gating this variable, either a bare boolean
    /// key (`includeStripe`) or `key:option` for multi-choice membership
    /// (`authProviders:github`). Absent means the legacy substring fallback
    /// applies.
    #[serde(default)]
    pub feature: Option<String>,
}

/// A single catalog entry describing one starter template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub complexity: u8,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub customizations: IndexMap<String, CustomizationSpec>,
    #[serde(default)]
    pub env_vars: Vec<EnvVarSpec>,
}

/// Catalog-wide defaults applied when a template or the user supplies nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDefaults {
    #[serde(default)]
    pub author: String,
}

/// The authoritative, immutable list of available templates.
///
/// Loaded once per run and passed explicitly to every component that needs
/// it; nothing in the crate holds it as ambient state.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub templates: IndexMap<String, TemplateDefinition>,
    #[serde(default)]
    pub defaults: CatalogDefaults,
}

impl Catalog {
    /// Loads the catalog manifest from a templates root, trying multiple
    /// file formats.
    ///
    /// # Errors
    /// * `Error::Catalog` if no manifest file exists or parsing fails
    pub fn load<P: AsRef<Path>>(templates_dir: P) -> Result<Self> {
        let templates_dir = templates_dir.as_ref();
        for file in CATALOG_FILES {
            let path = templates_dir.join(file);
            if path.exists() {
                debug!("loading catalog from {}", path.display());
                let content = fs::read_to_string(&path)?;
                return Self::parse(&content);
            }
        }

        Err(Error::Catalog(format!(
            "no catalog manifest found in '{}' (tried: {})",
            templates_dir.display(),
            CATALOG_FILES.join(", ")
        )))
    }

    /// Parses catalog content, trying JSON first and YAML second.
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: Catalog = match serde_json::from_str(content) {
            Ok(catalog) => catalog,
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::Catalog(format!("invalid catalog format: {e}")))?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.templates.is_empty() {
            return Err(Error::Catalog("catalog declares no templates".to_string()));
        }
        for (id, template) in &self.templates {
            for (key, spec) in &template.customizations {
                spec.validate(id, key)?;
            }
        }
        Ok(())
    }

    /// Looks up a template by its canonical id.
    pub fn get(&self, id: &str) -> Option<&TemplateDefinition> {
        self.templates.get(id)
    }
}
