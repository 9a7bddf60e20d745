//! Resolves a complete generation plan from human input or flags.
//! Every choice is validated against the catalog; interactive prompts go
//! through the [`Prompter`](crate::prompt::Prompter) trait so the whole flow
//! can be driven by a scripted answer queue.

use crate::catalog::{Catalog, CustomizationSpec, CustomizationValue, TemplateDefinition};
use crate::cli::Args;
use crate::constants::TEMPLATE_ALIASES;
use crate::error::{Error, Result};
use crate::prompt::{parse_yes, Prompter};
use crate::report::render_template_list;
use indexmap::IndexMap;
use log::warn;
use std::path::{Path, PathBuf};

/// Project metadata stamped into the generated package manifest and readme.
#[derive(Debug, Clone)]
pub struct ProjectDetails {
    pub name: String,
    pub description: String,
    pub author: String,
}

/// The fully resolved set of choices needed to materialize one project.
/// Built once per run, consumed once, never persisted.
#[derive(Debug)]
pub struct GenerationPlan {
    pub template_id: String,
    pub project: ProjectDetails,
    pub customizations: IndexMap<String, CustomizationValue>,
    pub output_dir: PathBuf,
}

/// Resolves a template id or short alias against the catalog.
///
/// # Errors
/// * `Error::TemplateNotFound` if neither the alias map nor the catalog
///   knows the requested name
pub fn resolve_template_id(catalog: &Catalog, requested: &str) -> Result<String> {
    let canonical = TEMPLATE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == requested)
        .map(|(_, id)| *id)
        .unwrap_or(requested);

    if catalog.templates.contains_key(canonical) {
        Ok(canonical.to_string())
    } else {
        Err(Error::TemplateNotFound {
            name: requested.to_string(),
            available: available_ids(catalog),
        })
    }
}

/// Parses a 1-based selection against a list length, returning the 0-based
/// index. Out-of-range and non-numeric input both come back as None.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Some(n - 1),
        _ => None,
    }
}

/// Parses a comma-separated list of 1-based selections, dropping invalid
/// and duplicate entries.
pub fn parse_multi_selection(input: &str, count: usize) -> Vec<usize> {
    let mut picked = Vec::new();
    for part in input.split(',') {
        if let Some(index) = parse_selection(part, count) {
            if !picked.contains(&index) {
                picked.push(index);
            }
        }
    }
    picked
}

/// Resolves a complete [`GenerationPlan`] from the catalog, the parsed
/// arguments, and (in interactive mode) the prompter.
///
/// Returns `Ok(None)` when the user declines to overwrite an existing
/// output directory — a deliberate abort, not an error.
pub fn collect_plan(
    catalog: &Catalog,
    prompter: &dyn Prompter,
    args: &Args,
) -> Result<Option<GenerationPlan>> {
    let template_id = match &args.template {
        Some(requested) => resolve_template_id(catalog, requested)?,
        None if args.defaults => first_template_id(catalog)?,
        None => prompt_template_selection(catalog, prompter)?,
    };
    let template = catalog.get(&template_id).ok_or_else(|| Error::TemplateNotFound {
        name: template_id.clone(),
        available: available_ids(catalog),
    })?;

    let project = collect_project_details(catalog, template, &template_id, prompter, args)?;
    let customizations = collect_customizations(template, prompter, args)?;

    let default_output = format!("./{}", project.name);
    let output = match &args.output {
        Some(path) => path.clone(),
        None if args.defaults => PathBuf::from(&default_output),
        None => PathBuf::from(prompter.read_line("Output directory", &default_output)?),
    };
    let output_dir = absolutize(output);

    if output_dir.exists() && !args.force && !args.defaults {
        let question = format!(
            "Directory '{}' already exists. Overwrite? (y/n)",
            output_dir.display()
        );
        let answer = prompter.read_line(&question, "n")?;
        if !parse_yes(&answer, false) {
            return Ok(None);
        }
    }

    Ok(Some(GenerationPlan { template_id, project, customizations, output_dir }))
}

/// Lists the catalog and reads a 1-based template index.
///
/// Unlike customization prompts there is no default to fall back to here,
/// so an invalid index is fatal.
fn prompt_template_selection(catalog: &Catalog, prompter: &dyn Prompter) -> Result<String> {
    println!("{}", render_template_list(catalog));
    let raw = prompter.read_line("Select a template (number)", "")?;
    let index = parse_selection(&raw, catalog.templates.len()).ok_or_else(|| {
        Error::InvalidSelection(format!(
            "'{}' is not a number between 1 and {}",
            raw.trim(),
            catalog.templates.len()
        ))
    })?;
    catalog
        .templates
        .get_index(index)
        .map(|(id, _)| id.clone())
        .ok_or_else(|| Error::InvalidSelection(raw.trim().to_string()))
}

fn collect_project_details(
    catalog: &Catalog,
    template: &TemplateDefinition,
    template_id: &str,
    prompter: &dyn Prompter,
    args: &Args,
) -> Result<ProjectDetails> {
    let default_name = format!("my-{template_id}");
    let name = match &args.name {
        Some(name) => name.clone(),
        None if args.defaults => default_name,
        None => prompter.read_line("Project name", &default_name)?,
    };
    let description = if args.defaults {
        template.description.clone()
    } else {
        prompter.read_line("Project description", &template.description)?
    };
    let author = if args.defaults {
        catalog.defaults.author.clone()
    } else {
        prompter.read_line("Author", &catalog.defaults.author)?
    };
    Ok(ProjectDetails { name, description, author })
}

fn collect_customizations(
    template: &TemplateDefinition,
    prompter: &dyn Prompter,
    args: &Args,
) -> Result<IndexMap<String, CustomizationValue>> {
    let overrides = parse_overrides(&args.set, template);
    let mut customizations = IndexMap::new();
    for (key, spec) in &template.customizations {
        let value = if let Some(value) = overrides.get(key) {
            value.clone()
        } else if args.defaults {
            spec.default_value()
        } else {
            prompt_customization(prompter, spec)?
        };
        customizations.insert(key.clone(), value);
    }
    Ok(customizations)
}

/// Parses `--set KEY=VALUE` overrides against the template's schema.
/// Malformed entries, unknown keys and out-of-schema values are warned
/// about and replaced with the catalog default.
pub fn parse_overrides(
    set: &[String],
    template: &TemplateDefinition,
) -> IndexMap<String, CustomizationValue> {
    let mut overrides = IndexMap::new();
    for entry in set {
        let Some((key, raw)) = entry.split_once('=') else {
            warn!("ignoring malformed override '{entry}', expected KEY=VALUE");
            continue;
        };
        let Some(spec) = template.customizations.get(key) else {
            warn!("ignoring override for unknown customization '{key}'");
            continue;
        };
        overrides.insert(key.to_string(), parse_override_value(key, spec, raw));
    }
    overrides
}

fn parse_override_value(key: &str, spec: &CustomizationSpec, raw: &str) -> CustomizationValue {
    match spec {
        CustomizationSpec::Boolean { default, .. } => {
            match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => CustomizationValue::Flag(true),
                "false" | "no" | "n" | "0" => CustomizationValue::Flag(false),
                other => {
                    warn!("'{key}={other}' is not a boolean, using the default");
                    CustomizationValue::Flag(*default)
                }
            }
        }
        CustomizationSpec::Select { options, default, .. } => {
            let trimmed = raw.trim();
            if options.iter().any(|option| option == trimmed) {
                CustomizationValue::Choice(trimmed.to_string())
            } else {
                warn!("'{key}={trimmed}' is not one of the declared options, using the default");
                CustomizationValue::Choice(default.clone())
            }
        }
        CustomizationSpec::Multiselect { options, default, .. } => {
            let mut picked = Vec::new();
            for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                if !options.iter().any(|option| option == part) {
                    warn!("dropping unknown option '{part}' for '{key}'");
                } else if !picked.contains(&part.to_string()) {
                    picked.push(part.to_string());
                }
            }
            if picked.is_empty() {
                CustomizationValue::Choices(default.clone())
            } else {
                CustomizationValue::Choices(picked)
            }
        }
    }
}

fn prompt_customization(
    prompter: &dyn Prompter,
    spec: &CustomizationSpec,
) -> Result<CustomizationValue> {
    match spec {
        CustomizationSpec::Select { label, options, default } => {
            println!("{label}");
            for (i, option) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            let raw = prompter.read_line("Choice (number)", "")?;
            match parse_selection(&raw, options.len()) {
                Some(index) => Ok(CustomizationValue::Choice(options[index].clone())),
                None => {
                    warn!("invalid selection '{}', using default '{default}'", raw.trim());
                    Ok(CustomizationValue::Choice(default.clone()))
                }
            }
        }
        CustomizationSpec::Multiselect { label, options, default } => {
            println!("{label}");
            for (i, option) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            let raw = prompter.read_line("Choices (comma-separated numbers)", "")?;
            let picked = parse_multi_selection(&raw, options.len());
            if picked.is_empty() {
                Ok(CustomizationValue::Choices(default.clone()))
            } else {
                Ok(CustomizationValue::Choices(
                    picked.into_iter().map(|i| options[i].clone()).collect(),
                ))
            }
        }
        CustomizationSpec::Boolean { label, default } => {
            let hint = if *default { "y" } else { "n" };
            let raw = prompter.read_line(&format!("{label} (y/n)"), hint)?;
            Ok(CustomizationValue::Flag(parse_yes(&raw, *default)))
        }
    }
}

/// Resolves a possibly-relative path against the current working directory.
pub fn absolutize<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

fn available_ids(catalog: &Catalog) -> String {
    catalog.templates.keys().cloned().collect::<Vec<_>>().join(", ")
}

fn first_template_id(catalog: &Catalog) -> Result<String> {
    catalog
        .templates
        .keys()
        .next()
        .cloned()
        .ok_or_else(|| Error::Catalog("catalog declares no templates".to_string()))
}
