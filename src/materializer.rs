//! Core output-tree production for appforge.
//! Walks a template's source tree into the output directory, excluding
//! build artifacts and rewriting the package manifest and readme on the way.

use crate::catalog::CustomizationValue;
use crate::collector::GenerationPlan;
use crate::constants::{
    CONDITIONAL_PACKAGES, EXCLUDED_DIRS, EXCLUDED_FILES, INITIAL_VERSION, PACKAGE_MANIFEST,
    README_FILE,
};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a materialization run produced.
#[derive(Debug, Default)]
pub struct MaterializeStats {
    pub files_written: usize,
    pub has_manifest: bool,
}

/// Copies one template tree into the plan's output directory.
///
/// Overwrites colliding files without warning; the overwrite confirmation
/// belongs to the collector. Partial output is not rolled back on failure.
pub struct Materializer<'a> {
    template_dir: PathBuf,
    plan: &'a GenerationPlan,
    excluded: GlobSet,
}

impl<'a> Materializer<'a> {
    pub fn new<P: AsRef<Path>>(templates_dir: P, plan: &'a GenerationPlan) -> Result<Self> {
        Ok(Self {
            template_dir: templates_dir.as_ref().join(&plan.template_id),
            plan,
            excluded: build_exclusions()?,
        })
    }

    pub fn run(&self) -> Result<MaterializeStats> {
        if !self.template_dir.is_dir() {
            return Err(Error::Catalog(format!(
                "template directory '{}' does not exist",
                self.template_dir.display()
            )));
        }

        let mut stats = MaterializeStats::default();
        fs::create_dir_all(&self.plan.output_dir)
            .map_err(|e| materialize_err(&self.plan.output_dir, e))?;

        let walker = WalkDir::new(&self.template_dir)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry.path()));
        for entry in walker {
            let entry =
                entry.map_err(|e| materialize_err(&self.template_dir, io::Error::from(e)))?;
            let rel = match entry.path().strip_prefix(&self.template_dir) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
                _ => continue,
            };
            let target = self.plan.output_dir.join(&rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| materialize_err(&target, e))?;
                continue;
            }

            if rel == Path::new(PACKAGE_MANIFEST) {
                let content = fs::read_to_string(entry.path())
                    .map_err(|e| materialize_err(entry.path(), e))?;
                let rewritten = transform_manifest(&content, self.plan)?;
                fs::write(&target, rewritten).map_err(|e| materialize_err(&target, e))?;
                stats.has_manifest = true;
                debug!("rewrote {}", target.display());
            } else if rel == Path::new(README_FILE) {
                let content = fs::read_to_string(entry.path())
                    .map_err(|e| materialize_err(entry.path(), e))?;
                let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
                let rewritten = transform_readme(
                    &content,
                    &self.plan.project.name,
                    &self.plan.template_id,
                    &today,
                );
                fs::write(&target, rewritten).map_err(|e| materialize_err(&target, e))?;
                debug!("retitled {}", target.display());
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(|e| materialize_err(parent, e))?;
                }
                fs::copy(entry.path(), &target).map_err(|e| materialize_err(&target, e))?;
                debug!("copied {}", target.display());
            }
            stats.files_written += 1;
        }

        Ok(stats)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        match path.strip_prefix(&self.template_dir) {
            Ok(rel) => self.excluded.is_match(rel),
            Err(_) => false,
        }
    }
}

/// Compiles the exclusion patterns: artifact directories, local env
/// overrides and the lockfile, at any depth of the template tree.
pub fn build_exclusions() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for dir in EXCLUDED_DIRS {
        add_pattern(&mut builder, dir)?;
        add_pattern(&mut builder, &format!("**/{dir}"))?;
    }
    for file in EXCLUDED_FILES {
        add_pattern(&mut builder, file)?;
        add_pattern(&mut builder, &format!("**/{file}"))?;
    }
    builder.build().map_err(|e| Error::Pattern(e.to_string()))
}

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    builder.add(Glob::new(pattern).map_err(|e| Error::Pattern(e.to_string()))?);
    Ok(())
}

/// Rewrites a package manifest for the generated project: identity fields
/// come from the plan, the version resets to the initial one, and packages
/// belonging to deselected features are dropped from both dependency
/// sections. Key order is preserved.
pub fn transform_manifest(content: &str, plan: &GenerationPlan) -> Result<String> {
    let mut manifest: serde_json::Value = serde_json::from_str(content).map_err(manifest_err)?;

    if let Some(root) = manifest.as_object_mut() {
        root.insert("name".to_string(), json!(plan.project.name));
        root.insert("description".to_string(), json!(plan.project.description));
        root.insert("author".to_string(), json!(plan.project.author));
        root.insert("version".to_string(), json!(INITIAL_VERSION));
    }

    for (flag, packages) in CONDITIONAL_PACKAGES {
        let disabled = matches!(
            plan.customizations.get(*flag),
            Some(CustomizationValue::Flag(false))
        );
        if !disabled {
            continue;
        }
        for section in ["dependencies", "devDependencies"] {
            if let Some(deps) = manifest.get_mut(section).and_then(|v| v.as_object_mut()) {
                for package in *packages {
                    deps.shift_remove(*package);
                }
            }
        }
    }

    let mut pretty = serde_json::to_string_pretty(&manifest).map_err(manifest_err)?;
    pretty.push('\n');
    Ok(pretty)
}

/// Retitles a readme: the first line becomes a heading with the project
/// name and a generation notice lands right after the first two lines.
/// Everything else is preserved verbatim.
pub fn transform_readme(content: &str, project_name: &str, template_id: &str, date: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 3);
    out.push(format!("# {project_name}"));
    if lines.len() > 1 {
        out.push(lines[1].to_string());
    }
    out.push(format!("_Generated from the {template_id} template on {date}._"));
    out.push(String::new());
    for line in lines.iter().skip(2) {
        out.push((*line).to_string());
    }
    let mut result = out.join("\n");
    result.push('\n');
    result
}

fn materialize_err(path: &Path, source: io::Error) -> Error {
    Error::Materialize { path: path.display().to_string(), source }
}

fn manifest_err(source: serde_json::Error) -> Error {
    Error::Manifest { path: PACKAGE_MANIFEST.to_string(), source }
}
