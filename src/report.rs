//! Human-readable listing and summary rendering.
//! Pure formatting over already-resolved data, no error paths.

use crate::catalog::Catalog;
use crate::collector::GenerationPlan;
use crate::constants::ENV_EXAMPLE_FILE;
use std::fmt::Write as _;

/// Renders the numbered template listing used by both the selection prompt
/// and `--list`. Complexity tiers show up as asterisks.
pub fn render_template_list(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available templates:");
    for (i, (id, template)) in catalog.templates.iter().enumerate() {
        let tier = "*".repeat(template.complexity.max(1) as usize);
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}. {} [{}] {}", i + 1, template.name, id, tier);
        if !template.description.is_empty() {
            let _ = writeln!(out, "     {}", template.description);
        }
        if !template.stack.is_empty() {
            let _ = writeln!(out, "     stack: {}", template.stack.join(", "));
        }
    }
    out
}

/// Renders the completion summary with next-step commands. Templates
/// without a package manifest (the static page) get a shorter set.
pub fn render_summary(plan: &GenerationPlan, has_manifest: bool, wrote_env: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Project '{}' generated at {}",
        plan.project.name,
        plan.output_dir.display()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Next steps:");
    let _ = writeln!(out, "  cd {}", plan.output_dir.display());
    if has_manifest {
        let _ = writeln!(out, "  npm install");
        if wrote_env {
            let _ = writeln!(out, "  cp {ENV_EXAMPLE_FILE} .env");
        }
        let _ = writeln!(out, "  npm run dev");
    } else {
        let _ = writeln!(out, "  open index.html in your browser");
    }
    out
}
