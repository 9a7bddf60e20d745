use appforge::catalog::CustomizationValue;
use appforge::collector::{GenerationPlan, ProjectDetails};
use appforge::materializer::{transform_manifest, transform_readme, Materializer};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
  "name": "template",
  "version": "9.9.9",
  "description": "old description",
  "author": "old author",
  "dependencies": {
    "express": "^4.19.2",
    "jsonwebtoken": "^9.0.2",
    "stripe": "^15.1.0",
    "@stripe/stripe-js": "^3.3.0"
  },
  "devDependencies": {
    "nodemon": "^3.1.0"
  }
}"#;

fn plan_for(
    template_id: &str,
    output_dir: PathBuf,
    customizations: IndexMap<String, CustomizationValue>,
) -> GenerationPlan {
    GenerationPlan {
        template_id: template_id.to_string(),
        project: ProjectDetails {
            name: "demo-app".to_string(),
            description: "A demo".to_string(),
            author: "Test Author".to_string(),
        },
        customizations,
        output_dir,
    }
}

fn stripe_flag(enabled: bool) -> IndexMap<String, CustomizationValue> {
    let mut customizations = IndexMap::new();
    customizations.insert("includeStripe".to_string(), CustomizationValue::Flag(enabled));
    customizations
}

#[test]
fn test_manifest_identity_fields() {
    let plan = plan_for("demo", PathBuf::from("unused"), IndexMap::new());

    let out = transform_manifest(MANIFEST, &plan).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["name"], "demo-app");
    assert_eq!(value["version"], "0.1.0");
    assert_eq!(value["description"], "A demo");
    assert_eq!(value["author"], "Test Author");
}

#[test]
fn test_stripe_packages_removed_when_deselected() {
    let plan = plan_for("demo", PathBuf::from("unused"), stripe_flag(false));

    let out = transform_manifest(MANIFEST, &plan).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    let deps = value["dependencies"].as_object().unwrap();
    assert!(!deps.contains_key("stripe"));
    assert!(!deps.contains_key("@stripe/stripe-js"));
    assert!(deps.contains_key("express"));
    assert!(deps.contains_key("jsonwebtoken"));
}

#[test]
fn test_stripe_packages_kept_when_selected_or_unset() {
    for customizations in [stripe_flag(true), IndexMap::new()] {
        let plan = plan_for("demo", PathBuf::from("unused"), customizations);
        let out = transform_manifest(MANIFEST, &plan).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let deps = value["dependencies"].as_object().unwrap();
        assert!(deps.contains_key("stripe"));
        assert!(deps.contains_key("@stripe/stripe-js"));
    }
}

#[test]
fn test_auth_packages_removed_when_deselected() {
    let mut customizations = IndexMap::new();
    customizations.insert("includeAuth".to_string(), CustomizationValue::Flag(false));
    let plan = plan_for("demo", PathBuf::from("unused"), customizations);

    let out = transform_manifest(MANIFEST, &plan).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    let deps = value["dependencies"].as_object().unwrap();
    assert!(!deps.contains_key("jsonwebtoken"));
    assert!(deps.contains_key("stripe"));
}

#[test]
fn test_invalid_manifest_is_an_error() {
    let plan = plan_for("demo", PathBuf::from("unused"), IndexMap::new());
    assert!(transform_manifest("not json", &plan).is_err());
}

#[test]
fn test_readme_transform() {
    let content = "# Old Title\n\nSome description.\nMore text.\n";

    let out = transform_readme(content, "demo-app", "api-service", "2026-08-06");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "# demo-app");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "_Generated from the api-service template on 2026-08-06._");
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Some description.");
    assert_eq!(lines[5], "More text.");
}

#[test]
fn test_readme_transform_single_line() {
    let out = transform_readme("# Only Title\n", "demo-app", "t", "2026-08-06");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "# demo-app");
    assert_eq!(lines[1], "_Generated from the t template on 2026-08-06._");
}

fn build_template_tree(root: &Path) {
    let template = root.join("demo");
    fs::create_dir_all(template.join("src")).unwrap();
    fs::create_dir_all(template.join("node_modules/left-pad")).unwrap();
    fs::create_dir_all(template.join("dist")).unwrap();
    fs::create_dir_all(template.join("coverage")).unwrap();
    fs::write(template.join("package.json"), MANIFEST).unwrap();
    fs::write(template.join("README.md"), "# Demo\n\nBody text.\n").unwrap();
    fs::write(template.join("src/index.js"), "console.log('hi');\n").unwrap();
    fs::write(template.join("node_modules/left-pad/index.js"), "x").unwrap();
    fs::write(template.join("dist/bundle.js"), "x").unwrap();
    fs::write(template.join("coverage/lcov.info"), "x").unwrap();
    fs::write(template.join("package-lock.json"), "{}").unwrap();
    fs::write(template.join(".env"), "LEAKED=1").unwrap();
    fs::write(template.join(".env.local"), "LEAKED=1").unwrap();
}

#[test]
fn test_materialize_copies_and_excludes() {
    let root = TempDir::new().unwrap();
    build_template_tree(root.path());
    let out = TempDir::new().unwrap();
    let output_dir = out.path().join("generated");
    let plan = plan_for("demo", output_dir.clone(), IndexMap::new());

    let stats = Materializer::new(root.path(), &plan).unwrap().run().unwrap();

    assert!(stats.has_manifest);
    assert!(output_dir.join("src/index.js").exists());
    assert!(output_dir.join("README.md").exists());
    assert!(!output_dir.join("node_modules").exists());
    assert!(!output_dir.join("dist").exists());
    assert!(!output_dir.join("coverage").exists());
    assert!(!output_dir.join("package-lock.json").exists());
    assert!(!output_dir.join(".env").exists());
    assert!(!output_dir.join(".env.local").exists());

    // untouched files are copied verbatim
    assert_eq!(
        fs::read_to_string(output_dir.join("src/index.js")).unwrap(),
        "console.log('hi');\n"
    );

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["name"], "demo-app");
    assert_eq!(manifest["version"], "0.1.0");

    let readme = fs::read_to_string(output_dir.join("README.md")).unwrap();
    assert!(readme.starts_with("# demo-app\n"));
    assert!(readme.contains("Generated from the demo template on"));
    assert!(readme.contains("Body text."));
}

#[test]
fn test_materialize_missing_template_dir_fails() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let plan = plan_for("nope", out.path().join("generated"), IndexMap::new());

    assert!(Materializer::new(root.path(), &plan).unwrap().run().is_err());
}

#[test]
fn test_rerun_overwrites_existing_output() {
    let root = TempDir::new().unwrap();
    build_template_tree(root.path());
    let out = TempDir::new().unwrap();
    let output_dir = out.path().join("generated");
    let plan = plan_for("demo", output_dir.clone(), IndexMap::new());
    let materializer = Materializer::new(root.path(), &plan).unwrap();

    materializer.run().unwrap();
    fs::write(output_dir.join("src/index.js"), "tampered\n").unwrap();
    materializer.run().unwrap();

    assert_eq!(
        fs::read_to_string(output_dir.join("src/index.js")).unwrap(),
        "console.log('hi');\n"
    );
}
