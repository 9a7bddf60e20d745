//! Common constants used throughout the appforge application.

/// Supported catalog manifest file names, tried in order
pub const CATALOG_FILES: [&str; 3] = ["templates.json", "templates.yml", "templates.yaml"];

/// Default templates root, relative to the working directory
pub const TEMPLATES_DIR: &str = "templates";

/// Short-name aliases accepted wherever a template id is expected
pub const TEMPLATE_ALIASES: &[(&str, &str)] = &[
    ("api", "api-service"),
    ("saas", "saas-level-1"),
    ("mobile", "mobile-app"),
    ("about", "about-me-page"),
];

/// Package manifest file name, rewritten during materialization
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Readme file name, retitled during materialization
pub const README_FILE: &str = "README.md";

/// Name of the generated environment file
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

/// Version every generated package manifest starts from
pub const INITIAL_VERSION: &str = "0.1.0";

/// Directories never copied into the output project: installed dependencies,
/// build output, coverage reports and the ORM's local cache.
pub const EXCLUDED_DIRS: &[&str] =
    &["node_modules", "dist", "build", ".next", ".expo", "coverage", ".prisma"];

/// Files never copied into the output project: local environment overrides
/// and the dependency lockfile, both regenerated by the consumer.
pub const EXCLUDED_FILES: &[&str] =
    &[".env", ".env.local", ".env.*.local", "package-lock.json"];

/// Packages stripped from the manifest when the named boolean customization
/// resolves to false.
pub const CONDITIONAL_PACKAGES: &[(&str, &[&str])] = &[
    ("includeAuth", &["jsonwebtoken", "bcryptjs", "next-auth", "@auth/prisma-adapter"]),
    ("includeRateLimiting", &["express-rate-limit"]),
    ("includeStripe", &["stripe", "@stripe/stripe-js"]),
];

/// Env var keys containing this substring receive a generated secret value
pub const SECRET_MARKER: &str = "SECRET";

/// Payment-provider marker; secrets carrying it keep their placeholder
pub const PAYMENT_MARKER: &str = "STRIPE";

/// Provider markers used by the legacy substring gating fallback, paired
/// with the `authProviders` option they correspond to.
pub const PROVIDER_MARKERS: &[(&str, &str)] = &[("GITHUB", "github"), ("GOOGLE", "google")];
