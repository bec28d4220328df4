//! `#include` directives and how their literal paths map to files.

mod directives;
mod packages;
mod resolver;

pub use directives::{IncludeDirective, include_at, include_on_line, parse_includes};
pub use packages::{PackageMap, PackageRegistry, compare_versions, scan_project};
pub use resolver::{IncludeConfig, IncludeResolver, ResolvedBy};

/// Literal prefix of Unity package-relative include paths.
pub const PACKAGES_PREFIX: &str = "Packages/";
