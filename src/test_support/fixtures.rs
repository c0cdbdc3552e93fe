//! Test fixtures for common import scenarios.

use std::path::{Path, PathBuf};

use crate::core::{Revision, Version};

/// A catalog with a semver-tagged project, a branch-only project and a
/// project with only a plain tag.
pub const CATALOG: &str = r#"
[[project]]
root = "github.com/x/y"

[[project.version]]
tag = "v1.2.0"
revision = "1111111"

[[project.version]]
tag = "v2.0.0"
revision = "2222222"

[[project.version]]
branch = "master"
revision = "2222222"

[[project]]
root = "github.com/a/b"

[[project.version]]
branch = "master"
revision = "deadbeef"

[[project.version]]
branch = "develop"
revision = "cafef00d"

[[project]]
root = "example.org/tools"
prefixes = ["example.org/tools-mirror"]

[[project.version]]
tag = "stable"
revision = "5555555"
"#;

/// Imports matching [`CATALOG`].
pub const IMPORTS: &str = r#"
[[package]]
name = "github.com/x/y/sub"
lock = "v1.2.0"

[[package]]
name = "github.com/a/b"
lock = "deadbeef"

[[package]]
name = "github.com/x/y"
constraint = "^1.0.0"

[[package]]
name = "example.org/tools-mirror/cmd"
lock = "stable"
"#;

/// Write the standard catalog and imports into `dir`.
///
/// Returns `(catalog_path, imports_path)`.
pub fn write_import_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let catalog = dir.join("catalog.toml");
    let imports = dir.join("imports.toml");
    std::fs::write(&catalog, CATALOG).unwrap();
    std::fs::write(&imports, IMPORTS).unwrap();
    (catalog, imports)
}

/// A semver tag paired with `rev`.
pub fn semver_at(tag: &str, rev: &str) -> Version {
    Version::tag(tag).pair(Revision::new(rev))
}

/// A branch paired with `rev`.
pub fn branch_at(name: &str, rev: &str) -> Version {
    Version::branch(name).pair(Revision::new(rev))
}
