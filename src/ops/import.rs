//! Implementation of `wharf import`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{ImportLock, ImportManifest};
use crate::importer::{ImportedPackage, Importer, ImportsFile, ProjectDecision};
use crate::ops::encode::{LockFile, ManifestFile, LOCK_NAME, MANIFEST_NAME};
use crate::sources::SourceManager;
use crate::util::feedback::Feedback;

/// Options for importing dependencies.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// File holding the `[[package]]` records to import
    pub imports_path: PathBuf,

    /// Directory receiving the manifest and lock
    pub out_dir: PathBuf,

    /// Derive constraints from locked versions when none was given
    pub default_constraint_from_lock: bool,

    /// Report discarded constraints at info level
    pub verbose: bool,

    /// Decide everything but write nothing
    pub dry_run: bool,

    pub manifest_name: String,
    pub lock_name: String,
}

impl ImportOptions {
    pub fn new(imports_path: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        ImportOptions {
            imports_path: imports_path.into(),
            out_dir: out_dir.into(),
            default_constraint_from_lock: true,
            verbose: false,
            dry_run: false,
            manifest_name: MANIFEST_NAME.to_string(),
            lock_name: LOCK_NAME.to_string(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(&self.manifest_name)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.out_dir.join(&self.lock_name)
    }
}

/// Outcome of an import.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub decisions: Vec<ProjectDecision>,

    #[serde(skip)]
    pub manifest: ImportManifest,

    #[serde(skip)]
    pub lock: ImportLock,

    pub manifest_path: PathBuf,
    pub lock_path: PathBuf,

    /// Whether the files were written
    pub written: bool,
}

impl ImportReport {
    /// Projects whose given constraint was dropped.
    pub fn discarded(&self) -> usize {
        self.decisions.iter().filter(|d| d.was_discarded()).count()
    }

    /// Projects left unlocked because their revision could not be looked up.
    pub fn degraded(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_degraded()).count()
    }
}

/// Read the package records to import.
pub fn load_imports(path: &Path) -> Result<Vec<ImportedPackage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read imports: {}", path.display()))?;

    let file: ImportsFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse imports: {}", path.display()))?;

    Ok(file.packages)
}

/// Import dependency records into a manifest and lock.
pub fn import(
    opts: &ImportOptions,
    sm: &dyn SourceManager,
    feedback: &dyn Feedback,
) -> Result<ImportReport> {
    let packages = load_imports(&opts.imports_path)?;
    tracing::debug!(
        "Read {} package records from {}",
        packages.len(),
        opts.imports_path.display()
    );

    let mut importer = Importer::new(sm, feedback, opts.verbose);
    let decisions = importer.import_packages(packages, opts.default_constraint_from_lock)?;
    let (manifest, lock) = importer.into_parts();

    let manifest_path = opts.manifest_path();
    let lock_path = opts.lock_path();

    let manifest_file = ManifestFile::from_manifest(&manifest);
    let lock_file = LockFile::from_lock(&lock, &manifest)?;

    if !opts.dry_run {
        std::fs::create_dir_all(&opts.out_dir).with_context(|| {
            format!("failed to create output directory: {}", opts.out_dir.display())
        })?;
        manifest_file.save(&manifest_path)?;
        lock_file.save(&lock_path)?;
        tracing::debug!(
            "Wrote {} and {}",
            manifest_path.display(),
            lock_path.display()
        );
    }

    Ok(ImportReport {
        decisions,
        manifest,
        lock,
        manifest_path,
        lock_path,
        written: !opts.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constraint, ProjectRoot};
    use crate::importer::ImportError;
    use crate::sources::CatalogSource;
    use crate::test_support::{write_import_fixture, CATALOG};
    use crate::util::feedback::{NoFeedback, RecordingFeedback};
    use tempfile::TempDir;

    #[test]
    fn test_import_writes_manifest_and_lock() {
        let tmp = TempDir::new().unwrap();
        let (_, imports) = write_import_fixture(tmp.path());
        let sm = CatalogSource::parse(CATALOG).unwrap();

        let opts = ImportOptions::new(&imports, tmp.path().join("out"));
        let report = import(&opts, &sm, &NoFeedback).unwrap();

        assert!(report.written);
        assert_eq!(report.decisions.len(), 3);
        assert_eq!(report.discarded(), 1);
        assert_eq!(report.degraded(), 0);

        let roots: Vec<&str> = report.manifest.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(
            roots,
            vec!["example.org/tools", "github.com/a/b", "github.com/x/y"]
        );
        assert_eq!(
            report
                .manifest
                .get(&ProjectRoot::new("github.com/x/y"))
                .unwrap()
                .constraint
                .to_string(),
            "^1.0.0"
        );
        assert_eq!(
            report
                .manifest
                .get(&ProjectRoot::new("example.org/tools"))
                .unwrap()
                .constraint,
            Constraint::Any
        );

        let manifest_text = std::fs::read_to_string(&report.manifest_path).unwrap();
        let manifest: ManifestFile = toml::from_str(&manifest_text).unwrap();
        assert_eq!(manifest.constraints.len(), 3);
        assert_eq!(manifest.constraints[1].branch.as_deref(), Some("master"));

        let lock = LockFile::load(&report.lock_path).unwrap();
        assert_eq!(lock.projects.len(), 3);
        assert_eq!(lock.projects[0].version.as_deref(), Some("stable"));
        assert_eq!(lock.projects[0].revision.as_deref(), Some("5555555"));
        assert_eq!(lock.projects[2].version.as_deref(), Some("v1.2.0"));
        assert_eq!(
            lock.manifest_hash,
            crate::ops::compute_manifest_hash(&report.manifest).unwrap()
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let (_, imports) = write_import_fixture(tmp.path());
        let sm = CatalogSource::parse(CATALOG).unwrap();

        let mut opts = ImportOptions::new(&imports, tmp.path().join("out"));
        opts.dry_run = true;
        let report = import(&opts, &sm, &NoFeedback).unwrap();

        assert!(!report.written);
        assert_eq!(report.lock.len(), 3);
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_reimport_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let (_, imports) = write_import_fixture(tmp.path());
        let sm = CatalogSource::parse(CATALOG).unwrap();

        let first = ImportOptions::new(&imports, tmp.path().join("a"));
        let second = ImportOptions::new(&imports, tmp.path().join("b"));
        let feedback_a = RecordingFeedback::new();
        let feedback_b = RecordingFeedback::new();
        import(&first, &sm, &feedback_a).unwrap();
        import(&second, &sm, &feedback_b).unwrap();

        for name in [MANIFEST_NAME, LOCK_NAME] {
            assert_eq!(
                std::fs::read(tmp.path().join("a").join(name)).unwrap(),
                std::fs::read(tmp.path().join("b").join(name)).unwrap()
            );
        }
        assert_eq!(feedback_a.lines(), feedback_b.lines());
    }

    #[test]
    fn test_no_default_constraints_leaves_any() {
        let tmp = TempDir::new().unwrap();
        let (_, imports) = write_import_fixture(tmp.path());
        let sm = CatalogSource::parse(CATALOG).unwrap();

        let mut opts = ImportOptions::new(&imports, tmp.path());
        opts.default_constraint_from_lock = false;
        let report = import(&opts, &sm, &NoFeedback).unwrap();

        let ab = report
            .manifest
            .get(&ProjectRoot::new("github.com/a/b"))
            .unwrap();
        assert_eq!(ab.constraint, Constraint::Any);
        assert_eq!(report.discarded(), 0);
    }

    #[test]
    fn test_unknown_project_aborts_with_import_error() {
        let tmp = TempDir::new().unwrap();
        let imports = tmp.path().join("imports.toml");
        std::fs::write(
            &imports,
            r#"
[[package]]
name = "github.com/nobody/nothing"
lock = "v1.0.0"
"#,
        )
        .unwrap();
        let sm = CatalogSource::parse(CATALOG).unwrap();

        let opts = ImportOptions::new(&imports, tmp.path().join("out"));
        let err = import(&opts, &sm, &NoFeedback).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ImportError>(),
            Some(ImportError::ListVersions { .. })
        ));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_missing_imports_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_imports(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read imports"));
    }
}
