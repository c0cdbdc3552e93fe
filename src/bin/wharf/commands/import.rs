//! `wharf import` command

use std::io::IsTerminal;

use anyhow::{Context, Result};

use crate::cli::ImportArgs;
use wharf::importer::ImportError;
use wharf::ops::{import, ImportOptions};
use wharf::sources::CatalogSource;
use wharf::util::config;
use wharf::util::diagnostic::emit;
use wharf::util::TracingFeedback;

pub fn execute(args: ImportArgs, verbose: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let config = config::load_for_project(&cwd);

    let sm = CatalogSource::load(&args.catalog)?;
    tracing::debug!("Loaded {} catalog projects", sm.len());

    let out_dir = args.out.unwrap_or(cwd);
    let mut opts = ImportOptions::new(&args.imports, out_dir);
    opts.default_constraint_from_lock =
        config.default_constraint_from_lock() && !args.no_default_constraints;
    opts.verbose = verbose || config.import.verbose;
    opts.dry_run = args.dry_run;
    opts.manifest_name = config.manifest_name().to_string();
    opts.lock_name = config.lock_name().to_string();

    let report = match import(&opts, &sm, &TracingFeedback) {
        Ok(report) => report,
        Err(e) => {
            if let Some(import_err) = e.downcast_ref::<ImportError>() {
                emit(
                    &import_err.to_diagnostic().with_location(&args.imports),
                    std::io::stderr().is_terminal(),
                );
            }
            return Err(e);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report.decisions)
            .context("failed to serialize decisions")?;
        println!("{}", json);
    }

    let summary = format!(
        "{} projects, {} locked, {} constraints dropped",
        report.decisions.len(),
        report.lock.len(),
        report.discarded()
    );
    if report.written {
        eprintln!("    Imported {}", summary);
        eprintln!("     Writing {}", report.manifest_path.display());
        eprintln!("     Writing {}", report.lock_path.display());
    } else {
        eprintln!("Would import {}", summary);
    }

    if report.degraded() > 0 {
        tracing::warn!(
            "{} projects were left unlocked; run with --verbose for details",
            report.degraded()
        );
    }

    Ok(())
}
