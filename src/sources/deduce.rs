//! Project root deduction for well-known import path layouts.

use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::Regex;

use crate::core::ProjectRoot;

/// Hosts whose roots are always `<host>/<owner>/<repo>`.
static HOSTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<root>(?:github\.com|bitbucket\.org|gitlab\.com)/[A-Za-z0-9][-A-Za-z0-9_.]*/[A-Za-z0-9_.\-]+)(?:/[A-Za-z0-9_.\-]+)*$",
    )
    .expect("static regex")
});

/// `gopkg.in/pkg.v1` and `gopkg.in/user/pkg.v1`.
static GOPKG_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<root>gopkg\.in/(?:[a-zA-Z0-9][-a-zA-Z0-9]*/)?[a-zA-Z][-.a-zA-Z0-9]*\.v\d+(?:-unstable)?)(?:\.git)?(?:/[a-zA-Z0-9][-.a-zA-Z0-9]*)*$",
    )
    .expect("static regex")
});

static GOLANG_X: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<root>golang\.org/x/[A-Za-z0-9_.\-]+)(?:/[A-Za-z0-9_.\-]+)*$")
        .expect("static regex")
});

/// Any path with an explicit VCS suffix ends its root there.
static VCS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<root>[A-Za-z0-9][-A-Za-z0-9_.]*(?:/[A-Za-z0-9_.\-~]+)*?\.(?:git|hg|bzr|svn))(?:/[A-Za-z0-9_.\-]+)*$",
    )
    .expect("static regex")
});

/// Deduce the project root of an import path.
///
/// A leading URL scheme (`https://`, `git+ssh://`, ...) is ignored.
pub fn deduce_root(import_path: &str) -> Result<ProjectRoot> {
    let path = strip_scheme(import_path.trim()).trim_end_matches('/');

    if path.is_empty() {
        bail!("empty import path");
    }

    for re in [&*HOSTED, &*GOPKG_IN, &*GOLANG_X, &*VCS_SUFFIX] {
        if let Some(caps) = re.captures(path) {
            return Ok(ProjectRoot::new(&caps["root"]));
        }
    }

    bail!("unable to deduce repository and source type for `{}`", import_path)
}

fn strip_scheme(path: &str) -> &str {
    match path.split_once("://") {
        Some((_, rest)) => rest,
        None => path,
    }
}
