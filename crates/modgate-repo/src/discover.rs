use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use modgate_types::ProbePath;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Discover module descriptor files under `probe_root`.
///
/// Every file whose probe-relative path matches one of `include` is a candidate. The
/// result is sorted and free of duplicates so scans are reproducible regardless of
/// filesystem traversal order.
pub fn discover_modules(
    probe_root: &Utf8Path,
    include: &[String],
) -> anyhow::Result<Vec<ProbePath>> {
    if !probe_root.is_dir() {
        anyhow::bail!("probe directory does not exist: {}", probe_root);
    }

    let include_set = build_globset(include).context("compile include globset")?;

    let mut out: Vec<ProbePath> = WalkDir::new(probe_root)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable probe directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let utf8 = pathbuf_to_utf8(e.path().to_path_buf());
            if utf8.is_none() {
                tracing::debug!(path = %e.path().display(), "skipping non-UTF-8 path");
            }
            utf8
        })
        .filter_map(|abs| {
            let rel = abs
                .strip_prefix(probe_root)
                .unwrap_or(&abs)
                .as_str()
                .replace('\\', "/");
            include_set.is_match(&rel).then(|| ProbePath::new(rel))
        })
        .collect();

    out.sort();
    out.dedup();

    tracing::debug!(probe_root = %probe_root, count = out.len(), "discovered module descriptors");
    Ok(out)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("invalid include glob: {p}"))?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
