use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical probe-relative path of a module descriptor.
///
/// Normalization rules:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - never empty (`.` stands for the probe root itself)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ProbePath(String);

impl Default for ProbePath {
    fn default() -> Self {
        ProbePath::new(".")
    }
}

impl ProbePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while let Some(rest) = v.strip_prefix("./") {
            v = rest.to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute location of this path under `probe_root`.
    pub fn under(&self, probe_root: &Utf8Path) -> Utf8PathBuf {
        probe_root.join(self.as_str())
    }

    /// File name component, or the whole path when there is none.
    pub fn file_name(&self) -> &str {
        Utf8Path::new(self.as_str())
            .file_name()
            .unwrap_or(self.as_str())
    }
}

impl std::fmt::Display for ProbePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for ProbePath {
    fn from(value: &Utf8Path) -> Self {
        ProbePath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for ProbePath {
    fn from(value: Utf8PathBuf) -> Self {
        ProbePath::new(value.as_str())
    }
}
