use crate::{RenderableReport, RenderableStatus};

/// Render non-admitted modules as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::[{criterion_id}:{code}] {message}`
///
/// Rejections emit one `warning` per complaint. Faulted and unreadable modules emit a
/// single `error`.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for m in &report.modules {
        match m.status {
            RenderableStatus::Admitted => {}
            RenderableStatus::Rejected => {
                for c in &m.complaints {
                    out.push(annotation(
                        "warning",
                        &m.path,
                        &format!("[{}:{}] {}: {}", c.criterion_id, m.status.code(), m.label(), c.message),
                    ));
                }
                if m.complaints.is_empty() {
                    out.push(annotation(
                        "warning",
                        &m.path,
                        &format!("[{}] {}: rejected without complaints", m.status.code(), m.label()),
                    ));
                }
            }
            RenderableStatus::Faulted | RenderableStatus::Unreadable => {
                let fault = m.fault.as_deref().unwrap_or("unknown fault");
                out.push(annotation(
                    "error",
                    &m.path,
                    &format!("[{}] {}: {}", m.status.code(), m.label(), fault),
                ));
            }
        }
    }

    out
}

fn annotation(level: &str, path: &str, message: &str) -> String {
    let message = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{level} file={path}::{message}")
}
