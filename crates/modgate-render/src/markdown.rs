use crate::{RenderableReport, RenderableStatus, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Modgate report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Warn => "WARN",
        RenderableVerdict::Fail => "FAIL",
    };
    let c = &report.counts;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: `{}`\n- Modules: {} scanned, {} admitted, {} rejected, {} faulted, {} unreadable\n\n",
        verdict, report.profile, c.scanned, c.admitted, c.rejected, c.faulted, c.unreadable
    ));

    let flagged: Vec<_> = report
        .modules
        .iter()
        .filter(|m| m.status != RenderableStatus::Admitted)
        .collect();

    if flagged.is_empty() {
        out.push_str("All modules admitted.\n");
        return out;
    }

    out.push_str("## Modules not admitted\n\n");

    for m in flagged {
        let tag = match m.status {
            RenderableStatus::Admitted => "ADMITTED",
            RenderableStatus::Rejected => "REJECTED",
            RenderableStatus::Faulted => "FAULTED",
            RenderableStatus::Unreadable => "UNREADABLE",
        };
        out.push_str(&format!("- [{}] `{}` (`{}`)\n", tag, m.label(), m.path));

        if let Some(fault) = &m.fault {
            out.push_str(&format!("  - fault: {}\n", fault));
        }
        for complaint in &m.complaints {
            out.push_str(&format!(
                "  - `{}`: {}\n",
                complaint.criterion_id, complaint.message
            ));
        }
        if let Some(r) = &m.truncated_reason {
            out.push_str(&format!("  - > Note: {}\n", r));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableComplaint, RenderableCounts, RenderableModule};

    #[test]
    fn renders_all_admitted() {
        let report = RenderableReport {
            verdict: RenderableVerdict::Pass,
            profile: "plugin".to_string(),
            modules: vec![RenderableModule {
                path: "a.module.toml".to_string(),
                name: Some("a".to_string()),
                status: RenderableStatus::Admitted,
                complaints: Vec::new(),
                truncated_reason: None,
                fault: None,
            }],
            counts: RenderableCounts {
                scanned: 1,
                admitted: 1,
                ..RenderableCounts::default()
            },
        };
        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("1 scanned, 1 admitted"));
        assert!(md.contains("All modules admitted."));
        assert!(!md.contains("## Modules not admitted"));
    }

    #[test]
    fn renders_complaints_faults_and_truncation() {
        let report = RenderableReport {
            verdict: RenderableVerdict::Fail,
            profile: "plugin".to_string(),
            modules: vec![
                RenderableModule {
                    path: "widgets.module.toml".to_string(),
                    name: Some("widgets".to_string()),
                    status: RenderableStatus::Rejected,
                    complaints: vec![RenderableComplaint {
                        criterion_id: "plugin.exports_plugin".to_string(),
                        message: "could not load dependency 'core': gone".to_string(),
                    }],
                    truncated_reason: Some("3 complaint(s) truncated to max_complaints=1".to_string()),
                    fault: None,
                },
                RenderableModule {
                    path: "broken.module.toml".to_string(),
                    name: None,
                    status: RenderableStatus::Unreadable,
                    complaints: Vec::new(),
                    truncated_reason: None,
                    fault: Some("missing [module].name".to_string()),
                },
            ],
            counts: RenderableCounts {
                scanned: 2,
                rejected: 1,
                unreadable: 1,
                ..RenderableCounts::default()
            },
        };

        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("## Modules not admitted"));
        assert!(md.contains("- [REJECTED] `widgets` (`widgets.module.toml`)"));
        assert!(md.contains("`plugin.exports_plugin`: could not load dependency 'core': gone"));
        assert!(md.contains("> Note: 3 complaint(s) truncated"));
        assert!(md.contains("- [UNREADABLE] `broken.module.toml`"));
        assert!(md.contains("fault: missing [module].name"));
    }
}
