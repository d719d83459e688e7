use modgate_types::ids;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Admitted,
    Rejected,
    Faulted,
    Unreadable,
}

impl RenderableStatus {
    pub fn code(self) -> &'static str {
        match self {
            RenderableStatus::Admitted => ids::CODE_ADMITTED,
            RenderableStatus::Rejected => ids::CODE_REJECTED,
            RenderableStatus::Faulted => ids::CODE_FAULTED,
            RenderableStatus::Unreadable => ids::CODE_UNREADABLE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableComplaint {
    pub criterion_id: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableModule {
    pub path: String,
    pub name: Option<String>,
    pub status: RenderableStatus,
    pub complaints: Vec<RenderableComplaint>,
    pub truncated_reason: Option<String>,
    pub fault: Option<String>,
}

impl RenderableModule {
    /// Module name when known, otherwise its descriptor path.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub scanned: u32,
    pub admitted: u32,
    pub rejected: u32,
    pub faulted: u32,
    pub unreadable: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub profile: String,
    pub modules: Vec<RenderableModule>,
    pub counts: RenderableCounts,
}
