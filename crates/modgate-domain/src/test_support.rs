use crate::fault::{LoaderFault, TypeLoadError};
use crate::model::{CandidateModule, TypeDescriptor};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory module whose type enumeration either succeeds or fails with fixed faults.
#[derive(Clone, Debug)]
pub struct StubModule {
    pub name: String,
    pub types: Result<Vec<TypeDescriptor>, Vec<LoaderFault>>,
}

impl StubModule {
    pub fn with_types(name: &str, types: Vec<TypeDescriptor>) -> Self {
        StubModule {
            name: name.to_string(),
            types: Ok(types),
        }
    }

    pub fn with_faults(name: &str, faults: Vec<LoaderFault>) -> Self {
        StubModule {
            name: name.to_string(),
            types: Err(faults),
        }
    }
}

impl CandidateModule for StubModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn exported_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError> {
        match &self.types {
            Ok(types) => Ok(types.clone()),
            Err(faults) => Err(TypeLoadError::new(self.name.clone(), faults.clone())),
        }
    }
}

/// Public concrete classes named `T1..=Tn`.
pub fn classes(n: usize) -> Vec<TypeDescriptor> {
    (1..=n)
        .map(|i| TypeDescriptor::class(&format!("T{i}")))
        .collect()
}

pub fn implementing(name: &str, interface: &str) -> TypeDescriptor {
    let mut t = TypeDescriptor::class(name);
    t.implements.push(interface.to_string());
    t
}

pub fn not_found(dependency: &str, message: &str) -> LoaderFault {
    LoaderFault::DependencyNotFound {
        dependency: Some(dependency.to_string()),
        message: message.to_string(),
    }
}

pub fn load_failed(dependency: Option<&str>, message: &str) -> LoaderFault {
    LoaderFault::DependencyLoadFailed {
        dependency: dependency.map(str::to_string),
        message: message.to_string(),
    }
}

/// Records every type name a predicate was invoked with.
#[derive(Debug, Default)]
pub struct CallLog {
    count: AtomicUsize,
    seen: std::sync::Mutex<Vec<String>>,
}

impl CallLog {
    pub fn record(&self, t: &TypeDescriptor) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("call log poisoned")
            .push(t.name.clone());
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("call log poisoned").clone()
    }
}
