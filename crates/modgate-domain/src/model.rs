use crate::fault::TypeLoadError;

/// A loadable unit of code that has been located but not yet admitted.
///
/// Enumerating exported types may fail part way when some types cannot be resolved; the
/// error then lists one sub-fault per type that failed.
pub trait CandidateModule {
    fn name(&self) -> &str;

    fn exported_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
}

impl TypeKind {
    pub fn parse(s: &str) -> Option<TypeKind> {
        match s {
            "class" => Some(TypeKind::Class),
            "interface" => Some(TypeKind::Interface),
            "struct" => Some(TypeKind::Struct),
            "enum" => Some(TypeKind::Enum),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
        }
    }
}

/// One type exported by a candidate module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub namespace: Option<String>,
    pub kind: TypeKind,
    pub public: bool,
    pub abstract_: bool,
    /// Interface names this type implements.
    pub implements: Vec<String>,
    /// Marker attribute names applied to this type.
    pub attributes: Vec<String>,
}

impl TypeDescriptor {
    /// A public, concrete class named `name` with nothing else attached.
    pub fn class(name: &str) -> Self {
        TypeDescriptor {
            name: name.to_string(),
            namespace: None,
            kind: TypeKind::Class,
            public: true,
            abstract_: false,
            implements: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    /// Public, non-abstract and not an interface: something a host could instantiate.
    pub fn is_instantiable(&self) -> bool {
        self.public && !self.abstract_ && self.kind != TypeKind::Interface
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.implements.iter().any(|i| i == interface)
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

/// Outcome of evaluating a criterion against a module (or a predicate against a type).
///
/// Complaints are only carried by a rejection and keep insertion order; callers display
/// them verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected { complaints: Vec<String> },
}

impl Admission {
    pub fn rejected<I, S>(complaints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Admission::Rejected {
            complaints: complaints.into_iter().map(Into::into).collect(),
        }
    }

    /// Rejection without any reason attached.
    pub fn silent_rejection() -> Self {
        Admission::Rejected {
            complaints: Vec::new(),
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }

    pub fn complaints(&self) -> &[String] {
        match self {
            Admission::Admitted => &[],
            Admission::Rejected { complaints } => complaints,
        }
    }
}
