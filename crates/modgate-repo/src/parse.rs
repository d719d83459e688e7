use anyhow::Context;
use modgate_types::ProbePath;
use toml_edit::{DocumentMut, Item, Table};

/// A module descriptor as written on disk.
///
/// Type entries are kept as declared; they are only validated when the module's types are
/// enumerated, so a bad type shows up as a loader fault rather than an unreadable file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub path: ProbePath,
    pub name: String,
    /// Modules every exported type needs.
    pub references: Vec<String>,
    pub types: Vec<TypeDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub namespace: Option<String>,
    pub kind: String,
    pub public: bool,
    pub abstract_: bool,
    pub implements: Vec<String>,
    pub attributes: Vec<String>,
    /// Modules only this type needs.
    pub requires: Vec<String>,
}

pub const DESCRIPTOR_SUFFIX: &str = ".module.toml";

pub fn parse_descriptor(path: &ProbePath, text: &str) -> anyhow::Result<ModuleDescriptor> {
    let doc = text
        .parse::<DocumentMut>()
        .context("parse module descriptor")?;

    let module = doc
        .get("module")
        .and_then(Item::as_table)
        .context("missing [module] table")?;
    let name = module
        .get("name")
        .and_then(Item::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .context("missing [module].name")?
        .to_string();
    let references = string_list(module, "references").context("[module].references")?;

    let mut types = Vec::new();
    match doc.get("types") {
        None => {}
        Some(item) => {
            let tables = item
                .as_array_of_tables()
                .context("`types` must be an array of tables ([[types]])")?;
            for (index, table) in tables.iter().enumerate() {
                types.push(parse_type(table).with_context(|| format!("[[types]] #{}", index + 1))?);
            }
        }
    }

    Ok(ModuleDescriptor {
        path: path.clone(),
        name,
        references,
        types,
    })
}

/// Best-effort module name for a descriptor that failed to parse: the declared name when
/// the TOML is readable, otherwise the file name without its descriptor suffix.
pub fn fallback_module_name(path: &ProbePath, text: &str) -> String {
    let declared = text.parse::<DocumentMut>().ok().and_then(|doc| {
        doc.get("module")
            .and_then(|m| m.get("name"))
            .and_then(Item::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    });
    declared.unwrap_or_else(|| {
        let file = path.file_name();
        file.strip_suffix(DESCRIPTOR_SUFFIX)
            .unwrap_or(file)
            .to_string()
    })
}

fn parse_type(table: &Table) -> anyhow::Result<TypeDecl> {
    Ok(TypeDecl {
        name: optional_str(table, "name")?.unwrap_or_default(),
        namespace: optional_str(table, "namespace")?,
        kind: optional_str(table, "kind")?.unwrap_or_else(|| "class".to_string()),
        public: optional_bool(table, "public")?.unwrap_or(true),
        abstract_: optional_bool(table, "abstract")?.unwrap_or(false),
        implements: string_list(table, "implements")?,
        attributes: string_list(table, "attributes")?,
        requires: string_list(table, "requires")?,
    })
}

fn optional_str(table: &Table, key: &str) -> anyhow::Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_str()
            .map(|s| Some(s.to_string()))
            .with_context(|| format!("`{key}` must be a string")),
    }
}

fn optional_bool(table: &Table, key: &str) -> anyhow::Result<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_bool()
            .map(Some)
            .with_context(|| format!("`{key}` must be a boolean")),
    }
}

fn string_list(table: &Table, key: &str) -> anyhow::Result<Vec<String>> {
    let Some(item) = table.get(key) else {
        return Ok(Vec::new());
    };
    let array = item
        .as_array()
        .with_context(|| format!("`{key}` must be an array of strings"))?;
    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .with_context(|| format!("`{key}` must be an array of strings"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> ProbePath {
        ProbePath::new("plugins/acme.widgets.module.toml")
    }

    #[test]
    fn parses_full_descriptor_with_defaults() {
        let d = parse_descriptor(
            &path(),
            r#"
[module]
name = "acme.widgets"
references = ["acme.core"]

[[types]]
name = "WidgetPlugin"
namespace = "acme.widgets"
implements = ["Plugin"]
attributes = ["Export"]
requires = ["vendor.json"]

[[types]]
name = "IWidget"
kind = "interface"
public = false
abstract = true
"#,
        )
        .expect("parse");

        assert_eq!(d.name, "acme.widgets");
        assert_eq!(d.references, vec!["acme.core"]);
        assert_eq!(d.types.len(), 2);

        let plugin = &d.types[0];
        assert_eq!(plugin.kind, "class");
        assert!(plugin.public);
        assert!(!plugin.abstract_);
        assert_eq!(plugin.namespace.as_deref(), Some("acme.widgets"));
        assert_eq!(plugin.implements, vec!["Plugin"]);
        assert_eq!(plugin.attributes, vec!["Export"]);
        assert_eq!(plugin.requires, vec!["vendor.json"]);

        let iface = &d.types[1];
        assert_eq!(iface.kind, "interface");
        assert!(!iface.public);
        assert!(iface.abstract_);
    }

    #[test]
    fn unknown_kind_is_kept_for_enumeration_time() {
        let d = parse_descriptor(
            &path(),
            "[module]\nname = \"m\"\n[[types]]\nname = \"D\"\nkind = \"delegate\"\n",
        )
        .expect("parse");
        assert_eq!(d.types[0].kind, "delegate");
    }

    #[test]
    fn structural_errors_are_reported() {
        for (text, needle) in [
            ("not toml = = =", "parse module descriptor"),
            ("[other]\nname = \"x\"", "missing [module] table"),
            ("[module]\nname = \"  \"", "missing [module].name"),
            ("[module]\nname = \"m\"\nreferences = \"acme\"", "[module].references"),
            ("types = 3\n[module]\nname = \"m\"", "array of tables"),
            (
                "[module]\nname = \"m\"\n[[types]]\nname = \"T\"\npublic = \"yes\"",
                "`public` must be a boolean",
            ),
        ] {
            let err = parse_descriptor(&path(), text).unwrap_err();
            assert!(
                format!("{err:#}").contains(needle),
                "{text:?} should fail with {needle:?}, got {err:#}"
            );
        }
    }

    #[test]
    fn fallback_name_prefers_declared_name() {
        assert_eq!(
            fallback_module_name(&path(), "types = 3\n[module]\nname = \"declared\""),
            "declared"
        );
        assert_eq!(
            fallback_module_name(&path(), "garbage = = ="),
            "acme.widgets"
        );
    }
}
