use crate::ast::{ArgumentType, Reference};
use crate::parser::parse;
use crate::resolver::{DocumentationSource, Resolver};
use crate::utils::strip_arity_markers;
use serde::Deserialize;

/// Returned by [`CrefFormatter::label`] for references that name nothing.
pub const UNKNOWN_KIND_OF_MEMBER: &str = "UNKNOWN_KIND_OF_MEMBER";

// === Field accessors ===

/// The note of a `!message` reference.
#[must_use]
pub fn error_message(cref: &str) -> Option<String> {
    parse(cref).error_message().map(String::from)
}

/// The namespace of a namespace, type or member reference.
#[must_use]
pub fn namespace(cref: &str) -> Option<String> {
    parse(cref).namespace().map(String::from)
}

/// The type name (arity marker included) of a type reference, or of the
/// declaring type of a member reference.
#[must_use]
pub fn type_name(cref: &str) -> Option<String> {
    parse(cref).type_name().map(String::from)
}

/// The member name of a field, method, property or event reference.
#[must_use]
pub fn member_name(cref: &str) -> Option<String> {
    parse(cref).member_name().map(String::from)
}

/// Escapes the angle brackets of generic names for Markdown output.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

// === Formatting ===

/// Naming scheme for generated pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub file_name_extension: String,
    pub url_base: String,
    pub url_file_name_extension: String,
    /// Prepended to namespace page names, e.g. `ns_`.
    pub namespace_file_prefix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            file_name_extension: ".md".to_string(),
            url_base: String::new(),
            url_file_name_extension: ".html".to_string(),
            namespace_file_prefix: String::new(),
        }
    }
}

impl FormatOptions {
    /// Reads options from JSON; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if the text is not a valid options object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads options from YAML; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if the text is not a valid options mapping.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// Turns crefs into labels, file names and URLs for generated documentation.
///
/// Generic arity markers in type labels are resolved against the
/// documentation sources added with [`CrefFormatter::with_source`], searched
/// in the order they were added.
#[derive(Default)]
pub struct CrefFormatter<'a> {
    options: FormatOptions,
    resolver: Resolver<'a>,
}

impl<'a> CrefFormatter<'a> {
    pub fn new(options: FormatOptions) -> Self {
        CrefFormatter {
            options,
            resolver: Resolver::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: &'a dyn DocumentationSource) -> Self {
        self.resolver.add_source(source);
        self
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Short display name: the namespace, the type name without namespace, or
    /// the bare member name.
    #[must_use]
    pub fn label(&self, cref: &str) -> String {
        match parse(cref) {
            Reference::Namespace(ns) => ns.namespace.unwrap_or_default(),
            Reference::Type(t) => {
                let full = self.resolver.resolve(&t.full_name());
                let Some(ns) = t.namespace else {
                    return full;
                };
                // markers resolve by prefix, so the resolved namespace leads the full name
                let resolved_ns = self.resolver.resolve(&ns);
                full.get(resolved_ns.len() + 1..)
                    .unwrap_or_default()
                    .to_string()
            }
            reference => self.member_label(&reference),
        }
    }

    /// Like [`CrefFormatter::label`], but type labels keep their namespace.
    #[must_use]
    pub fn full_label(&self, cref: &str) -> String {
        match parse(cref) {
            Reference::Type(t) => self.resolver.resolve(&t.full_name()),
            _ => self.label(cref),
        }
    }

    /// The label followed by the argument list: always for methods, and for
    /// properties only when they are indexers.
    #[must_use]
    pub fn signature(&self, cref: &str) -> String {
        match parse(cref) {
            Reference::Method(m) => {
                format!("{}{}", m.member.name, self.format_arguments(&m.arguments))
            }
            Reference::Property(p) if !p.arguments.is_empty() => {
                format!("{}{}", p.member.name, self.format_arguments(&p.arguments))
            }
            _ => self.label(cref),
        }
    }

    /// Renders `(Type1, Type2*)` from an argument list, namespaces dropped.
    #[must_use]
    pub fn format_arguments(&self, arguments: &[ArgumentType]) -> String {
        let rendered: Vec<String> = arguments.iter().map(ArgumentType::short_name).collect();
        format!("({})", rendered.join(", "))
    }

    #[must_use]
    pub fn escape_markdown(&self, text: &str) -> String {
        escape_markdown(text)
    }

    /// Page file name for namespace and type references, arity markers
    /// dropped. Members live on their declaring type's page and have none of
    /// their own.
    #[must_use]
    pub fn file_name(&self, cref: &str) -> Option<String> {
        let stem = self.page_stem(&parse(cref))?;
        Some(format!("{stem}{}", self.options.file_name_extension))
    }

    /// Link target: the page URL for namespaces and types, the declaring
    /// type's page with a `#member` anchor for members.
    #[must_use]
    pub fn url(&self, cref: &str) -> Option<String> {
        let reference = parse(cref);
        let page = match &reference {
            Reference::Namespace(_) | Reference::Type(_) => self.page_stem(&reference)?,
            _ => strip_arity_markers(&reference.declaring_type()?.full_name()),
        };
        let url = format!(
            "{}{page}{}",
            self.options.url_base, self.options.url_file_name_extension
        );
        match reference.member_name() {
            Some(member) => Some(format!("{url}#{member}")),
            None => Some(url),
        }
    }

    fn page_stem(&self, reference: &Reference) -> Option<String> {
        match reference {
            Reference::Namespace(ns) => Some(format!(
                "{}{}",
                self.options.namespace_file_prefix,
                ns.namespace.as_deref().unwrap_or_default()
            )),
            Reference::Type(t) => Some(strip_arity_markers(&t.full_name())),
            _ => None,
        }
    }

    fn member_label(&self, reference: &Reference) -> String {
        reference
            .member_name()
            .unwrap_or(UNKNOWN_KIND_OF_MEMBER)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_tree::DocTree;

    #[test]
    fn test_label_per_kind() {
        let f = CrefFormatter::default();
        assert_eq!(f.label("N:Aa.Bb"), "Aa.Bb");
        assert_eq!(f.label("T:A.B.C"), "C");
        assert_eq!(f.label("F:A.B.f"), "f");
        assert_eq!(f.label("M:A.B.x"), "x");
        assert_eq!(f.label("P:A.B.Item(System.Int32)"), "Item");
        assert_eq!(f.label("E:A.B.Changed"), "Changed");
        assert_eq!(f.label("X:A"), UNKNOWN_KIND_OF_MEMBER);
        assert_eq!(f.label("! note"), UNKNOWN_KIND_OF_MEMBER);
        assert_eq!(f.label("garbage"), UNKNOWN_KIND_OF_MEMBER);
    }

    #[test]
    fn test_type_label_with_nested_generics() {
        let tree = DocTree::new()
            .with_type("A.Outer`1", ["TOuter"])
            .with_type("A.Outer`1.Inner`2", ["TKey", "TValue"]);
        let f = CrefFormatter::default().with_source(&tree);
        assert_eq!(f.label("T:A.Outer`1.Inner`2"), "Inner<TKey,TValue>");
        assert_eq!(
            f.full_label("T:A.Outer`1.Inner`2"),
            "A.Outer<TOuter>.Inner<TKey,TValue>"
        );
    }

    #[test]
    fn test_type_label_keeps_lookup_keyed_by_full_prefix() {
        let tree = DocTree::new()
            .with_type("C`2", ["TWrong", "TWrong2"])
            .with_type("A.B`1.C`2", ["TKey", "TValue"]);
        let f = CrefFormatter::default().with_source(&tree);
        assert_eq!(f.label("T:A.B`1.C`2"), "C<TKey,TValue>");
        assert_eq!(f.label("T:A.C`2"), "C<T1,T2>");
    }

    #[test]
    fn test_signature() {
        let f = CrefFormatter::default();
        assert_eq!(f.signature("M:A.B.x"), "x()");
        assert_eq!(
            f.signature("M:A.B.x``1(System.Int32[],A.B@,``0)"),
            "x``1(Int32[], B@, ``0)"
        );
        assert_eq!(f.signature("P:A.B.Item(System.String)"), "Item(String)");
        assert_eq!(f.signature("P:A.B.Count"), "Count");
        assert_eq!(f.signature("T:A.B"), "B");
    }

    #[test]
    fn test_file_name_prefix() {
        let options = FormatOptions {
            namespace_file_prefix: "ns_".to_string(),
            ..FormatOptions::default()
        };
        let f = CrefFormatter::new(options);
        assert_eq!(f.file_name("N:Abc.Def").as_deref(), Some("ns_Abc.Def.md"));
        assert_eq!(f.file_name("T:Abc.Def").as_deref(), Some("Abc.Def.md"));
    }

    #[test]
    fn test_options_from_json_keeps_defaults() {
        let options = FormatOptions::from_json(r#"{ "url_base": "https://docs.example/" }"#).unwrap();
        assert_eq!(options.url_base, "https://docs.example/");
        assert_eq!(options.file_name_extension, ".md");
        assert_eq!(options.url_file_name_extension, ".html");
    }
}
