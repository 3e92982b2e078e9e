use crate::error::DocError;
use crate::resolver::DocumentationSource;
use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// A documented type: its fully qualified name (arity marker included, no
/// `T:` prefix) and its declared type parameters in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: String,
    pub type_parameters: Vec<String>,
}

/// The type-level entries of one documentation file, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocTree {
    entries: Vec<TypeEntry>,
}

impl DocTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper, mostly for tests and programmatic trees.
    #[must_use]
    pub fn with_type<I, S>(mut self, name: &str, type_parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(TypeEntry {
            name: name.to_string(),
            type_parameters: type_parameters.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn push(&mut self, entry: TypeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    /// The first entry whose declared name equals `name`.
    pub fn find_type(&self, name: &str) -> Option<&TypeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Reads the `T:` members of an XML documentation file:
    ///
    /// ```xml
    /// <doc><members>
    ///   <member name="T:Lib.Pair`2"><typeparam name="TKey"/><typeparam name="TValue"/></member>
    /// </members></doc>
    /// ```
    ///
    /// Members of other kinds are skipped.
    ///
    /// # Errors
    /// Returns a [`DocError::Xml`] if the text is not well-formed XML.
    pub fn from_xml(xml: &str) -> Result<Self, DocError> {
        let mut reader = Reader::from_str(xml);
        let mut tree = DocTree::new();
        let mut current: Option<TypeEntry> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"member" => {
                    current = type_entry(&e)?;
                }
                Event::Empty(e) if e.name().as_ref() == b"member" => {
                    if let Some(entry) = type_entry(&e)? {
                        tree.push(entry);
                    }
                }
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"typeparam" => {
                    if let Some(entry) = current.as_mut() {
                        match attribute(&e, b"name")? {
                            Some(name) => entry.type_parameters.push(name),
                            None => warn!("<typeparam> without a name in {}", entry.name),
                        }
                    }
                }
                Event::End(e) if e.name().as_ref() == b"member" => {
                    if let Some(entry) = current.take() {
                        tree.push(entry);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(tree)
    }

    /// Reads an XML documentation file from disk. See [`DocTree::from_xml`].
    ///
    /// # Errors
    /// Returns a [`DocError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocError> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }
}

impl DocumentationSource for DocTree {
    fn type_parameters(&self, type_name: &str) -> Option<Vec<String>> {
        self.find_type(type_name)
            .map(|entry| entry.type_parameters.clone())
    }
}

fn type_entry(element: &BytesStart<'_>) -> Result<Option<TypeEntry>, DocError> {
    let Some(name) = attribute(element, b"name")? else {
        warn!("skipping <member> without a name attribute");
        return Ok(None);
    };
    Ok(name.strip_prefix("T:").map(|type_name| TypeEntry {
        name: type_name.to_string(),
        type_parameters: Vec::new(),
    }))
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, DocError> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_type_returns_first_match() {
        let tree = DocTree::new()
            .with_type("A.B`1", ["TFirst"])
            .with_type("A.B`1", ["TSecond"]);
        assert_eq!(tree.find_type("A.B`1").unwrap().type_parameters, vec!["TFirst"]);
        assert!(tree.find_type("A.B").is_none());
    }

    #[test]
    fn test_from_xml() {
        let xml = r#"<?xml version="1.0"?>
<doc>
    <assembly><name>Library.With.Dot</name></assembly>
    <members>
        <member name="T:Library.With.Dot.GenericInnerClass`1">
            <summary>A generic class.</summary>
            <typeparam name="TItem">The item type.</typeparam>
        </member>
        <member name="M:Library.With.Dot.GenericInnerClass`1.Add``1(`0,``0)">
            <typeparam name="TOther">Not a type-level parameter.</typeparam>
        </member>
        <member name="T:Library.With.Dot.Pair`2">
            <typeparam name="TKey"/>
            <typeparam name="TValue"/>
        </member>
        <member name="T:Library.With.Dot.SimpleType"/>
    </members>
</doc>"#;
        let tree = DocTree::from_xml(xml).unwrap();
        assert_eq!(tree.entries().len(), 3);
        assert_eq!(
            tree.type_parameters("Library.With.Dot.GenericInnerClass`1"),
            Some(vec!["TItem".to_string()])
        );
        assert_eq!(
            tree.type_parameters("Library.With.Dot.Pair`2"),
            Some(vec!["TKey".to_string(), "TValue".to_string()])
        );
        assert_eq!(tree.type_parameters("Library.With.Dot.SimpleType"), Some(vec![]));
    }

    #[test]
    fn test_from_xml_rejects_broken_markup() {
        let result = DocTree::from_xml("<doc><members><member name=\"T:A\"></doc>");
        assert!(matches!(result, Err(DocError::Xml(_))));
    }
}
