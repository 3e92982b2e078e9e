use cref_core::doc_tree::DocTree;
use cref_core::resolver::{resolve_generic_arity, DocumentationSource, Resolver};
use cref_core::CrefFormatter;
use std::io::Write;

const LIBRARY_DOC: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>Library.With.Dot</name>
    </assembly>
    <members>
        <member name="T:Library.With.Dot.GenericInnerClass`1">
            <summary>A generic class with a nested generic type.</summary>
            <typeparam name="TOuter">Outer parameter.</typeparam>
        </member>
        <member name="T:Library.With.Dot.GenericInnerClass`1.Inner`2">
            <typeparam name="TKey">Key.</typeparam>
            <typeparam name="TValue">Value.</typeparam>
        </member>
        <member name="M:Library.With.Dot.GenericInnerClass`1.Get``1(`0)">
            <typeparam name="TResult">Method-level, not used for types.</typeparam>
        </member>
        <member name="T:Library.With.Dot.SimpleType">
            <summary>No type parameters.</summary>
        </member>
    </members>
</doc>"#;

#[test]
fn test_resolve_against_loaded_documentation() {
    let tree = DocTree::from_xml(LIBRARY_DOC).unwrap();
    let resolver = Resolver::new().with_source(&tree);
    assert_eq!(
        resolver.resolve("Library.With.Dot.GenericInnerClass`1.Inner`2"),
        "Library.With.Dot.GenericInnerClass<TOuter>.Inner<TKey,TValue>"
    );
    assert_eq!(
        resolver.resolve("Library.With.Dot.SimpleType"),
        "Library.With.Dot.SimpleType"
    );
}

#[test]
fn test_unknown_types_get_positional_names() {
    let tree = DocTree::from_xml(LIBRARY_DOC).unwrap();
    let sources: Vec<&dyn DocumentationSource> = vec![&tree];
    assert_eq!(resolve_generic_arity("Other.Map`2", &sources), "Other.Map<T1,T2>");
}

#[test]
fn test_declared_parameters_are_truncated_to_arity() {
    let tree = DocTree::new().with_type("A.B`1", ["TFirst", "TExtra"]);
    let sources: Vec<&dyn DocumentationSource> = vec![&tree];
    assert_eq!(resolve_generic_arity("A.B`1", &sources), "A.B<TFirst>");
}

#[test]
fn test_missing_outer_entry_does_not_stop_inner_resolution() {
    let tree = DocTree::new().with_type("A.Outer`1.Inner`1", ["TInner"]);
    let sources: Vec<&dyn DocumentationSource> = vec![&tree];
    assert_eq!(
        resolve_generic_arity("A.Outer`1.Inner`1", &sources),
        "A.Outer<T1>.Inner<TInner>"
    );
}

#[test]
fn test_repeated_calls_are_stable() {
    let tree = DocTree::new().with_type("A.B`1", ["TItem"]);
    let resolver = Resolver::new().with_source(&tree);
    let first = resolver.resolve("A.B`1");
    assert_eq!(first, resolver.resolve("A.B`1"));
}

#[test]
fn test_load_documentation_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LIBRARY_DOC.as_bytes()).unwrap();

    let tree = DocTree::from_path(file.path()).unwrap();
    let f = CrefFormatter::default().with_source(&tree);
    assert_eq!(
        f.label("T:Library.With.Dot.GenericInnerClass`1.Inner`2"),
        "Inner<TKey,TValue>"
    );
    assert_eq!(
        f.full_label("T:Library.With.Dot.GenericInnerClass`1"),
        "Library.With.Dot.GenericInnerClass<TOuter>"
    );
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DocTree::from_path(dir.path().join("missing.xml"));
    assert!(matches!(result, Err(cref_core::error::DocError::Io(_))));
}
