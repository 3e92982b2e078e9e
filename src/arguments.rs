use crate::ast::ArgumentType;
use crate::utils::{rfind_top_level, split_top_level};
use regex::Regex;
use std::sync::LazyLock;

/// ArgumentType ::= [ Namespace "." ] Type { Modifier }
/// Modifier     ::= "*" | "@" | "[" { digit | "," | ":" | "?" } "]"
static ARGUMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>.*?)(?P<mods>(?:\*|@|\[[0-9,:?]*\])*)$")
        .expect("argument pattern is a valid regex")
});

/// Splits the text between the parens of a method or indexer reference into
/// its argument types. An empty list yields no arguments; an empty entry
/// (`A,` or `,A`) makes the whole list malformed.
pub fn parse_argument_list(args: &str) -> Option<Vec<ArgumentType>> {
    split_top_level(args, ',')
        .into_iter()
        .map(|arg| {
            let parsed = parse_argument(arg);
            (!parsed.name.is_empty()).then_some(parsed)
        })
        .collect()
}

/// Parses a single argument, e.g. `System.Int32[0:,0:]@`.
pub fn parse_argument(arg: &str) -> ArgumentType {
    let (type_text, modifiers) = match ARGUMENT_PATTERN.captures(arg) {
        Some(caps) => (
            caps.name("type").map_or("", |m| m.as_str()),
            caps.name("mods").map_or("", |m| m.as_str()),
        ),
        None => (arg, ""),
    };

    let (namespace, name) = match rfind_top_level(type_text, '.') {
        Some(dot) => (&type_text[..dot], &type_text[dot + 1..]),
        None => ("", type_text),
    };

    ArgumentType {
        namespace: non_empty(namespace),
        name: name.to_string(),
        modifiers: non_empty(modifiers),
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
