use crate::arguments::{non_empty, parse_argument_list};
use crate::ast::*;
use crate::error::CrefError;
use log::debug;
use miette::NamedSource;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// === Grammars ===
//
// Segment patterns only ever see the text before the first `(`; argument
// lists and return types are matched separately against the remainder.

/// Cref ::= Kind ":" Definition
static CREF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<kind>\w):(?P<def>.*)$"));

/// Namespace ::= Segment { "." Segment }
static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?P<ns>[^.]+(?:\.[^.]+)*)$"));

/// Type ::= [ Namespace "." ] Segment
static TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?:(?P<ns>[^.]+(?:\.[^.]+)*?)\.)?(?P<type>[^.]+)$")
});

/// Member ::= [ Namespace "." ] Segment "." Name
/// Name   ::= Segment without "("
static MEMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?:(?P<ns>[^.]+(?:\.[^.]+)*?)\.)?(?P<type>[^.]+)\.(?P<name>[^.(]+)$")
});

/// MethodTail ::= [ "(" Arguments ")" [ "~" ReturnType ] ]
static METHOD_TAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?:\((?P<args>.*)\)(?:~(?P<ret>.+))?)?$"));

/// PropertyTail ::= [ "(" Arguments ")" ]
static PROPERTY_TAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?:\((?P<args>.*)\))?$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("grammar patterns are valid regexes")
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Why a cref could not be turned into a typed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NoKindPrefix,
    UnknownKind(char),
    GrammarMismatch(ReferenceKind),
}

/// Parses a single cref string. Holds the source text so checked parsing can
/// point diagnostics at it.
#[derive(Debug)]
pub struct Parser<'a> {
    source_text: &'a str,
    name: String,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "cref".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        Self { source_text, name }
    }

    /// Always yields a reference. Malformed text degrades to `Invalid`, an
    /// unrecognized kind letter to `Unknown`.
    #[must_use]
    pub fn parse_reference(&self) -> Reference {
        match self.parse_detailed() {
            Ok(reference) => reference,
            Err(Rejection::UnknownKind(_)) => Reference::Unknown,
            Err(Rejection::NoKindPrefix | Rejection::GrammarMismatch(_)) => Reference::Invalid,
        }
    }

    /// Like [`Parser::parse_reference`], but reports every degraded outcome,
    /// including `!message` notes, as a diagnostic.
    pub fn parse_reference_strict(&self) -> Result<Reference, CrefError> {
        match self.parse_detailed() {
            Ok(Reference::Error(note)) => Err(CrefError::Flagged {
                message: note.message,
            }),
            Ok(reference) => Ok(reference),
            Err(Rejection::NoKindPrefix) => Err(CrefError::Malformed {
                src: self.named_source(),
                span: (0, self.source_text.len()).into(),
            }),
            Err(Rejection::UnknownKind(letter)) => Err(CrefError::UnsupportedKind {
                letter,
                src: self.named_source(),
                span: (0, letter.len_utf8()).into(),
            }),
            Err(Rejection::GrammarMismatch(kind)) => {
                // kind letters are ASCII, so the definition starts after "K:"
                let offset = 2.min(self.source_text.len());
                Err(CrefError::GrammarMismatch {
                    kind,
                    src: self.named_source(),
                    span: (offset, self.source_text.len() - offset).into(),
                })
            }
        }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name.clone(), self.source_text.to_string())
    }

    fn parse_detailed(&self) -> Result<Reference, Rejection> {
        if let Some(rest) = self.source_text.strip_prefix('!') {
            return Ok(Reference::Error(ErrorMessage {
                message: rest.trim_start().to_string(),
            }));
        }

        let caps = CREF_PATTERN
            .captures(self.source_text)
            .ok_or(Rejection::NoKindPrefix)?;
        let letter = group(&caps, "kind").chars().next().unwrap_or_default();
        let definition = group(&caps, "def");

        let kind = ReferenceKind::from_letter(letter);
        let reference = match kind {
            ReferenceKind::Namespace => parse_namespace(definition),
            ReferenceKind::Type => parse_type(definition),
            ReferenceKind::Field => parse_member(definition).map(Reference::Field),
            ReferenceKind::Event => parse_member(definition).map(Reference::Event),
            ReferenceKind::Method => parse_method(definition),
            ReferenceKind::Property => parse_property(definition),
            _ => return Err(Rejection::UnknownKind(letter)),
        };

        reference.ok_or_else(|| {
            debug!("cref definition {definition:?} does not match the {kind} grammar");
            Rejection::GrammarMismatch(kind)
        })
    }
}

/// Parses a cref string into a typed [`Reference`]. Never fails on text input.
#[must_use]
pub fn parse(cref: &str) -> Reference {
    Parser::new(cref).parse_reference()
}

/// Parses an optional cref, failing fast when it is absent.
///
/// # Errors
/// Returns [`CrefError::MissingReference`] if `cref` is `None`.
pub fn try_parse(cref: Option<&str>) -> Result<Reference, CrefError> {
    cref.map(parse).ok_or(CrefError::MissingReference)
}

/// Parses a cref and reports anything other than a namespace, type or member
/// reference as an error.
///
/// # Errors
/// Returns a [`CrefError`] describing why the text is not a usable reference.
pub fn parse_strict(cref: &str) -> Result<Reference, CrefError> {
    Parser::new(cref).parse_reference_strict()
}

/// Splits a definition at its first `(`.
fn split_head(definition: &str) -> (&str, &str) {
    match definition.find('(') {
        Some(i) => definition.split_at(i),
        None => (definition, ""),
    }
}

fn parse_namespace(definition: &str) -> Option<Reference> {
    let caps = NAMESPACE_PATTERN.captures(definition)?;
    Some(Reference::Namespace(NamespaceRef {
        namespace: non_empty(group(&caps, "ns")),
    }))
}

fn parse_type(definition: &str) -> Option<Reference> {
    let caps = TYPE_PATTERN.captures(definition)?;
    Some(Reference::Type(TypeRef {
        namespace: non_empty(group(&caps, "ns")),
        name: group(&caps, "type").to_string(),
    }))
}

fn parse_member(head: &str) -> Option<MemberRef> {
    let caps = MEMBER_PATTERN.captures(head)?;
    Some(MemberRef {
        declaring_type: TypeRef {
            namespace: non_empty(group(&caps, "ns")),
            name: group(&caps, "type").to_string(),
        },
        name: group(&caps, "name").to_string(),
    })
}

fn parse_method(definition: &str) -> Option<Reference> {
    let (head, tail) = split_head(definition);
    let member = parse_member(head)?;
    let caps = METHOD_TAIL_PATTERN.captures(tail)?;
    Some(Reference::Method(MethodRef {
        member,
        arguments: parse_argument_list(group(&caps, "args"))?,
        return_type: non_empty(group(&caps, "ret")),
    }))
}

fn parse_property(definition: &str) -> Option<Reference> {
    let (head, tail) = split_head(definition);
    let member = parse_member(head)?;
    let caps = PROPERTY_TAIL_PATTERN.captures(tail)?;
    Some(Reference::Property(PropertyRef {
        member,
        arguments: parse_argument_list(group(&caps, "args"))?,
    }))
}
