use serde::Serialize;
use std::fmt::Display;

/// The kind of a parsed member reference, as selected by its prefix letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceKind {
    Unknown,
    Invalid,
    Error,
    Namespace,
    Type,
    Field,
    Method,
    Property,
    Event,
}

impl ReferenceKind {
    /// Maps a cref prefix letter to its kind. Letters outside `N,T,F,P,M,E` are `Unknown`.
    #[must_use]
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'N' => ReferenceKind::Namespace,
            'T' => ReferenceKind::Type,
            'F' => ReferenceKind::Field,
            'P' => ReferenceKind::Property,
            'M' => ReferenceKind::Method,
            'E' => ReferenceKind::Event,
            _ => ReferenceKind::Unknown,
        }
    }
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReferenceKind::Unknown => "unknown",
            ReferenceKind::Invalid => "invalid",
            ReferenceKind::Error => "error",
            ReferenceKind::Namespace => "namespace",
            ReferenceKind::Type => "type",
            ReferenceKind::Field => "field",
            ReferenceKind::Method => "method",
            ReferenceKind::Property => "property",
            ReferenceKind::Event => "event",
        };
        f.write_str(name)
    }
}

/// A parsed cref. Exactly one variant per [`ReferenceKind`].
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum Reference {
    Unknown,
    Invalid,
    Error(ErrorMessage),
    Namespace(NamespaceRef),
    Type(TypeRef),
    Field(MemberRef),
    Method(MethodRef),
    Property(PropertyRef),
    Event(MemberRef),
}

/// A note emitted by upstream tooling for a reference it could not resolve (`!message`).
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct NamespaceRef {
    pub namespace: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct TypeRef {
    pub namespace: Option<String>,
    /// The type name, arity marker included (e.g. ``List`1``).
    pub name: String,
}

impl TypeRef {
    /// `<namespace>.<name>`, or just the name when there is no namespace.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_qualified(self.namespace.as_deref(), &self.name)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MemberRef {
    pub declaring_type: TypeRef,
    pub name: String,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MethodRef {
    pub member: MemberRef,
    pub arguments: Vec<ArgumentType>,
    /// Only present for conversion operators (`op_Implicit`, `op_Explicit`).
    pub return_type: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PropertyRef {
    pub member: MemberRef,
    /// Indexer parameters; empty for plain properties.
    pub arguments: Vec<ArgumentType>,
}

/// One entry of a method or indexer argument list.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ArgumentType {
    pub namespace: Option<String>,
    pub name: String,
    /// Pointer (`*`), by-reference (`@`) and array (`[..]`) annotations, in source order.
    pub modifiers: Option<String>,
}

impl ArgumentType {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_qualified(self.namespace.as_deref(), &self.name)
    }

    /// The type name followed by its modifiers, without namespace.
    #[must_use]
    pub fn short_name(&self) -> String {
        format!("{}{}", self.name, self.modifiers.as_deref().unwrap_or(""))
    }
}

impl Reference {
    #[must_use]
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Reference::Unknown => ReferenceKind::Unknown,
            Reference::Invalid => ReferenceKind::Invalid,
            Reference::Error(_) => ReferenceKind::Error,
            Reference::Namespace(_) => ReferenceKind::Namespace,
            Reference::Type(_) => ReferenceKind::Type,
            Reference::Field(_) => ReferenceKind::Field,
            Reference::Method(_) => ReferenceKind::Method,
            Reference::Property(_) => ReferenceKind::Property,
            Reference::Event(_) => ReferenceKind::Event,
        }
    }

    /// The namespace carried by namespace, type and member references.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Reference::Namespace(ns) => ns.namespace.as_deref(),
            _ => self.declaring_type()?.namespace.as_deref(),
        }
    }

    /// The type of a type reference, or the declaring type of a member reference.
    #[must_use]
    pub fn declaring_type(&self) -> Option<&TypeRef> {
        match self {
            Reference::Type(t) => Some(t),
            _ => self.member().map(|m| &m.declaring_type),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.declaring_type().map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn member(&self) -> Option<&MemberRef> {
        match self {
            Reference::Field(m) | Reference::Event(m) => Some(m),
            Reference::Method(m) => Some(&m.member),
            Reference::Property(p) => Some(&p.member),
            _ => None,
        }
    }

    #[must_use]
    pub fn member_name(&self) -> Option<&str> {
        self.member().map(|m| m.name.as_str())
    }

    /// Argument list of methods and properties; `None` for every other kind.
    #[must_use]
    pub fn arguments(&self) -> Option<&[ArgumentType]> {
        match self {
            Reference::Method(m) => Some(&m.arguments),
            Reference::Property(p) => Some(&p.arguments),
            _ => None,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Reference::Error(e) => Some(&e.message),
            _ => None,
        }
    }
}

pub(crate) fn join_qualified(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{ns}.{name}"),
        None => name.to_string(),
    }
}
