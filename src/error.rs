use crate::ast::ReferenceKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CrefError {
    #[error("Missing reference")]
    #[diagnostic(
        code(cref::missing_reference),
        help("A cref is required here. Check that the `cref` attribute is present.")
    )]
    MissingReference,

    #[error("Malformed reference")]
    #[diagnostic(
        code(cref::malformed),
        help("A cref has the shape `<kind>:<definition>`, e.g. `T:System.String`.")
    )]
    Malformed {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected a kind letter followed by ':'")]
        span: SourceSpan,
    },

    #[error("Unsupported reference kind '{letter}'")]
    #[diagnostic(
        code(cref::unsupported_kind),
        help("Supported kinds are N, T, F, P, M and E.")
    )]
    UnsupportedKind {
        letter: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("Unknown kind letter")]
        span: SourceSpan,
    },

    #[error("Definition does not match the {kind} grammar")]
    #[diagnostic(
        code(cref::grammar_mismatch),
        help("The text after the kind prefix does not have the segments this kind requires.")
    )]
    GrammarMismatch {
        kind: ReferenceKind,
        #[source_code]
        src: NamedSource<String>,
        #[label("This definition")]
        span: SourceSpan,
    },

    #[error("Reference flagged by the compiler: {message}")]
    #[diagnostic(
        code(cref::flagged),
        help("The compiler could not resolve this reference and left a note instead.")
    )]
    Flagged {
        message: String,
    },
}

#[derive(Error, Debug, Diagnostic)]
pub enum DocError {
    #[error("Failed to read documentation XML")]
    #[diagnostic(code(doc::xml))]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to read documentation file")]
    #[diagnostic(code(doc::io))]
    Io(#[from] std::io::Error),
}
