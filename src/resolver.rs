use crate::utils::find_arity_markers;
use log::trace;

/// A documentation tree that can answer which type parameters a type declares.
///
/// Implementations are supplied by the caller, already loaded. See
/// [`crate::doc_tree::DocTree`] for the in-memory one.
pub trait DocumentationSource {
    /// Declared type-parameter names, in document order, of the first
    /// type-level entry whose name equals `type_name` (e.g. ``Lib.Pair`2``).
    fn type_parameters(&self, type_name: &str) -> Option<Vec<String>>;
}

/// Rewrites generic arity markers into parameter lists, e.g. ``Lib.Pair`2``
/// into `Lib.Pair<TKey,TValue>`.
///
/// Sources are searched in the order they were added. Every lookup scans the
/// sources again; nothing is cached.
#[derive(Default)]
pub struct Resolver<'a> {
    sources: Vec<&'a dyn DocumentationSource>,
}

impl<'a> Resolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(sources: Vec<&'a dyn DocumentationSource>) -> Self {
        Resolver { sources }
    }

    #[must_use]
    pub fn with_source(mut self, source: &'a dyn DocumentationSource) -> Self {
        self.add_source(source);
        self
    }

    pub fn add_source(&mut self, source: &'a dyn DocumentationSource) {
        self.sources.push(source);
    }

    /// Replaces each `` `N `` marker in `name` with `<P1,..,PN>`. Each marker is
    /// looked up by the name prefix ending at that marker; missing or
    /// undeclared parameters become `T<position>`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> String {
        let mut resolved = String::with_capacity(name.len());
        let mut copied = 0;

        for marker in find_arity_markers(name) {
            resolved.push_str(&name[copied..marker.start]);
            copied = marker.end;

            let prefix = &name[..marker.end];
            let declared = self.lookup(prefix).unwrap_or_default();
            trace!(
                "{prefix}: arity {}, {} declared type parameter(s)",
                marker.arity,
                declared.len()
            );
            if marker.arity == 0 {
                continue;
            }

            let parameters: Vec<String> = (0..marker.arity)
                .map(|i| {
                    declared
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("T{}", i + 1))
                })
                .collect();
            resolved.push('<');
            resolved.push_str(&parameters.join(","));
            resolved.push('>');
        }

        resolved.push_str(&name[copied..]);
        resolved
    }

    fn lookup(&self, type_name: &str) -> Option<Vec<String>> {
        self.sources
            .iter()
            .find_map(|source| source.type_parameters(type_name))
    }
}

/// Convenience wrapper around [`Resolver::resolve`].
#[must_use]
pub fn resolve_generic_arity(name: &str, sources: &[&dyn DocumentationSource]) -> String {
    Resolver::with_sources(sources.to_vec()).resolve(name)
}
