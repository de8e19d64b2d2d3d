//! Namespace scoping: which types belong to the analyzed program.

use crate::config::AnalyzerConfig;

/// Decides by namespace whether a type belongs to the analyzed program
#[derive(Debug, Clone, Copy)]
pub struct NamespaceFilter<'a> {
    excluded: &'a [String],
}

impl<'a> NamespaceFilter<'a> {
    /// Create a filter excluding the namespaces configured in `config`
    #[must_use]
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        NamespaceFilter {
            excluded: &config.excluded_namespaces,
        }
    }

    /// True if types in `namespace` are part of the program.
    ///
    /// The global (empty) namespace is never in scope; neither is any namespace equal to an
    /// excluded prefix or nested below one.
    #[must_use]
    pub fn is_in_scope(&self, namespace: &str) -> bool {
        if namespace.is_empty() {
            return false;
        }

        !self.excluded.iter().any(|prefix| {
            namespace
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }
}
