//! Analyzer configuration
//!
//! Decides which namespaces belong to the analyzed program. Types in an excluded namespace are
//! never modeled, though they may still show up as relationship targets.

/// Namespace roots excluded by default: the platform and framework libraries
pub const DEFAULT_EXCLUDED_NAMESPACES: [&str; 3] = ["System", "Microsoft", "Mono"];

/// Configuration of the relationship analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Namespace prefixes whose types are not modeled.
    ///
    /// Matching is segment aware: `System` excludes `System` and `System.IO`, but not
    /// `Systematic`.
    pub excluded_namespaces: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_namespaces: DEFAULT_EXCLUDED_NAMESPACES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl AnalyzerConfig {
    /// A configuration that excludes no namespace
    ///
    /// Types in the global namespace are still not modeled.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            excluded_namespaces: Vec::new(),
        }
    }

    /// Exclude another namespace prefix
    #[must_use]
    pub fn with_excluded_namespace(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !self.excluded_namespaces.contains(&prefix) {
            self.excluded_namespaces.push(prefix);
        }
        self
    }
}
