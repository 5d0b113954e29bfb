//! Route table: URL path prefix → upstream API base URL.
//!
//! # Responsibilities
//! - Hold the ordered prefix → upstream mapping
//! - Match a request path against the table (first match wins)
//! - Split the path into matched prefix and verbatim remainder
//!
//! # Design Decisions
//! - Matching is byte-wise `starts_with`, not segment-aware
//! - The remainder keeps any leading slash exactly as received
//! - Immutable after construction (thread-safe without locks)

/// Compiled-in route table, in match order.
const BUILTIN_ROUTES: &[(&str, &str)] = &[
    ("/discord", "https://discord.com/api"),
    ("/telegram", "https://api.telegram.org"),
    ("/openai", "https://api.openai.com"),
    ("/claude", "https://api.anthropic.com"),
    ("/gemini", "https://generativelanguage.googleapis.com"),
    ("/meta", "https://www.meta.ai/api"),
    ("/groq", "https://api.groq.com"),
    ("/x", "https://api.x.ai"),
    ("/cohere", "https://api.cohere.ai"),
    ("/huggingface", "https://api-inference.huggingface.co"),
    ("/together", "https://api.together.xyz"),
    ("/novita", "https://api.novita.ai"),
    ("/portkey", "https://api.portkey.ai"),
    ("/fireworks", "https://api.fireworks.ai"),
    ("/openrouter", "https://openrouter.ai/api"),
];

/// Result of a successful prefix match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The table prefix that matched.
    pub prefix: &'a str,
    /// Upstream base URL the prefix maps to.
    pub upstream: &'a str,
    /// Path remainder after the prefix, verbatim.
    pub rest: &'a str,
}

/// Ordered, immutable mapping from path prefix to upstream base URL.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(String, String)>,
}

impl RouteTable {
    /// Build a table from explicit entries. Order is match order.
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// The compiled-in production table.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ROUTES
                .iter()
                .map(|(prefix, upstream)| (prefix.to_string(), upstream.to_string()))
                .collect(),
        )
    }

    /// Find the first entry whose prefix is a literal prefix of `path`.
    ///
    /// Returns the matched prefix, its upstream base URL, and the path
    /// remainder exactly as it appeared after the prefix.
    pub fn match_path<'a>(&'a self, path: &'a str) -> Option<RouteMatch<'a>> {
        for (prefix, upstream) in &self.entries {
            if path.starts_with(prefix.as_str()) {
                return Some(RouteMatch {
                    prefix,
                    upstream,
                    rest: &path[prefix.len()..],
                });
            }
        }
        None
    }

    /// Iterate over `(prefix, upstream)` pairs in match order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(prefix, upstream)| (prefix.as_str(), upstream.as_str()))
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}
