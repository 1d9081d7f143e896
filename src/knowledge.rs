//! Keyword knowledge base and query resolution
//!
//! Maps free-text questions to canned explanations. Matching is plain
//! case-insensitive substring containment over a fixed table; the first
//! entry (in declaration order) with any matching keyword wins.

mod entries;

#[cfg(test)]
mod proptests;

pub use entries::KNOWLEDGE_BASE;

use serde::Serialize;

/// Content returned when no keyword matches
pub const FALLBACK_CONTENT: &str = "I understand you're asking about a financial topic. While I have extensive knowledge about banking, investments, loans, and fraud prevention, I'd like to provide you with the most accurate and relevant information.

Could you please rephrase your question or be more specific about what aspect of finance you'd like to learn about? For example:
• Banking products and services
• Investment strategies
• Loan types and requirements
• Fraud prevention and security
• Credit and debt management

This will help me give you a comprehensive answer with proper sources.";

/// Sources attached to the fallback content
pub const FALLBACK_SOURCES: &[&str] = &[
    "Consumer Financial Protection Bureau",
    "Federal Reserve Educational Resources",
];

/// Starter questions offered to a fresh conversation
pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What is a phishing scam?",
    "Explain credit default swap in simple terms",
    "How can I secure my online banking?",
    "What's the difference between APR and interest rate?",
    "How do I identify fraudulent transactions?",
];

/// A static keyword entry
#[derive(Debug)]
pub struct KnowledgeEntry {
    /// Lowercase trigger phrases
    pub keywords: &'static [&'static str],
    pub response: &'static str,
    pub sources: &'static [&'static str],
}

impl KnowledgeEntry {
    /// True if any keyword is contained in the already-lowercased query
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_query.contains(&keyword.to_lowercase()))
    }

    fn to_resolution(&self) -> Resolution {
        Resolution::new(self.response, self.sources)
    }
}

/// Resolved reply: body text plus citation strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub content: String,
    pub sources: Vec<String>,
}

impl Resolution {
    pub fn new(content: impl Into<String>, sources: &[&str]) -> Self {
        Self {
            content: content.into(),
            sources: sources.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_CONTENT, FALLBACK_SOURCES)
    }
}

/// Find the first entry matching `query`, if any
pub fn find_entry<'a>(entries: &'a [KnowledgeEntry], query: &str) -> Option<&'a KnowledgeEntry> {
    let normalized = query.to_lowercase();
    entries.iter().find(|entry| entry.matches(&normalized))
}

/// Resolve a query against the built-in knowledge base
pub fn resolve(query: &str) -> Resolution {
    resolve_with(KNOWLEDGE_BASE, query)
}

/// Resolve a query against an arbitrary table, falling back when nothing matches
pub fn resolve_with(entries: &[KnowledgeEntry], query: &str) -> Resolution {
    find_entry(entries, query).map_or_else(Resolution::fallback, KnowledgeEntry::to_resolution)
}
