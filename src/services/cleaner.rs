//! Boilerplate and markup removal for episode descriptions.
//!
//! Every removal rule is compiled into a single alternation and applied in
//! one pass, so rule order does not change the result. Matching is
//! case-sensitive and `.` crosses newlines.

use regex::Regex;

use crate::error::Result;
use crate::models::{CleaningConfig, RemovalRule, Replacement, RuleScope};

/// Strips markup and promotional text from raw HTML descriptions.
#[derive(Debug, Clone)]
pub struct SummaryCleaner {
    pattern: Option<Regex>,
    replacements: Vec<Replacement>,
}

impl SummaryCleaner {
    /// Compile the configured rules.
    pub fn new(config: &CleaningConfig) -> Result<Self> {
        Ok(Self {
            pattern: Self::compile(&config.rules)?,
            replacements: config.replacements.clone(),
        })
    }

    fn compile(rules: &[RemovalRule]) -> Result<Option<Regex>> {
        if rules.is_empty() {
            return Ok(None);
        }

        let alternation = rules
            .iter()
            .map(|rule| match rule.scope {
                RuleScope::MatchOnly => format!("(?:{})", rule.pattern),
                RuleScope::ToEnd => format!("(?:{}).*", rule.pattern),
            })
            .collect::<Vec<_>>()
            .join("|");

        Ok(Some(Regex::new(&format!("(?s){}", alternation))?))
    }

    /// Remove every rule match, then apply the literal replacements.
    ///
    /// A single pass over the input. Removing one match can join text into a
    /// new match (`Pow<i>ered by`), which a second call would then remove.
    pub fn clean(&self, text: &str) -> String {
        let mut result = match &self.pattern {
            Some(re) => re.replace_all(text, "").into_owned(),
            None => text.to_string(),
        };

        for r in &self.replacements {
            result = result.replace(&r.from, &r.to);
        }

        result
    }
}
