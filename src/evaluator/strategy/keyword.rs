use super::{ScoringContext, ScoringStrategy};

/// Fraction of keywords that occur in the response, matched case-insensitively
/// as substrings.
///
/// Keywords are trimmed, lower-cased and de-duplicated at construction; blank
/// entries are dropped. With no keywords left every response scores `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordStrategy {
    keywords: Vec<String>,
}

impl KeywordStrategy {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }
        Self {
            keywords: normalized,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl ScoringStrategy for KeywordStrategy {
    fn score(&self, _question: &str, response: &str, _context: &ScoringContext) -> f64 {
        if self.keywords.is_empty() {
            return 0.0;
        }
        let text = response.to_lowercase();
        let hits = self
            .keywords
            .iter()
            .filter(|keyword| text.contains(keyword.as_str()))
            .count();
        hits as f64 / self.keywords.len() as f64
    }
}
