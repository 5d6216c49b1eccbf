//! The nine-dimensional certainty vector attached to every statement.

use serde::{Deserialize, Serialize};

use super::DEFAULT_CERTAINTY;

/// Confidence record of a statement.
///
/// Every dimension defaults to [`DEFAULT_CERTAINTY`], which means "unspecified"
/// rather than a real probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CertaintyVector {
    /// γ
    pub certainty: f32,
    /// φ
    pub frequency: f32,
    /// τ
    pub typicality: f32,
    /// σ
    pub similarity: f32,
    /// δ
    pub dominance: f32,
    /// α
    pub conditional_likelihood: f32,
    /// β
    pub reverse_conditional_likelihood: f32,
    /// µa
    pub argument_multiplicity: f32,
    /// µr
    pub referent_multiplicity: f32,
}

/// Symbols used in the textual form, in serialization order.
const SYMBOLS: [&str; 9] = ["γ", "φ", "τ", "σ", "δ", "α", "β", "µa", "µr"];

impl CertaintyVector {
    /// A vector with every dimension unspecified.
    pub fn new() -> Self {
        Self::uniform(DEFAULT_CERTAINTY)
    }

    /// A vector with every dimension set to `value`.
    pub fn uniform(value: f32) -> Self {
        Self::from_array([value; 9])
    }

    /// A default vector with only γ set.
    pub fn with_certainty(certainty: f32) -> Self {
        Self {
            certainty,
            ..Self::new()
        }
    }

    /// Build from the nine values in γ φ τ σ δ α β µa µr order.
    pub fn from_array(v: [f32; 9]) -> Self {
        Self {
            certainty: v[0],
            frequency: v[1],
            typicality: v[2],
            similarity: v[3],
            dominance: v[4],
            conditional_likelihood: v[5],
            reverse_conditional_likelihood: v[6],
            argument_multiplicity: v[7],
            referent_multiplicity: v[8],
        }
    }

    /// The nine values in γ φ τ σ δ α β µa µr order.
    pub fn to_array(&self) -> [f32; 9] {
        [
            self.certainty,
            self.frequency,
            self.typicality,
            self.similarity,
            self.dominance,
            self.conditional_likelihood,
            self.reverse_conditional_likelihood,
            self.argument_multiplicity,
            self.referent_multiplicity,
        ]
    }

    /// Set similarity (σ).
    pub fn similarity(mut self, value: f32) -> Self {
        self.similarity = value;
        self
    }

    /// Set dominance (δ).
    pub fn dominance(mut self, value: f32) -> Self {
        self.dominance = value;
        self
    }

    /// Set conditional likelihood (α).
    pub fn conditional_likelihood(mut self, value: f32) -> Self {
        self.conditional_likelihood = value;
        self
    }

    /// Set frequency (φ).
    pub fn frequency(mut self, value: f32) -> Self {
        self.frequency = value;
        self
    }

    /// Whether every dimension is still unspecified.
    pub fn is_unspecified(&self) -> bool {
        self.to_array().iter().all(|v| *v == DEFAULT_CERTAINTY)
    }

    /// Parse the bracketed textual form, e.g. `[γ = 0.90000 , σ = 0.50000]`.
    ///
    /// Text that does not start with `[` yields the default vector. Keys that
    /// are absent stay at the default. Returns `None` when a listed value is
    /// not a number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.starts_with('[') {
            return Some(Self::new());
        }

        let mut values = [DEFAULT_CERTAINTY; 9];
        for (slot, symbol) in values.iter_mut().zip(SYMBOLS) {
            let key = format!("{} = ", symbol);
            let Some(pos) = text.find(&key) else {
                continue;
            };
            let rest = &text[pos + key.len()..];
            let end = rest.find([',', ']']).unwrap_or(rest.len());
            *slot = rest[..end].trim().parse::<f32>().ok()?;
        }
        Some(Self::from_array(values))
    }
}

impl Default for CertaintyVector {
    fn default() -> Self {
        Self::new()
    }
}

/// Lists only the dimensions that differ from the default; empty when none do.
impl std::fmt::Display for CertaintyVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .to_array()
            .iter()
            .zip(SYMBOLS)
            .filter(|(v, _)| **v != DEFAULT_CERTAINTY)
            .map(|(v, s)| format!("{} = {:.5}", s, v))
            .collect();

        if parts.is_empty() {
            return Ok(());
        }
        write!(f, "[{}]", parts.join(" , "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prints_empty() {
        assert_eq!(CertaintyVector::new().to_string(), "");
        assert!(CertaintyVector::default().is_unspecified());
    }

    #[test]
    fn test_display_skips_defaults() {
        let cv = CertaintyVector::with_certainty(0.9).frequency(0.5);
        assert_eq!(cv.to_string(), "[γ = 0.90000 , φ = 0.50000]");

        let cv = CertaintyVector::new().similarity(0.8);
        assert_eq!(cv.to_string(), "[σ = 0.80000]");
    }

    #[test]
    fn test_parse_textual_form() {
        let cv = CertaintyVector::parse("[γ = 0.90000 , µr = 0.25000]").unwrap();
        assert!((cv.certainty - 0.9).abs() < 1e-6);
        assert!((cv.referent_multiplicity - 0.25).abs() < 1e-6);
        assert_eq!(cv.argument_multiplicity, DEFAULT_CERTAINTY);
        assert_eq!(cv.similarity, DEFAULT_CERTAINTY);
    }

    #[test]
    fn test_parse_non_bracket_is_default() {
        assert_eq!(CertaintyVector::parse("").unwrap(), CertaintyVector::new());
        assert_eq!(
            CertaintyVector::parse("whatever").unwrap(),
            CertaintyVector::new()
        );
    }

    #[test]
    fn test_parse_bad_number() {
        assert!(CertaintyVector::parse("[γ = abc]").is_none());
    }
}
