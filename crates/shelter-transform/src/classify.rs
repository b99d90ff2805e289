//! First-match-wins classification over the fixed taxonomies.
//!
//! A [`Classifier`] wraps one static [`Taxonomy`] and answers, for a single
//! text value, the label of the first rule whose terms match. Word-boundary
//! taxonomies are compiled to one regex per rule when the classifier is built,
//! so classification itself never fails.

use regex::Regex;
use serde::Serialize;

use shelter_model::taxonomy::{
    AKC_GROUP, CAT_COAT_LENGTH, COLOR_PATTERN, HAIR_LENGTH, INTAKE_CONDITION, OTHER_SPECIES_BREED,
    OUTCOME_SUBTYPE, OUTCOME_TYPE, all_taxonomies,
};
use shelter_model::{MatchKind, Taxonomy};

use crate::error::{Result, TransformError};

/// A compiled taxonomy.
#[derive(Debug, Clone)]
pub struct Classifier {
    taxonomy: &'static Taxonomy,
    /// One pattern per rule, only for [`MatchKind::Word`].
    patterns: Vec<Regex>,
}

impl Classifier {
    pub fn new(taxonomy: &'static Taxonomy) -> Result<Self> {
        let patterns = match taxonomy.match_kind {
            MatchKind::Word => taxonomy
                .rules
                .iter()
                .map(|rule| word_pattern(taxonomy.name, rule.terms))
                .collect::<Result<Vec<_>>>()?,
            MatchKind::Exact | MatchKind::Contains => Vec::new(),
        };
        Ok(Self { taxonomy, patterns })
    }

    pub fn taxonomy(&self) -> &'static Taxonomy {
        self.taxonomy
    }

    /// Label of the first matching rule, or `None` when nothing matches.
    ///
    /// Values are compared trimmed and lowercased; a missing value never
    /// matches.
    pub fn first_match(&self, value: Option<&str>) -> Option<&'static str> {
        let value = value?.trim().to_lowercase();
        if value.is_empty() {
            return None;
        }
        match self.taxonomy.match_kind {
            MatchKind::Exact => self
                .taxonomy
                .rules
                .iter()
                .find(|rule| rule.terms.contains(&value.as_str()))
                .map(|rule| rule.label),
            MatchKind::Contains => self
                .taxonomy
                .rules
                .iter()
                .find(|rule| rule.terms.iter().any(|term| value.contains(term)))
                .map(|rule| rule.label),
            MatchKind::Word => self
                .taxonomy
                .rules
                .iter()
                .zip(&self.patterns)
                .find(|(_, pattern)| pattern.is_match(&value))
                .map(|(rule, _)| rule.label),
        }
    }

    /// Label of the first matching rule, falling back to the taxonomy default.
    ///
    /// `None` only for a taxonomy without a default, where it equals
    /// [`first_match`](Self::first_match).
    pub fn classify(&self, value: Option<&str>) -> Option<&'static str> {
        self.first_match(value).or(self.taxonomy.default)
    }
}

fn word_pattern(taxonomy: &str, terms: &[&str]) -> Result<Regex> {
    let alternatives: Vec<String> = terms.iter().map(|term| regex::escape(term)).collect();
    let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
    Regex::new(&pattern).map_err(|e| TransformError::Pattern {
        taxonomy: taxonomy.to_string(),
        message: e.to_string(),
    })
}

/// Every classifier the pipeline uses, compiled once per run.
#[derive(Debug, Clone)]
pub struct Classifiers {
    pub intake_condition: Classifier,
    pub outcome_type: Classifier,
    pub outcome_subtype: Classifier,
    pub other_species: Classifier,
    pub akc_group: Classifier,
    pub cat_coat_length: Classifier,
    pub hair_length: Classifier,
    pub color_pattern: Classifier,
}

impl Classifiers {
    pub fn load() -> Result<Self> {
        Ok(Self {
            intake_condition: Classifier::new(&INTAKE_CONDITION)?,
            outcome_type: Classifier::new(&OUTCOME_TYPE)?,
            outcome_subtype: Classifier::new(&OUTCOME_SUBTYPE)?,
            other_species: Classifier::new(&OTHER_SPECIES_BREED)?,
            akc_group: Classifier::new(&AKC_GROUP)?,
            cat_coat_length: Classifier::new(&CAT_COAT_LENGTH)?,
            hair_length: Classifier::new(&HAIR_LENGTH)?,
            color_pattern: Classifier::new(&COLOR_PATTERN)?,
        })
    }
}

/// One line of the taxonomy listing.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomySummary {
    pub name: &'static str,
    pub match_kind: MatchKind,
    pub labels: Vec<&'static str>,
    pub term_count: usize,
}

/// Describe every fixed taxonomy: its labels and how many terms feed them.
pub fn taxonomy_listing() -> Vec<TaxonomySummary> {
    all_taxonomies()
        .into_iter()
        .map(|taxonomy| TaxonomySummary {
            name: taxonomy.name,
            match_kind: taxonomy.match_kind,
            labels: taxonomy.labels(),
            term_count: taxonomy.rules.iter().map(|rule| rule.terms.len()).sum(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifiers() -> Classifiers {
        Classifiers::load().unwrap()
    }

    #[test]
    fn exact_match_requires_whole_value() {
        let c = classifiers();
        assert_eq!(c.intake_condition.classify(Some("Sick")), Some("medical"));
        assert_eq!(c.intake_condition.classify(Some("nursing")), Some("medical"));
        assert_eq!(c.intake_condition.classify(Some("feral")), Some("behavior"));
        assert_eq!(c.intake_condition.classify(Some("normal")), Some("routine"));
        assert_eq!(c.intake_condition.classify(Some("very sick")), Some("unknown"));
        assert_eq!(c.intake_condition.classify(None), Some("unknown"));
    }

    #[test]
    fn outcome_type_buckets() {
        let c = classifiers();
        assert_eq!(c.outcome_type.classify(Some("adoption")), Some("alive"));
        assert_eq!(c.outcome_type.classify(Some("return to owner")), Some("alive"));
        assert_eq!(c.outcome_type.classify(Some("transfer")), Some("admin"));
        assert_eq!(c.outcome_type.classify(Some("euthanasia")), Some("deceased"));
        assert_eq!(c.outcome_type.classify(Some("missing")), Some("unknown"));
        assert_eq!(c.outcome_type.classify(Some("stolen")), Some("unknown"));
    }

    #[test]
    fn outcome_subtype_buckets() {
        let c = classifiers();
        assert_eq!(c.outcome_subtype.classify(Some("in kennel")), Some("location"));
        assert_eq!(c.outcome_subtype.classify(Some("rabies risk")), Some("behavior"));
        assert_eq!(c.outcome_subtype.classify(Some("partner")), Some("program"));
        assert_eq!(c.outcome_subtype.classify(Some("court/investigation")), Some("admin"));
        assert_eq!(c.outcome_subtype.classify(None), Some("unknown"));
    }

    #[test]
    fn contains_match_finds_substrings() {
        let c = classifiers();
        assert_eq!(c.color_pattern.first_match(Some("brown tabby")), Some("patterned"));
        assert_eq!(c.color_pattern.first_match(Some("seal point")), Some("patterned"));
        assert_eq!(c.color_pattern.first_match(Some("black")), None);
        assert_eq!(
            c.cat_coat_length.first_match(Some("domestic shorthair")),
            Some("dsh")
        );
        assert_eq!(c.cat_coat_length.first_match(Some("siamese")), None);
    }

    #[test]
    fn taxonomy_without_default_never_falls_back() {
        let c = classifiers();
        assert_eq!(c.cat_coat_length.classify(Some("siamese")), None);
        assert_eq!(c.cat_coat_length.classify(None), None);
        assert_eq!(c.color_pattern.classify(Some("black")), None);
        assert_eq!(c.color_pattern.classify(Some("blue tick")), Some("patterned"));
    }

    #[test]
    fn word_match_respects_boundaries() {
        let c = classifiers();
        assert_eq!(c.hair_length.classify(Some("domestic shorthair")), Some("short"));
        assert_eq!(c.hair_length.classify(Some("domestic medium hair")), Some("medium"));
        assert_eq!(c.hair_length.classify(Some("Domestic Longhair")), Some("long"));
        assert_eq!(c.hair_length.classify(Some("dachshund longhair")), Some("long"));
        // "shorty" is not the word "short"
        assert_eq!(c.hair_length.classify(Some("shorty")), Some("unknown"));
        assert_eq!(c.hair_length.classify(Some("beagle")), Some("unknown"));
    }

    #[test]
    fn rule_order_decides_overlaps() {
        let c = classifiers();
        // both "short" and "long" present: the first rule wins
        assert_eq!(c.hair_length.classify(Some("short long")), Some("short"));
    }

    #[test]
    fn listing_covers_every_taxonomy() {
        let listing = taxonomy_listing();
        assert_eq!(listing.len(), 8);
        let akc = listing.iter().find(|t| t.name == "akc_group").unwrap();
        assert_eq!(akc.labels.len(), 9);
        assert!(akc.term_count > 100);
    }
}
