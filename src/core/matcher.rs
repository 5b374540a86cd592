use crate::core::criteria::{age_matches, gender_matches, set_matches};
use crate::models::{Gift, GiftCriteria, UserProfile};

/// Result of filtering a catalog against one profile.
#[derive(Debug)]
pub struct MatchResult {
    pub gifts: Vec<Gift>,
    pub total_candidates: usize,
}

/// The eligibility filter.
///
/// A gift is eligible when every constrained dimension of its criteria is
/// satisfied by the profile; unconstrained dimensions match everyone. The
/// verdict is a strict boolean (no scoring, no re-ranking) and the output
/// keeps the catalog's order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one profile against one gift's criteria.
    ///
    /// All four dimensions combine with AND. The check is total: any
    /// profile/criteria pair yields a verdict, never an error.
    pub fn is_eligible(&self, profile: &UserProfile, criteria: &GiftCriteria) -> bool {
        gender_matches(&profile.sex, &criteria.genders)
            && age_matches(profile.age, criteria.age_min, criteria.age_max)
            && set_matches(&profile.nationality, &criteria.nationalities)
            && set_matches(&profile.job, &criteria.jobs)
    }

    /// Filter a catalog down to the gifts the profile is eligible for.
    ///
    /// Pure and deterministic: the same `(profile, catalog)` input always
    /// produces the same output sequence, a sub-sequence of the catalog
    /// in its original order.
    pub fn suggest(&self, profile: &UserProfile, catalog: Vec<Gift>) -> MatchResult {
        let total_candidates = catalog.len();

        let gifts: Vec<Gift> = catalog
            .into_iter()
            .filter(|gift| self.is_eligible(profile, &gift.criteria))
            .collect();

        MatchResult {
            gifts,
            total_candidates,
        }
    }
}
