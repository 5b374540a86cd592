use crate::core::normalize::normalize_term;

/// Valid profile age domain. Ages outside this range are treated as absent.
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;

/// Check a profile's sex against a gift's gender constraint.
///
/// Gender is a set dimension with the same semantics as nationality and
/// job: an empty (or effectively empty) set matches everyone.
#[inline]
pub fn gender_matches(profile_sex: &str, genders: &[String]) -> bool {
    set_matches(profile_sex, genders)
}

/// Check a profile's age against a gift's age range.
///
/// Both bounds absent means unconstrained. Either bound may be present on
/// its own (open-ended range); bounds are inclusive. A profile without a
/// valid age cannot satisfy a constrained range, so any present bound
/// excludes it.
pub fn age_matches(profile_age: Option<u8>, age_min: Option<u8>, age_max: Option<u8>) -> bool {
    if age_min.is_none() && age_max.is_none() {
        return true;
    }

    let age = match profile_age {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => age,
        _ => return false,
    };

    if let Some(min) = age_min {
        if age < min {
            return false;
        }
    }

    if let Some(max) = age_max {
        if age > max {
            return false;
        }
    }

    true
}

/// Check a profile value against a set constraint.
///
/// Membership is exact (no substring matching) on the normalized forms of
/// both sides. Members that normalize to nothing are ignored, so a set of
/// blank strings is unconstrained rather than "matches nothing"; a
/// malformed constraint must never silently hide a gift.
pub fn set_matches(profile_value: &str, set: &[String]) -> bool {
    let needle = normalize_term(profile_value);
    let mut constrained = false;

    for member in set {
        let member = normalize_term(member);
        if member.is_empty() {
            continue;
        }
        constrained = true;
        if !needle.is_empty() && member == needle {
            return true;
        }
    }

    !constrained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(members: &[&str]) -> Vec<String> {
        members.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_age_unconstrained() {
        assert!(age_matches(Some(30), None, None));
        assert!(age_matches(None, None, None));
    }

    #[test]
    fn test_age_bounds_inclusive() {
        assert!(age_matches(Some(18), Some(18), Some(25)));
        assert!(age_matches(Some(25), Some(18), Some(25)));
        assert!(!age_matches(Some(17), Some(18), Some(25)));
        assert!(!age_matches(Some(26), Some(18), Some(25)));
    }

    #[test]
    fn test_age_open_ended_bounds() {
        assert!(age_matches(Some(99), Some(18), None));
        assert!(!age_matches(Some(17), Some(18), None));
        assert!(age_matches(Some(5), None, Some(12)));
        assert!(!age_matches(Some(13), None, Some(12)));
    }

    #[test]
    fn test_absent_age_fails_constrained_range() {
        assert!(!age_matches(None, Some(18), Some(25)));
        assert!(!age_matches(None, Some(18), None));
        assert!(!age_matches(None, None, Some(25)));
    }

    #[test]
    fn test_out_of_domain_age_treated_as_absent() {
        // u8 can hold values outside the 1-120 domain; they must not
        // satisfy a constrained range.
        assert!(!age_matches(Some(0), None, Some(120)));
        assert!(!age_matches(Some(121), Some(1), None));
        assert!(age_matches(Some(200), None, None));
    }

    #[test]
    fn test_set_unconstrained_matches_anything() {
        assert!(set_matches("american", &[]));
        assert!(set_matches("", &[]));
    }

    #[test]
    fn test_set_membership_case_insensitive_trimmed() {
        let nationalities = set(&["Japanese"]);
        assert!(set_matches("japanese", &nationalities));
        assert!(set_matches(" Japanese ", &nationalities));
        assert!(set_matches("JAPANESE", &nationalities));
    }

    #[test]
    fn test_set_membership_exact_not_substring() {
        let nationalities = set(&["Japanese"]);
        assert!(!set_matches("Japan", &nationalities));
        assert!(!set_matches("Japanese food", &nationalities));
    }

    #[test]
    fn test_set_blank_members_are_unconstrained() {
        let blanks = set(&["", "   "]);
        assert!(set_matches("anything", &blanks));
        assert!(set_matches("", &blanks));
    }

    #[test]
    fn test_set_empty_profile_value_fails_constraint() {
        let jobs = set(&["engineer"]);
        assert!(!set_matches("", &jobs));
        assert!(!set_matches("   ", &jobs));
    }

    #[test]
    fn test_gender_matches() {
        let genders = set(&["male", "female"]);
        assert!(gender_matches("Female", &genders));
        assert!(!gender_matches("other", &genders));
        assert!(gender_matches("other", &[]));
        assert!(gender_matches("", &[]));
        assert!(!gender_matches("", &genders));
    }
}
