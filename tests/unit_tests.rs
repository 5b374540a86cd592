// Unit tests for the gift matching predicates

use gift_match::core::{age_matches, gender_matches, normalize_term, parse_list, set_matches};

fn set(members: &[&str]) -> Vec<String> {
    members.iter().map(|member| member.to_string()).collect()
}

#[test]
fn test_normalize_term_trims_and_lowercases() {
    assert_eq!(normalize_term("  Engineer "), "engineer");
    assert_eq!(normalize_term("JAPANESE"), "japanese");
    assert_eq!(normalize_term(""), "");
    assert_eq!(normalize_term("   "), "");
}

#[test]
fn test_parse_list_splits_and_drops_empties() {
    assert_eq!(
        parse_list("Male, Female ,,other"),
        vec!["male", "female", "other"]
    );
    assert_eq!(parse_list(""), Vec::<String>::new());
    assert_eq!(parse_list(" , , "), Vec::<String>::new());
    assert_eq!(parse_list("single"), vec!["single"]);
}

#[test]
fn test_age_bounds_are_inclusive() {
    // Range 18-25 accepts both ends and rejects neighbors
    assert!(age_matches(Some(18), Some(18), Some(25)));
    assert!(age_matches(Some(25), Some(18), Some(25)));
    assert!(!age_matches(Some(17), Some(18), Some(25)));
    assert!(!age_matches(Some(26), Some(18), Some(25)));
}

#[test]
fn test_age_unconstrained_accepts_anything() {
    assert!(age_matches(Some(30), None, None));
    assert!(age_matches(None, None, None));
    assert!(age_matches(Some(1), None, None));
    assert!(age_matches(Some(120), None, None));
}

#[test]
fn test_absent_age_fails_any_constrained_range() {
    assert!(!age_matches(None, Some(18), Some(25)));
    assert!(!age_matches(None, Some(18), None));
    assert!(!age_matches(None, None, Some(65)));
}

#[test]
fn test_age_open_ended_ranges() {
    // Lower bound only
    assert!(age_matches(Some(70), Some(65), None));
    assert!(age_matches(Some(65), Some(65), None));
    assert!(!age_matches(Some(64), Some(65), None));

    // Upper bound only
    assert!(age_matches(Some(10), None, Some(12)));
    assert!(!age_matches(Some(13), None, Some(12)));
}

#[test]
fn test_set_match_is_case_insensitive_and_trimmed() {
    let nationalities = set(&["Japanese"]);

    assert!(set_matches("japanese", &nationalities));
    assert!(set_matches(" Japanese ", &nationalities));
    assert!(set_matches("JAPANESE", &nationalities));
}

#[test]
fn test_set_match_is_exact_not_substring() {
    let nationalities = set(&["Japanese"]);

    assert!(!set_matches("Japan", &nationalities));
    assert!(!set_matches("Japanese citizen", &nationalities));
}

#[test]
fn test_empty_set_is_unconstrained() {
    assert!(set_matches("anything", &[]));
    assert!(set_matches("", &[]));
}

#[test]
fn test_blank_members_do_not_constrain() {
    // A set of only blanks behaves like no set at all
    assert!(set_matches("anything", &set(&["", "  "])));

    // A blank member alongside a real one is simply skipped
    let mixed = set(&["", "engineer"]);
    assert!(set_matches("Engineer", &mixed));
    assert!(!set_matches("doctor", &mixed));
}

#[test]
fn test_empty_profile_value_fails_constrained_set() {
    assert!(!set_matches("", &set(&["engineer"])));
    assert!(!set_matches("   ", &set(&["engineer"])));
}

#[test]
fn test_gender_matching() {
    let genders = set(&["female"]);

    assert!(gender_matches("Female", &genders));
    assert!(!gender_matches("male", &genders));
    assert!(gender_matches("male", &[]));
}
