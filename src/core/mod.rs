// Core algorithm exports
pub mod criteria;
pub mod matcher;
pub mod normalize;

pub use criteria::{age_matches, gender_matches, set_matches};
pub use matcher::{MatchResult, Matcher};
pub use normalize::{normalize_term, parse_list};
