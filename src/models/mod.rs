// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Gift, GiftCriteria, User, UserProfile};
pub use requests::{CreateGiftRequest, LoginRequest, SignupRequest, SuggestQuery};
pub use responses::{AuthResponse, ErrorResponse, GiftListResponse, HealthResponse, SuggestResponse};
