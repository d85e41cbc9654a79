pub mod offer;
pub mod profile;

pub use offer::{OfferResponse, Prompt, Recommendation};
pub use profile::{CustomerProfile, ProfileRow, PROFILE_COLUMNS};
