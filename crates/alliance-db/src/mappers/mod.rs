//! Entity <-> model mappers

mod member;
mod org;

pub use member::member_from_model;
pub use org::listing_from_model;
