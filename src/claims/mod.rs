//! Claim computation.
//!
//! Distance claims (weighted shortest paths from every home system) and the
//! strength claims derived from them. Both are returned as fresh per-call
//! matrices; nothing is cached on the galaxy.

pub mod distance;
pub mod slices;
pub mod strength;

pub use distance::{compute_distance_claims, ClaimWeights, DistanceClaims};
pub use slices::{contenders, slices, Slice};
pub use strength::{compute_strength_claims, ContestPolicy, StrengthClaims, CLOSE_CLAIM_TOLERANCE};
