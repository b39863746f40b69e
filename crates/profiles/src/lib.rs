//! # Investor Profiles
//!
//! Investing philosophies expressed as data: a name, an ordered list of criteria
//! and a pass threshold ("at least K of N"). The engine treats every profile the
//! same way; only the data differs.
//!
//! - `InvestorProfile` / `CriterionBinding`: the profile value and its entries.
//! - `builtin`: the value-oriented and quality-oriented profiles.
//! - `factory::build_profile`: profiles declared in the configuration file.
//! - `ProfileRegistry`: name → profile lookup, preserving registration order.

pub mod builtin;
pub mod error;
pub mod factory;
pub mod profile;
pub mod registry;

pub use builtin::{QUALITY_PROFILE, VALUE_PROFILE, quality_oriented, value_oriented};
pub use error::{ProfileDefect, ProfileError};
pub use factory::build_profile;
pub use profile::{CriterionBinding, InvestorProfile};
pub use registry::ProfileRegistry;
