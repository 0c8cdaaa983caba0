pub mod feature_flags;
pub mod policy;
