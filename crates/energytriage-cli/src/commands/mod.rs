pub mod buckets;
pub mod config;
pub mod script;
pub mod swipe;
