//! Energy matching module.
//!
//! Maps the user's self-reported energy onto the tasks they can take on
//! right now, and partitions the task list into the three buckets the
//! home view renders.

mod level;
mod matcher;

pub use level::EnergyLevel;
pub use matcher::{matches, partition, Bucket, Buckets};
