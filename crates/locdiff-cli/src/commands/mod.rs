pub mod blocks;
pub mod clean;
pub mod diff;
