pub mod label;
pub mod merge;
pub mod metadata;
pub mod series;
