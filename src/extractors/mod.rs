// src/extractors/mod.rs
pub mod dedup;
pub mod engine;
pub mod expand;
pub mod normalize;
pub mod patterns;
pub mod preprocess;
pub mod title;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use engine::{DateExtractor, Extraction};
#[allow(unused_imports)]
pub use normalize::{DateNormalizer, DateOrder};
#[allow(unused_imports)]
pub use title::select_title;
