//! Pattern-based entity extraction from Japanese utterances.

mod entities;
mod extractor;

pub use entities::ExtractedEntities;
pub use extractor::EntityExtractor;
