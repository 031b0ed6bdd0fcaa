pub mod dignities;

pub use dignities::{DignityClassifier, DignityKind, DignityRecord, DignitySummary};
