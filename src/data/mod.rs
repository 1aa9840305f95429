//! Asset loading: curated symptom dictionary and model column schema.

pub mod columns;
pub mod dictionary;

pub use columns::ModelColumns;
pub use dictionary::SymptomDictionary;
