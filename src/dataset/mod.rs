// SYNOID Genre Dataset Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod loader;
pub mod record;

pub use loader::{load_dataset, load_from_reader};
pub use record::MovieRecord;
