/// Fs based document library.
pub mod store;
