pub mod doc_freqs;
pub mod interner;
pub mod inverted;
pub mod store;
