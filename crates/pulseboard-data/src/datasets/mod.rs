//! Typed rows for the two supported datasets.

pub mod listening;
pub mod sales;

pub use listening::ListeningEvent;
pub use sales::SalesRecord;
