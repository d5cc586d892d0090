pub mod listing;
pub mod references;
pub mod text;
pub mod tracking;
