pub mod backup;
pub mod core;
pub mod lessons;
pub mod setup;
pub mod stats;
pub mod students;
pub mod timeline;
