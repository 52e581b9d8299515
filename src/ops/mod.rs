pub mod filter;
pub mod gesture;
pub mod grid;
pub mod store;
