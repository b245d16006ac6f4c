pub mod filter;
pub mod hooks;
