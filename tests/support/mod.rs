// tests/support/mod.rs
// Shared in-memory backend and wiring helpers used by multiple integration
// test binaries. Individual test crates use different subsets, so dead_code
// warnings are allowed at the module level to keep CI output clean.
#[allow(dead_code, unused_imports)]
pub mod helpers;

#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(unused_imports)]
pub use helpers::*;
#[allow(unused_imports)]
pub use mocks::*;
