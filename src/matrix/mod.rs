//! Matrix views, fill helpers and the naive reference product.
//!
//! None of this is on the fast path. The views are how the blocked driver
//! addresses its operands; the rest exists to feed and check it.

pub mod init;
pub mod naive;
pub mod view;

pub use view::{Layout, MatMut, MatRef};
