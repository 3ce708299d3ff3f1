//! Version parsing and ordering primitives.
//!
//! - [`rpmvercmp`]: segment-wise version string comparison
//! - [`Evr`]: `epoch:version-release` splitting with epoch validation
//! - [`compare_dependency`]: ordering of interpreter requirements by their
//!   parenthesized symbol version

mod compare;
mod evr;
mod rpmvercmp;

pub use compare::{compare_dependency, DependencyOrder};
pub use evr::{Epoch, Evr};
pub use rpmvercmp::rpmvercmp;
