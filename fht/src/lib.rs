//! Fast dyadic line-sum (Hough) transforms over 2D images.
//!
//! Each output row `t` of an `h x w` image holds, for every column, the sum of the samples along
//! a digital line with slope `t / (h - 1)`, wrapping cyclically around the columns. The lines are
//! built bottom-up over a binary partition of the rows, so the whole transform costs
//! `O(h w log h)` additions.

#![no_std]

extern crate alloc;

pub mod butterflies;
pub mod degree;
mod dispatch;
mod error;
pub mod ids;
pub mod idt;
mod image;
mod in_place;
mod ledger;
mod naive;
mod scalar;
mod sign;
mod split;
pub mod traversal;

pub use dispatch::*;
pub use error::*;
pub use image::*;
pub use in_place::*;
pub use ledger::*;
pub use naive::*;
pub use scalar::*;
pub use sign::*;
pub use split::*;
pub use traversal::{PlanCache, Task, TaskPlan, Traversal};
