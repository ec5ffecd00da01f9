use crate::{ops::*, *};

mod copy;
mod graph;
mod neighborhood;

pub mod digest;

pub use copy::*;
pub use graph::*;
pub use neighborhood::*;
