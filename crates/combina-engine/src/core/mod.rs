pub use self::{combination::*, population::*};

pub(crate) mod combination;
pub(crate) mod population;
