use anyhow::Result;

use crate::cli::GlobalArgs;

pub trait Runnable {
    fn run(self, g: &GlobalArgs) -> Result<()>;
}

pub mod hours;

pub use hours::Hours;
