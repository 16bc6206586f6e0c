use crate::*;
pub use scan::*;

mod scan;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig, foods: &[&Food]) -> Result<Board>;
}
