mod genre;
mod us_state;

pub use genre::*;
pub use us_state::*;
