pub use initialize::*;
pub use participate::*;
pub use pick_the_winner::*;

pub mod initialize;
pub mod participate;
pub mod pick_the_winner;
