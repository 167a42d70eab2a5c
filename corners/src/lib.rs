pub use board::*;
pub use cell::*;
pub use errors::*;
pub use game::*;
pub use protocol_types::*;
pub use render::*;
pub use topology::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cell;
mod errors;
mod game;
mod protocol_types;
mod render;
mod topology;
mod turn;
mod visualization;
