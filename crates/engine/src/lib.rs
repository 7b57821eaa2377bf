pub mod board;
pub mod types;
pub mod error;
pub mod fen;
pub mod notation;
pub mod game;
pub mod perft;
pub mod logger;

pub use board::*;
pub use types::*;
pub use error::*;
pub use fen::{decode, decode_strict, encode, Decoded, STARTING_FEN};
pub use notation::parse_move;
pub use game::*;
pub use perft::*;
pub use logger::GameLogger;
