//! Parsing and storing program images.

mod parser;
mod program;

pub use self::program::{
    ImageError,
    Program,
};
