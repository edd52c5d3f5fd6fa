use std::fmt;

use super::parser::parse_image;
use crate::emulator::{Memory, MEMORY_SIZE};

/// Error produced when a program image cannot be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The image holds more bytes than the machine has memory.
    TooLarge {
        /// Number of bytes in the image.
        size: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImageError::TooLarge { size } => write!(
                f,
                "program image of {} bytes does not fit in the {} byte memory",
                size, MEMORY_SIZE,
            ),
        }
    }
}

/// A program image: the memory bytes of a program in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The bytes of the program, loaded at consecutive addresses starting
    /// from address zero.
    pub bytes: Vec<u8>,
}

impl Program {
    /// Parses the textual program image format.
    ///
    /// Every line carrying a byte of eight binary digits contributes one
    /// memory byte, in source order. Blank lines, comment lines and lines
    /// that do not parse are skipped.
    ///
    /// # Errors
    /// Fails if the image does not fit in memory.
    pub fn parse(source: &str) -> Result<Program, ImageError> {
        Program::from_bytes(parse_image(source))
    }

    /// Creates a program image from raw memory bytes.
    ///
    /// # Errors
    /// Fails if the image does not fit in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Program, ImageError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(ImageError::TooLarge { size: bytes.len() });
        }

        Ok(Program { bytes })
    }

    /// Builds the power-up memory of the machine: the program starting at
    /// address zero, every other cell zeroed.
    pub fn to_memory(&self) -> Memory {
        let mut memory = Memory::new();

        for (address, byte) in self.bytes.iter().enumerate() {
            memory.write(address as u8, *byte);
        }

        memory
    }
}
