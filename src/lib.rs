//! A crate for emulating the LS-8, an 8-bit microcomputer with 256 bytes of
//! memory and eight general-purpose registers.
//!
//! Currently this crate provides the functionality to:
//! - Read `.ls8` files containing textual program images.
//! - Execute LS-8 machine code.
//!
//! # Future plans
//!
//! - An `ls8asm` assembler executable
//! - Conditional jumps (`JMP`, `JEQ`, `JNE`) on top of the CMP flags
//! - Interrupts and the memory-mapped keyboard device
//!
//! # Unimplemented stuff
//! - The reserved interrupt registers and vector table
//! - Memory protection of any kind
//!
//! # Example
//! ```
//! use ls8::{
//!     image::Program,
//!     emulator::{Emulator, TestIo},
//! };
//!
//! fn main() {
//!     // Simple LS-8 program that prints the number 8.
//!     let source = r#"
//!         10000010 # LDI R0,8
//!         00000000
//!         00001000
//!         01000111 # PRN R0
//!         00000000
//!         00000001 # HLT
//!     "#;
//!
//!     // Parse the program image.
//!     let program = Program::parse(source)
//!         .expect("could not parse the program image");
//!
//!     // Load the image into an emulator which buffers its output.
//!     let mut io = TestIo::new();
//!     let mut emulator = Emulator::new(program.to_memory(), &mut io);
//!
//!     // Execute the program until the HLT instruction.
//!     emulator.run()
//!         .expect("an error occured while emulating the program");
//!
//!     assert_eq!(io.into_output(), [8]);
//! }
//! ```
//!
//! # Executables
//!
//! ## `ls8run`
//!
//! The `ls8run` executable loads a program image and runs it until it halts.
//! Printed values go to the standard output.
//!
//! ```text
//! $ ls8run print8.ls8
//! 8
//! ```
//!
//! Passing `--trace` prints the processor state before every instruction:
//!
//! ```text
//! $ ls8run --trace print8.ls8
//! TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 F4 00
//! TRACE: 03 | 47 00 01 | 08 00 00 00 00 00 F4 00
//! 8
//! TRACE: 05 | 01 00 00 | 08 00 00 00 00 00 F4 00
//! ```
pub mod emulator;
pub mod image;
pub mod instruction;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
