//! Types for representing LS-8 instructions and their parts.

use std::fmt;

/// Instructions of the LS-8 instruction architecture.
///
/// An instruction occupies one memory byte and is followed by its operand
/// bytes. The two highest bits of the encoding give the operand count, so the
/// encodings below also determine how far the program counter advances.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpCode {
    /// Stops the fetch-execute loop.
    Hlt,

    /// Loads an immediate value into a register.
    Ldi,

    /// Sends the value of a register to the output device.
    Prn,

    /// Adds the value of the second register into the first.
    Add,

    /// Multiplies the first register by the second.
    Mult,

    /// Compares two registers and stores the result in the flags register.
    Cmp,

    /// Pushes the value of a register onto the stack.
    Push,

    /// Pops the top of the stack into a register.
    Pop,

    /// Pushes a return address and jumps to the address held in a register.
    Call,

    /// Pops an address off the stack into the program counter.
    Ret,
}

impl OpCode {
    pub fn as_byte(&self) -> u8 {
        match self {
            OpCode::Hlt => 0b00000001,
            OpCode::Ldi => 0b10000010,
            OpCode::Prn => 0b01000111,

            OpCode::Add => 0b10100000,
            OpCode::Mult => 0b10100010,
            OpCode::Cmp => 0b10100111,

            OpCode::Push => 0b01000101,
            OpCode::Pop => 0b01000110,
            OpCode::Call => 0b01010000,
            OpCode::Ret => 0b00010001,
        }
    }

    /// Decodes an instruction byte.
    ///
    /// Returns `None` for bytes that do not encode an instruction. The
    /// execution engine treats those as a diagnostic, not a fault.
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        match byte {
            0b00000001 => Some(OpCode::Hlt),
            0b10000010 => Some(OpCode::Ldi),
            0b01000111 => Some(OpCode::Prn),

            0b10100000 => Some(OpCode::Add),
            0b10100010 => Some(OpCode::Mult),
            0b10100111 => Some(OpCode::Cmp),

            0b01000101 => Some(OpCode::Push),
            0b01000110 => Some(OpCode::Pop),
            0b01010000 => Some(OpCode::Call),
            0b00010001 => Some(OpCode::Ret),

            _ => None,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            OpCode::Hlt => "HLT",
            OpCode::Ldi => "LDI",
            OpCode::Prn => "PRN",

            OpCode::Add => "ADD",
            OpCode::Mult => "MULT",
            OpCode::Cmp => "CMP",

            OpCode::Push => "PUSH",
            OpCode::Pop => "POP",
            OpCode::Call => "CALL",
            OpCode::Ret => "RET",
        })
    }
}

/// One of the eight work registers of the LS-8.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    /// The register holding the comparison flags.
    pub const FL: Register = Register::R5;

    /// The register holding the stack pointer.
    pub const SP: Register = Register::R6;

    /// Decodes a register operand byte.
    ///
    /// Returns `None` for bytes outside the register file.
    pub fn from_byte(byte: u8) -> Option<Register> {
        match byte {
            0 => Some(Register::R0),
            1 => Some(Register::R1),
            2 => Some(Register::R2),
            3 => Some(Register::R3),
            4 => Some(Register::R4),
            5 => Some(Register::R5),
            6 => Some(Register::R6),
            7 => Some(Register::R7),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Register::R0 => 0,
            Register::R1 => 1,
            Register::R2 => 2,
            Register::R3 => 3,
            Register::R4 => 4,
            Register::R5 => 5,
            Register::R6 => 6,
            Register::R7 => 7,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Register::R0 => write!(f, "R0"),
            Register::R1 => write!(f, "R1"),
            Register::R2 => write!(f, "R2"),
            Register::R3 => write!(f, "R3"),
            Register::R4 => write!(f, "R4"),
            Register::R5 => write!(f, "R5"),
            Register::R6 => write!(f, "R6"),
            Register::R7 => write!(f, "R7"),
        }
    }
}
