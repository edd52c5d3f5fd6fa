//! [Emulator] for executing [program images](crate::image::Program).

use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use slog::{debug, info, o, warn, Discard, Logger};

use crate::instruction::{OpCode, Register};

/// Number of cells in the memory of the emulated machine.
pub const MEMORY_SIZE: usize = 256;

/// Address the stack pointer is set to on power-up.
///
/// The stack grows downward from here. A push decrements the pointer before
/// writing, so the first pushed byte lands at `0xF3`.
pub const STACK_BASE_ADDRESS: u8 = 0xF4;

/// Flag bit set by CMP when the operands are equal.
pub const FLAG_EQUAL: u8 = 0b001;

/// Flag bit set by CMP when the first operand is greater.
pub const FLAG_GREATER: u8 = 0b010;

/// Flag bit set by CMP when the first operand is less.
pub const FLAG_LESS: u8 = 0b100;

/// Contains the execution context of the LS-8 processor.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// The Program Counter stores the address of the next instruction to be fetched.
    pub pc: u8,

    /// Array containing values for all the eight work registers.
    ///
    /// Register R6 holds the stack pointer and register R5 the comparison
    /// flags. Both are ordinary registers; programs can overwrite them.
    pub r: [u8; 8],
}

/// An error that stops execution of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// An operand byte named a register outside the register file.
    InvalidRegister {
        /// The offending operand byte.
        index: u8,

        /// Address of the instruction that used it.
        pc: u8,
    },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fault::InvalidRegister { index, pc } => {
                write!(f, "invalid register {} in instruction at 0x{:02X}", index, pc)
            },
        }
    }
}

/// Operations the arithmetic-logic unit can perform on a pair of registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Adds the second register into the first, wrapping modulo 256.
    Add,

    /// Multiplies the first register by the second, wrapping modulo 256.
    Mult,

    /// Compares the registers and stores the result in the flags register.
    Cmp,
}

/// Interface to the output device.
pub trait Output {
    /// Called when a PRN instruction is executed.
    ///
    /// # Parameters
    /// - `value`: The value of the register specified in the instruction.
    fn output(&mut self, value: u8);
}

/// The memory of the emulated machine: 256 eight-bit cells.
///
/// Addresses are single bytes, so every representable address is valid.
/// Instructions, data and the stack share this space without protection.
#[derive(Clone, Debug)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Creates a zero-filled memory.
    pub fn new() -> Memory {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Fetches the byte at the specified address.
    pub fn read(&self, address: u8) -> u8 {
        self.cells[address as usize]
    }

    /// Overwrites the byte at the specified address.
    pub fn write(&mut self, address: u8, value: u8) {
        self.cells[address as usize] = value;
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}

/// The emulator contains all necessary context for executing an LS-8 program
/// and an interface for doing output.
#[derive(Clone)]
pub struct Emulator<IO> {
    /// The memory of the emulated machine.
    /// Contains the program and all the data it operates on, including the stack.
    pub memory: Memory,

    /// The execution context, which includes the registers and the program counter.
    pub context: Context,

    /// Interface for doing IO operations.
    pub io: IO,

    /// True until a HLT instruction is executed.
    pub running: bool,

    logger: Logger,
}

impl<IO> Emulator<IO> where IO: Output {
    /// Create a new emulator.
    ///
    /// Execution starts at address zero and the stack pointer starts at
    /// [STACK_BASE_ADDRESS].
    ///
    /// # Parameters
    /// - `memory`: A [Memory] populated with the program.
    /// - `io`: An [IO handler](Output).
    pub fn new(memory: Memory, io: IO) -> Emulator<IO> {
        Emulator {
            context: Context {
                r: [0, 0, 0, 0, 0, 0, STACK_BASE_ADDRESS, 0],
                pc: 0,
            },
            memory,
            io,
            running: true,
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Create a new emulator that reports events to the specified logger.
    pub fn with_logger(memory: Memory, io: IO, logger: Logger) -> Emulator<IO> {
        let mut emulator = Emulator::new(memory, io);
        emulator.logger = logger;
        emulator
    }

    /// Replaces the logger the emulator reports events to.
    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Fetches, decodes and executes a single instruction.
    ///
    /// Does nothing if the machine has halted. Bytes that do not encode an
    /// instruction are reported to the logger and skipped.
    ///
    /// # Errors
    /// Returns a [Fault] if the instruction makes an illegal register access.
    pub fn step(&mut self) -> Result<(), Fault> {
        if !self.running {
            return Ok(());
        }

        let byte = self.memory.read(self.context.pc);

        match OpCode::from_byte(byte) {
            Some(opcode) => {
                debug!(self.logger, "executing instruction";
                    "opcode" => %opcode,
                    "pc" => self.context.pc);

                self.execute(opcode)
            },
            None => {
                warn!(self.logger, "unknown instruction";
                    "byte" => format!("{:#010b}", byte),
                    "pc" => self.context.pc);

                self.context.pc = self.context.pc.wrapping_add(1);

                Ok(())
            },
        }
    }

    /// Executes the program until a HLT instruction.
    ///
    /// A program that never executes HLT does not return.
    ///
    /// # Errors
    /// Returns a [Fault] if an instruction makes an illegal register access.
    pub fn run(&mut self) -> Result<(), Fault> {
        while self.running {
            self.step()?;
        }

        Ok(())
    }

    /// Executes a single decoded instruction.
    ///
    /// Each handler is entered with the program counter still at its own
    /// opcode and is responsible for advancing it.
    fn execute(&mut self, opcode: OpCode) -> Result<(), Fault> {
        match opcode {
            OpCode::Hlt => {
                info!(self.logger, "halted"; "pc" => self.context.pc);

                self.running = false;
                self.context.pc = self.context.pc.wrapping_add(1);
            },

            OpCode::Ldi => {
                let register = self.register_operand(1)?;
                let value = self.operand(2);

                self.context.r[register.index()] = value;
                self.context.pc = self.context.pc.wrapping_add(3);
            },

            OpCode::Prn => {
                let register = self.register_operand(1)?;
                let value = self.context.r[register.index()];

                self.context.pc = self.context.pc.wrapping_add(2);
                self.io.output(value);
            },

            OpCode::Add => {
                let (a, b) = self.register_pair()?;

                self.alu(AluOp::Add, a, b);
                self.context.pc = self.context.pc.wrapping_add(3);
            },

            OpCode::Mult => {
                let (a, b) = self.register_pair()?;

                self.alu(AluOp::Mult, a, b);
                self.context.pc = self.context.pc.wrapping_add(3);
            },

            OpCode::Cmp => {
                let (a, b) = self.register_pair()?;

                self.alu(AluOp::Cmp, a, b);
                self.context.pc = self.context.pc.wrapping_add(3);
            },

            OpCode::Push => {
                let register = self.register_operand(1)?;
                let value = self.context.r[register.index()];

                self.push(value);
                self.context.pc = self.context.pc.wrapping_add(2);
            },

            OpCode::Pop => {
                let register = self.register_operand(1)?;
                let value = self.pop();

                self.context.r[register.index()] = value;
                self.context.pc = self.context.pc.wrapping_add(2);
            },

            OpCode::Call => {
                let register = self.register_operand(1)?;
                let return_address = self.context.pc.wrapping_add(2);

                self.push(return_address);
                self.context.pc = self.context.r[register.index()];
            },

            OpCode::Ret => {
                self.context.pc = self.pop();
            },
        }

        Ok(())
    }

    /// Performs an ALU operation on a pair of registers.
    ///
    /// Arithmetic results wrap modulo 256. A compare stores exactly one of
    /// [FLAG_LESS], [FLAG_GREATER] and [FLAG_EQUAL] in the flags register,
    /// clearing the other bits.
    pub fn alu(&mut self, op: AluOp, a: Register, b: Register) {
        let lhs = self.context.r[a.index()];
        let rhs = self.context.r[b.index()];

        match op {
            AluOp::Add => self.context.r[a.index()] = lhs.wrapping_add(rhs),
            AluOp::Mult => self.context.r[a.index()] = lhs.wrapping_mul(rhs),
            AluOp::Cmp => {
                self.context.r[Register::FL.index()] = match lhs.cmp(&rhs) {
                    Ordering::Less => FLAG_LESS,
                    Ordering::Greater => FLAG_GREATER,
                    Ordering::Equal => FLAG_EQUAL,
                };
            },
        }
    }

    /// Renders the processor state on a single line: the program counter, the
    /// three memory bytes starting at it and all eight registers, in
    /// two-digit uppercase hexadecimal.
    pub fn trace(&self) -> String {
        let pc = self.context.pc;

        format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} | {}",
            pc,
            self.memory.read(pc),
            self.memory.read(pc.wrapping_add(1)),
            self.memory.read(pc.wrapping_add(2)),
            self.context.r.iter().map(|r| format!("{:02X}", r)).join(" "),
        )
    }

    /// Reads the operand byte at the given offset from the current instruction.
    fn operand(&self, offset: u8) -> u8 {
        self.memory.read(self.context.pc.wrapping_add(offset))
    }

    /// Reads an operand byte and decodes it as a register.
    fn register_operand(&self, offset: u8) -> Result<Register, Fault> {
        let byte = self.operand(offset);

        Register::from_byte(byte).ok_or(Fault::InvalidRegister {
            index: byte,
            pc: self.context.pc,
        })
    }

    /// Reads the two register operands of an ALU instruction.
    fn register_pair(&self) -> Result<(Register, Register), Fault> {
        Ok((self.register_operand(1)?, self.register_operand(2)?))
    }

    /// Pushes a value onto the stack.
    fn push(&mut self, value: u8) {
        let sp = self.context.r[Register::SP.index()].wrapping_sub(1);

        self.context.r[Register::SP.index()] = sp;
        self.memory.write(sp, value);
    }

    /// Pops the value at the top of the stack.
    fn pop(&mut self) -> u8 {
        let sp = self.context.r[Register::SP.index()];
        let value = self.memory.read(sp);

        self.context.r[Register::SP.index()] = sp.wrapping_add(1);

        value
    }
}

/// An IO handler for testing purposes.
///
/// Appends printed values to an output buffer.
pub struct TestIo {
    output_buffer: Vec<u8>,
}

impl TestIo {
    pub fn new() -> TestIo {
        TestIo {
            output_buffer: Vec::new(),
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output_buffer[..]
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output_buffer
    }
}

impl Output for TestIo {
    fn output(&mut self, value: u8) {
        self.output_buffer.push(value);
    }
}

impl Output for &mut TestIo {
    fn output(&mut self, value: u8) {
        self.output_buffer.push(value);
    }
}

/// An IO handler that prints each value as a decimal number on its own line
/// of the standard output.
pub struct StdIo;

impl Output for StdIo {
    fn output(&mut self, value: u8) {
        println!("{}", value);
    }
}

macro_rules! assert_register {
    ($emulator:expr, $register:expr, $value:expr) => {
        assert_eq!(
            $emulator.context.r[$register], $value,
            "Register R{} != {}", $register, $value,
        );
    };
}

#[cfg(test)]
fn load(bytes: Vec<u8>) -> Emulator<TestIo> {
    let program = crate::image::Program::from_bytes(bytes).unwrap();

    Emulator::new(program.to_memory(), TestIo::new())
}

#[test]
fn test_initial_state() {
    let emulator = Emulator::new(Memory::new(), TestIo::new());

    assert_eq!(emulator.context.pc, 0);
    assert_register!(emulator, 6, STACK_BASE_ADDRESS);
    assert!(emulator.running);
}

#[test]
fn test_ldi_hlt() {
    let mut emulator = load(vec![
        0b10000010, 0b00000001, 0b00101010, // LDI R1,42
        0b00000001,                         // HLT
    ]);

    emulator.run().unwrap();

    assert_register!(emulator, 1, 42);
    assert_eq!(emulator.context.pc, 4);
    assert!(!emulator.running);
}

#[test]
fn test_push_pop() {
    let mut emulator = load(vec![
        0b10000010, 0b00000000, 0b01100011, // LDI R0,99
        0b01000101, 0b00000000,             // PUSH R0
        0b01000110, 0b00000001,             // POP R1
        0b00000001,                         // HLT
    ]);

    emulator.run().unwrap();

    assert_register!(emulator, 1, 99);
    assert_register!(emulator, 6, STACK_BASE_ADDRESS);
    assert_eq!(emulator.memory.read(0xF3), 99);
    assert_eq!(emulator.context.pc, 8);
}

#[test]
fn test_call_ret() {
    let mut emulator = load(vec![
        0b10000010, 0b00000001, 0b00000111, // LDI R1,7
        0b01010000, 0b00000001,             // CALL R1
        0b00000001,                         // HLT
        0b00000000,
        0b10000010, 0b00000000, 0b00101010, // LDI R0,42
        0b00010001,                         // RET
    ]);

    emulator.run().unwrap();

    assert_register!(emulator, 0, 42);
    assert_register!(emulator, 6, STACK_BASE_ADDRESS);
    assert_eq!(emulator.context.pc, 6);
}

#[test]
fn test_compare_flags() {
    let mut emulator = Emulator::new(Memory::new(), TestIo::new());

    emulator.context.r[0] = 10;
    emulator.context.r[1] = 20;

    emulator.alu(AluOp::Cmp, Register::R0, Register::R1);
    assert_register!(emulator, 5, FLAG_LESS);

    emulator.context.r[0] = 30;

    emulator.alu(AluOp::Cmp, Register::R0, Register::R1);
    assert_register!(emulator, 5, FLAG_GREATER);

    emulator.context.r[1] = 30;

    emulator.alu(AluOp::Cmp, Register::R0, Register::R1);
    assert_register!(emulator, 5, FLAG_EQUAL);
}

#[test]
fn test_compare_clears_stale_flags() {
    let mut emulator = load(vec![
        0b10000010, 0b00000101, 0b11111111, // LDI R5,255
        0b10000010, 0b00000000, 0b00000101, // LDI R0,5
        0b10000010, 0b00000001, 0b00000101, // LDI R1,5
        0b10100111, 0b00000000, 0b00000001, // CMP R0,R1
        0b00000001,                         // HLT
    ]);

    emulator.run().unwrap();

    assert_register!(emulator, 5, FLAG_EQUAL);
}

#[test]
fn test_add_wraps() {
    let mut emulator = load(vec![
        0b10000010, 0b00000000, 0b11001000, // LDI R0,200
        0b10000010, 0b00000001, 0b01100100, // LDI R1,100
        0b10100000, 0b00000000, 0b00000001, // ADD R0,R1
        0b00000001,                         // HLT
    ]);

    emulator.run().unwrap();

    assert_register!(emulator, 0, 44);
}

#[test]
fn test_mult_wraps() {
    let mut emulator = Emulator::new(Memory::new(), TestIo::new());

    emulator.context.r[0] = 200;
    emulator.context.r[1] = 2;

    emulator.alu(AluOp::Mult, Register::R0, Register::R1);

    assert_register!(emulator, 0, 144);
}

#[test]
fn test_unknown_instruction_skipped() {
    let mut emulator = load(vec![
        0b11111111, // not an instruction
        0b00000001, // HLT
    ]);

    emulator.step().unwrap();

    assert_eq!(emulator.context.pc, 1);
    assert!(emulator.running);

    emulator.step().unwrap();

    assert!(!emulator.running);
}

#[test]
fn test_invalid_register_fault() {
    let mut emulator = load(vec![
        0b10000010, 0b00001010, 0b00000101, // LDI R10,5
    ]);

    assert_eq!(
        emulator.step(),
        Err(Fault::InvalidRegister { index: 10, pc: 0 }),
    );
}

#[test]
fn test_trace_format() {
    let mut emulator = load(vec![
        0b10000010, 0b00000000, 0b00001000, // LDI R0,8
        0b01000111, 0b00000000,             // PRN R0
        0b00000001,                         // HLT
    ]);

    assert_eq!(
        emulator.trace(),
        "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 F4 00",
    );

    emulator.step().unwrap();

    assert_eq!(
        emulator.trace(),
        "TRACE: 03 | 47 00 01 | 08 00 00 00 00 00 F4 00",
    );
}
