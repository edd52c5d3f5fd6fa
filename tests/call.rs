use ls8::{
    emulator::{Emulator, TestIo, STACK_BASE_ADDRESS},
    image::Program,
    instruction::Register,
};

use slog::{o, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

fn read_program() -> Program {
    let image_file = include_str!("call.ls8");

    Program::parse(image_file).unwrap()
}

#[test]
fn test_call_read_program() {
    let p = read_program();

    assert_eq!(p.bytes, vec![
        0b10000010, 0b00000001, 0b00000111,
        0b01010000, 0b00000001,
        0b00000001,
        0b00000000,
        0b10000010, 0b00000000, 0b00101010,
        0b00010001,
    ]);
}

#[test]
fn test_call_emulate_program() {
    let program = read_program();

    let decorator = TermDecorator::new().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = Logger::root(drain, o!());

    let mut io = TestIo::new();
    let mut emulator = Emulator::with_logger(program.to_memory(), &mut io, logger);

    while emulator.running {
        emulator.step().expect("error while executing the program");
    }

    assert_eq!(emulator.context.r[0], 42);
    assert_eq!(emulator.context.pc, 6);
    assert_eq!(emulator.context.r[Register::SP.index()], STACK_BASE_ADDRESS);
    assert!(io.into_output().is_empty());
}
