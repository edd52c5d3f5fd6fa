use ls8::{
    emulator::{Emulator, TestIo, STACK_BASE_ADDRESS},
    image::Program,
    instruction::Register,
};

fn read_program() -> Program {
    let image_file = include_str!("stack.ls8");

    Program::parse(image_file).unwrap()
}

#[test]
fn test_stack_read_program() {
    let p = read_program();

    assert_eq!(p.bytes, vec![
        0b10000010, 0b00000000, 0b01100011,
        0b01000101, 0b00000000,
        0b01000110, 0b00000001,
        0b00000001,
    ]);
}

#[test]
fn test_stack_emulate_program() {
    let p = read_program();

    let mut e = Emulator::new(p.to_memory(), TestIo::new());

    e.run().unwrap();

    assert_eq!(e.context.r[1], 99);
    assert_eq!(e.context.r[Register::SP.index()], STACK_BASE_ADDRESS);
    assert_eq!(e.memory.read(0xF3), 99);
}
