use ls8::{
    emulator::{Emulator, TestIo},
    image::Program,
};

fn read_program() -> Program {
    let image_file = include_str!("mult.ls8");

    Program::parse(image_file).unwrap()
}

#[test]
fn test_mult_read_program() {
    let p = read_program();

    assert_eq!(p.bytes, vec![
        0b10000010, 0b00000000, 0b00000101,
        0b10000010, 0b00000001, 0b00000110,
        0b10100010, 0b00000000, 0b00000001,
        0b01000111, 0b00000000,
        0b00000001,
    ]);
}

#[test]
fn test_mult_emulate_program() {
    let p = read_program();

    let mut io = TestIo::new();
    let mut e = Emulator::new(p.to_memory(), &mut io);

    e.run().unwrap();

    assert_eq!(e.context.r[0], 30);
    assert_eq!(io.into_output(), [30]);
}
