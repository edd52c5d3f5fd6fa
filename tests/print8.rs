use ls8::{
    emulator::{Emulator, TestIo},
    image::Program,
};

fn read_program() -> Program {
    let image_file = include_str!("print8.ls8");

    Program::parse(image_file).unwrap()
}

#[test]
fn test_print8_read_program() {
    let p = read_program();

    assert_eq!(p.bytes, vec![
        0b10000010, 0b00000000, 0b00001000,
        0b01000111, 0b00000000,
        0b00000001,
    ]);
}

#[test]
fn test_print8_emulate_program() {
    let p = read_program();

    let mut io = TestIo::new();
    let mut e = Emulator::new(p.to_memory(), &mut io);

    while e.running {
        println!("{}", e.trace());
        e.step().unwrap();
    }

    assert_eq!(e.context.pc, 6);
    assert_eq!(io.into_output(), [8]);
}
