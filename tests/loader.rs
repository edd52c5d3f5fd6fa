use ls8::image::{ImageError, Program};

#[test]
fn test_skips_comments_blanks_and_garbage() {
    let source = r#"
# a comment on its own line

10000010   # a byte with a trailing comment
this line is not a byte
0000000
101010101
00001000 trailing junk
00001000
"#;

    let program = Program::parse(source).unwrap();

    assert_eq!(program.bytes, vec![0b10000010, 0b00001000]);
}

#[test]
fn test_empty_image() {
    let program = Program::parse("# nothing but this comment\n").unwrap();

    assert_eq!(program.bytes, vec![]);
}

#[test]
fn test_windows_line_endings() {
    let program = Program::parse("10000010\r\n00000001\r\n").unwrap();

    assert_eq!(program.bytes, vec![0b10000010, 0b00000001]);
}

#[test]
fn test_full_memory_fits() {
    let program = Program::from_bytes(vec![0; 256]).unwrap();

    assert_eq!(program.bytes.len(), 256);
}

#[test]
fn test_oversized_image_is_rejected() {
    assert_eq!(
        Program::from_bytes(vec![0; 300]),
        Err(ImageError::TooLarge { size: 300 }),
    );
}

#[test]
fn test_to_memory_zero_fills_the_tail() {
    let program = Program::parse("11111111\n").unwrap();
    let memory = program.to_memory();

    assert_eq!(memory.read(0), 255);
    assert_eq!(memory.read(1), 0);
    assert_eq!(memory.read(255), 0);
}
