use nom::{
    IResult,
    bytes::complete::{tag, take_while, take_while_m_n},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, pair, preceded},
};

const SPACE_CHARACTERS: &'static str = " \t";

fn sp(input: &str) -> IResult<&str, &str> {
    take_while(|c| SPACE_CHARACTERS.contains(c))(input)
}

fn is_binary_digit(c: char) -> bool {
    c == '0' || c == '1'
}

/// Parses a memory byte: exactly eight binary digits.
fn binary_byte(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(8, 8, is_binary_digit),
        |s| u8::from_str_radix(s, 2),
    )(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    preceded(tag("#"), take_while(|c| c != '\n'))(input)
}

/// Parses a single line of a program image.
///
/// A line carries at most one byte, surrounded by optional whitespace and an
/// optional comment. Anything else makes the whole line fail.
fn line(input: &str) -> IResult<&str, Option<u8>> {
    all_consuming(delimited(sp, opt(binary_byte), pair(sp, opt(comment))))(input)
}

/// Extracts the memory bytes of a program image, in source order.
///
/// Lines that do not parse are skipped.
pub(crate) fn parse_image(source: &str) -> Vec<u8> {
    let mut bytes = Vec::new();

    for source_line in source.lines() {
        if let Ok((_, Some(byte))) = line(source_line) {
            bytes.push(byte);
        }
    }

    bytes
}
