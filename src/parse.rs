use anyhow::anyhow;
use winnow::{Parser, combinator::repeat, token::one_of};

pub(crate) fn parse_binary_string(text: &str) -> anyhow::Result<Vec<bool>> {
    binary_digits
        .parse(text)
        .map_err(|e| anyhow!("Invalid binary string: {e}"))
}

fn binary_digits(input: &mut &str) -> winnow::Result<Vec<bool>> {
    repeat(0.., binary_digit).parse_next(input)
}

fn binary_digit(input: &mut &str) -> winnow::Result<bool> {
    one_of(['0', '1']).map(|digit: char| digit == '1').parse_next(input)
}
