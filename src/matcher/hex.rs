use rust_decimal::Decimal;

use crate::error::{Result, ToNumberError};
use crate::matcher::cursor::OutputBuffer;

/// Values with up to this many hex digits fit the fixed-width accumulator
pub(crate) const FAST_HEX_DIGITS: usize = 16;

/// Running value of the hex digits read so far
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HexAccumulator {
    Fast(u64),
    /// Bounded by the 96-bit mantissa of `Decimal`: values past `Decimal::MAX` (about 24 hex
    /// digits) fail with `ValueOutOfRange`.
    Wide(Decimal),
}

impl HexAccumulator {
    /// Pick the accumulator for a value with `matchable` hex digits
    pub(crate) fn for_digits(matchable: usize) -> Self {
        if matchable <= FAST_HEX_DIGITS {
            HexAccumulator::Fast(0)
        } else {
            HexAccumulator::Wide(Decimal::ZERO)
        }
    }

    /// Append one hex digit
    pub(crate) fn fold(&mut self, nibble: u32) -> Result<()> {
        match self {
            HexAccumulator::Fast(sum) => {
                *sum = (*sum << 4) + u64::from(nibble);
            }
            HexAccumulator::Wide(sum) => {
                *sum = sum
                    .checked_mul(Decimal::from(16))
                    .and_then(|shifted| shifted.checked_add(Decimal::from(nibble)))
                    .ok_or_else(|| {
                        ToNumberError::ValueOutOfRange("hex value overflows decimal".to_string())
                    })?;
            }
        }
        Ok(())
    }

    /// Write the accumulated value as decimal digits
    pub(crate) fn write_decimal(&self, out: &mut OutputBuffer) -> Result<()> {
        match self {
            HexAccumulator::Fast(sum) => write_u64(*sum, out),
            HexAccumulator::Wide(sum) => {
                for b in sum.to_string().bytes() {
                    out.push(b)?;
                }
                Ok(())
            }
        }
    }
}

/// Emit digits least significant first, then flip them in place
fn write_u64(mut value: u64, out: &mut OutputBuffer) -> Result<()> {
    let start = out.len();
    if value == 0 {
        return out.push(b'0');
    }
    while value > 0 {
        out.push(b'0' + (value % 10) as u8)?;
        value /= 10;
    }
    out.reverse_from(start);
    Ok(())
}
