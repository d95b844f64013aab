/// The values the bytecode pipeline operates on. Only 64-bit floats for
/// this stage of the virtual machine; the tree walker carries its own,
/// richer value model in the `objects` crate.
pub type Value = f64;

/// Formats a value the way `print` renders numbers, matching C's `%g`
/// conversion: six significant digits, trailing fractional zeroes
/// stripped, and exponential notation once the decimal exponent drops
/// below -4 or reaches the precision.
pub fn print_value(value: Value) -> String {
  if value.is_nan() {
    return String::from("nan");
  }

  if value.is_infinite() {
    return String::from(if value < 0.0 { "-inf" } else { "inf" });
  }

  if value == 0.0 {
    return String::from(if value.is_sign_negative() { "-0" } else { "0" });
  }

  // Round to six significant digits first; the exponent of the *rounded*
  // value decides between fixed and exponential notation, so 999999.5
  // becomes 1e+06 rather than a seven-digit integer.
  let rounded = format!("{:.5e}", value);
  let (mantissa, exponent) = match rounded.split_once('e') {
    Some((mantissa, exponent)) => (mantissa, exponent),
    None => return rounded,
  };
  let exponent: i32 = match exponent.parse() {
    Ok(exponent) => exponent,
    Err(_) => return rounded,
  };

  if exponent < -4 || exponent >= 6 {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", strip_zeroes(mantissa), sign, exponent.abs())
  } else {
    let fraction_digits = (5 - exponent) as usize;
    strip_zeroes(&format!("{:.*}", fraction_digits, value)).to_string()
  }
}

/// Drops the trailing zeroes of a rendering's fractional part, and the
/// decimal point itself when nothing remains after it. Renderings without
/// a fractional part pass through untouched.
fn strip_zeroes(text: &str) -> &str {
  if text.contains('.') {
    text.trim_end_matches('0').trim_end_matches('.')
  } else {
    text
  }
}
