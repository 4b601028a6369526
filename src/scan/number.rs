use super::cursor::Cursor;

/// Rewrite the numeric token at the cursor into the shortest legal form
/// for its value, rounding to `precision` decimal places first
/// (`i64::MAX` disables rounding).
///
/// The token is scanned once to find the sign, decimal point, exponent
/// and the span of non-zero significant digits; from those the decimal
/// orders of the most and least significant digits decide between plain
/// integer, fixed fraction and exponential output. The canonical bytes
/// are rendered into `scratch` (bounded by the token length plus one)
/// and spliced in only when they differ from the original token.
pub(crate) fn rewrite_number(cur: &mut Cursor<'_>, precision: i64, scratch: &mut Vec<u8>) {
    let buf = cur.bytes();
    let len = buf.len();
    let start = cur.read_pos();

    let negative = buf[start] == b'-';

    let mut decimal: Option<usize> = None;
    let mut exp_marker: Option<usize> = None;
    let mut exp_negative = false;
    let mut exp_value: i64 = 0;
    let mut nz_start: Option<usize> = None;
    let mut nz_finish = start;

    let mut i = start + usize::from(negative);
    let mut in_exponent = false;
    while i < len {
        let b = buf[i];
        if in_exponent {
            match b {
                b'0'..=b'9' => {
                    exp_value = exp_value
                        .saturating_mul(10)
                        .saturating_add(i64::from(b - b'0'));
                }
                _ => break,
            }
        } else {
            match b {
                b'.' => decimal = Some(i),
                b'e' | b'E' => {
                    exp_marker = Some(i);
                    in_exponent = true;
                    match buf.get(i + 1).copied() {
                        Some(b'-') => {
                            exp_negative = true;
                            i += 1;
                        }
                        Some(b'+') => i += 1,
                        _ => {}
                    }
                }
                b'0' => {}
                b'1'..=b'9' => {
                    if nz_start.is_none() {
                        nz_start = Some(i);
                    }
                    nz_finish = i;
                }
                _ => break,
            }
        }
        i += 1;
    }
    let token_end = i;
    let token_len = token_end - start;
    let mantissa_end = exp_marker.unwrap_or(token_end);
    if exp_negative {
        exp_value = exp_value.saturating_neg();
    }

    // No non-zero digit: the value is zero in any spelling, and a
    // negative zero loses its sign.
    let nzs = match nz_start {
        Some(p) => p,
        None => {
            if token_len == 1 && buf[start] == b'0' {
                cur.pass(1);
            } else {
                cur.skip(token_len);
                cur.emit(b'0');
            }
            return;
        }
    };
    let mut nzf = nz_finish;

    // Decimal order of the mantissa digit at byte position `p`.
    let order = |p: usize| -> i64 {
        match decimal {
            Some(d) if p < d => (d - 1 - p) as i64,
            Some(d) => -((p - d) as i64),
            None => (mantissa_end - 1 - p) as i64,
        }
    };

    let mut max_exponent = order(nzs).saturating_add(exp_value);
    let mut min_exponent = order(nzf).saturating_add(exp_value);
    let mut bump_last = false;
    let mut overflowed = false;

    if precision != i64::MAX {
        let cut_order = precision.checked_neg().unwrap_or(i64::MAX);
        if cut_order > max_exponent {
            // Every digit sits below the rounding place.
            cur.skip(token_len);
            cur.emit(b'0');
            return;
        }
        // Mantissa-relative order of the cut; the range check keeps the
        // position arithmetic honest when a saturated exponent has made
        // the absolute orders meaningless.
        let m = cut_order.saturating_sub(exp_value);
        if cut_order > min_exponent && m <= order(nzs) && m > order(nzf) {
            min_exponent = cut_order;
            let cut = match decimal {
                Some(d) => {
                    if m >= 0 {
                        d - 1 - m as usize
                    } else {
                        d + m.unsigned_abs() as usize
                    }
                }
                None => mantissa_end - 1 - m as usize,
            };
            let mut next = cut + 1;
            if decimal == Some(next) {
                next += 1;
            }
            if buf[next] >= b'5' {
                // Half away from zero: carry backward over the retained
                // digits. Nines drop out of the retained span instead of
                // being rewritten to zero.
                let mut j = cut as isize;
                let mut incremented = None;
                while j >= nzs as isize {
                    let b = buf[j as usize];
                    if b == b'9' {
                        min_exponent = min_exponent.saturating_add(1);
                    } else if b != b'.' {
                        incremented = Some(j as usize);
                        break;
                    }
                    j -= 1;
                }
                match incremented {
                    Some(p) => {
                        nzf = p;
                        bump_last = true;
                    }
                    None => {
                        // Carry past the most significant digit.
                        overflowed = true;
                        max_exponent = max_exponent.saturating_add(1);
                    }
                }
            } else {
                nzf = cut;
            }
            if !overflowed && !bump_last {
                // Zeros exposed by the cut are not significant.
                while nzf > nzs {
                    match buf[nzf] {
                        b'0' => {
                            nzf -= 1;
                            min_exponent = min_exponent.saturating_add(1);
                        }
                        b'.' => nzf -= 1,
                        _ => break,
                    }
                }
            }
        }
    }

    let zeroes: u64 = if min_exponent > 0 {
        min_exponent as u64
    } else if max_exponent < 0 {
        max_exponent.unsigned_abs()
    } else {
        0
    };
    let digit_width = max_exponent.saturating_sub(min_exponent).saturating_add(1);

    scratch.clear();
    if negative {
        scratch.push(b'-');
    }
    if zeroes >= 3 {
        // Exponential. A bare-digit mantissa with the exponent of the
        // least significant digit is shortest unless the larger exponent
        // magnitude costs more bytes than the decimal point it saves.
        let plain_cost = exponent_cost(min_exponent);
        let pointed_cost = usize::from(digit_width > 1) + exponent_cost(max_exponent);
        if pointed_cost < plain_cost {
            push_digits(scratch, buf, nzs, nzf, bump_last, overflowed, Some(1));
            push_exponent(scratch, max_exponent);
        } else {
            push_digits(scratch, buf, nzs, nzf, bump_last, overflowed, None);
            push_exponent(scratch, min_exponent);
        }
    } else if min_exponent >= 0 {
        push_digits(scratch, buf, nzs, nzf, bump_last, overflowed, None);
        for _ in 0..zeroes {
            scratch.push(b'0');
        }
    } else if max_exponent >= 0 {
        // Digits straddle the decimal point.
        push_digits(
            scratch,
            buf,
            nzs,
            nzf,
            bump_last,
            overflowed,
            Some((max_exponent + 1) as u64),
        );
    } else {
        scratch.push(b'0');
        scratch.push(b'.');
        for _ in 1..zeroes {
            scratch.push(b'0');
        }
        push_digits(scratch, buf, nzs, nzf, bump_last, overflowed, None);
    }

    if scratch.as_slice() == &cur.bytes()[start..token_end] {
        cur.pass(token_len);
    } else {
        cur.skip(token_len);
        cur.emit_all(scratch);
    }
}

/// Copy the significant digits `buf[from..=to]` into `scratch`, dropping
/// any interior decimal point and inserting a new one after `dot_after`
/// digits. The final digit is incremented when a rounding carry stopped
/// on it; a carry that overflowed the whole span collapses to `1`.
fn push_digits(
    scratch: &mut Vec<u8>,
    buf: &[u8],
    from: usize,
    to: usize,
    bump_last: bool,
    overflowed: bool,
    dot_after: Option<u64>,
) {
    if overflowed {
        scratch.push(b'1');
        return;
    }
    let mut emitted = 0u64;
    for p in from..=to {
        let b = buf[p];
        if !b.is_ascii_digit() {
            continue;
        }
        if dot_after == Some(emitted) && emitted > 0 {
            scratch.push(b'.');
        }
        if p == to && bump_last {
            scratch.push(b + 1);
        } else {
            scratch.push(b);
        }
        emitted += 1;
    }
}

fn push_exponent(scratch: &mut Vec<u8>, e: i64) {
    scratch.push(b'E');
    if e < 0 {
        scratch.push(b'-');
    }
    let mut tmp = [0u8; 20];
    let mut n = e.unsigned_abs();
    let mut at = tmp.len();
    loop {
        at -= 1;
        tmp[at] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    scratch.extend_from_slice(&tmp[at..]);
}

/// Byte cost of the exponent suffix after the `E`.
fn exponent_cost(e: i64) -> usize {
    let mut n = e.unsigned_abs();
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits + usize::from(e < 0)
}
