//! Filter sizing: number of bits and number of hashes for a target
//! false positive rate.
//!
//! - bits:   n = -m * ln(p) / (ln 2)^2, scaled by `c`
//! - hashes: k = (n / m) * ln 2, scaled by `d`

use std::f64::consts::LN_2;

use crate::error::{Error, Result};

/// Largest bit array a filter may allocate: 2^34 bits, 2 GiB
pub const MAX_NUM_BITS: u64 = 1 << 34;

/// Return the number of bits needed to satisfy the false positive
/// rate `false_pos_rate` if the filter will hold `num_items` items,
/// multiplied by the scale factor `scale`.  Never less than 1.
pub fn needed_bits(false_pos_rate: f64, num_items: u32, scale: f64) -> Result<usize> {
    if !(false_pos_rate > 0.0 && false_pos_rate < 1.0) {
        return Err(Error::invalid("p", format!("must be in (0,1), got {}", false_pos_rate)));
    }
    if num_items < 1 {
        return Err(Error::invalid("m", "must be at least 1"));
    }
    check_scale("c", scale)?;

    let ln22 = LN_2 * LN_2;
    let bits = (-(num_items as f64) * false_pos_rate.ln() / ln22 * scale).ceil();
    if !bits.is_finite() || bits > MAX_NUM_BITS as f64 {
        return Err(too_large(bits));
    }
    let bits = usize::try_from(bits as u64).map_err(|_| too_large(bits))?;
    Ok(bits.max(1))
}

/// Return the number of hashes to use for a filter of `num_bits`
/// bits holding `num_items` items, multiplied by the scale factor
/// `scale`.  Never less than 1.
pub fn optimal_num_hashes(num_bits: usize, num_items: u32, scale: f64) -> Result<u32> {
    if num_bits < 1 {
        return Err(Error::invalid("n", "must be at least 1"));
    }
    if num_items < 1 {
        return Err(Error::invalid("m", "must be at least 1"));
    }
    check_scale("d", scale)?;

    let k = (num_bits as f64 / num_items as f64 * LN_2 * scale).round();
    if k > u32::MAX as f64 {
        return Err(Error::invalid("d", format!("hash count overflows: {}", k)));
    }
    Ok((k as u32).max(1))
}

/// Predicted false positive rate of a filter with `num_bits` bits and
/// `num_hashes` hashes after `num_items` insertions:
/// (1 - e^(-k*m/n))^k
pub fn false_positive_rate(num_bits: usize, num_items: u32, num_hashes: u32) -> f64 {
    if num_bits == 0 {
        return 1.0;
    }
    let exponent = -(num_hashes as f64) * (num_items as f64) / (num_bits as f64);
    (1.0 - exponent.exp()).powi(num_hashes as i32)
}

fn too_large(bits: f64) -> Error {
    Error::invalid("c", format!("filter size {} exceeds {} bits", bits, MAX_NUM_BITS))
}

fn check_scale(name: &'static str, scale: f64) -> Result<()> {
    if scale > 0.0 && scale.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("scale factor must be > 0, got {}", scale)))
    }
}
