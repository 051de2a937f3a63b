use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Used for cost arithmetic (tier multipliers, cost-per-horsepower) so that
/// estimates are bit-identical across platforms.
pub type Money64 = I32F32;

/// Convert a u32 amount to Money64.
#[inline]
pub fn u32_to_money(v: u32) -> Money64 {
    Money64::from_num(v)
}

/// Round a Money64 to the nearest u32, clamping negatives to zero.
#[inline]
pub fn money_round_u32(v: Money64) -> u32 {
    // Rounding can overflow within half a unit of the type's limits.
    let Some(rounded) = v.checked_round() else {
        return if v < 0 { 0 } else { i32::MAX as u32 };
    };
    let n: i64 = rounded.to_num();
    if n < 0 { 0 } else { n as u32 }
}

/// Checked division that returns None on a zero divisor.
#[inline]
pub fn checked_div_money(a: Money64, b: Money64) -> Option<Money64> {
    a.checked_div(b)
}
