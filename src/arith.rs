//! Scalar integer arithmetic that reports overflow instead of wrapping
//!
//! Every operation here decides overflow from the signs and magnitudes of its
//! operands before computing, so no intermediate result ever wraps.

use crate::Fault;

pub type Scalar<T> = Result<T, Fault>;

pub fn add(x: i64, y: i64) -> Option<i64> {
    if (y > 0 && x > i64::MAX - y) || (y < 0 && x < i64::MIN - y) {
        None
    } else {
        Some(x + y)
    }
}

pub fn sub(x: i64, y: i64) -> Option<i64> {
    if (y < 0 && x > i64::MAX + y) || (y > 0 && x < i64::MIN + y) {
        None
    } else {
        Some(x - y)
    }
}

pub fn mul(x: i64, y: i64) -> Option<i64> {
    if x == 0 || y == 0 {
        return Some(0);
    }
    let fits = match (x > 0, y > 0) {
        (true, true) => x <= i64::MAX / y,
        (false, false) => x >= i64::MAX / y,
        (true, false) => y >= i64::MIN / x,
        (false, true) => x >= i64::MIN / y,
    };
    fits.then(|| x * y)
}

pub fn neg(x: i64) -> Option<i64> {
    (x != i64::MIN).then(|| -x)
}

pub fn abs(x: i64) -> Option<i64> {
    if x < 0 {
        neg(x)
    } else {
        Some(x)
    }
}

/// Floor division with a positive divisor
///
/// A zero divisor gives zero.
pub fn quotient(x: i64, y: i64) -> Scalar<i64> {
    match y {
        0 => Ok(0),
        y if y < 0 => Err(Fault::NegativeDivisor),
        y if x >= 0 => Ok(x / y),
        // (x + 1) cannot overflow since x is negative
        y => Ok((x + 1) / y - 1),
    }
}

/// The remainder matching [`quotient`], always in `0..y`
///
/// A zero divisor gives the dividend back.
pub fn modulo(x: i64, y: i64) -> Scalar<i64> {
    match y {
        0 => Ok(x),
        y if y < 0 => Err(Fault::NegativeDivisor),
        y => {
            let m = x % y;
            Ok(if m < 0 { m + y } else { m })
        }
    }
}

/// Round a real down to the nearest integer
pub fn floor(r: f64) -> Scalar<i64> {
    let f = r.floor();
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.is_nan() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        Err(Fault::Overflow)
    } else {
        Ok(f as i64)
    }
}

/// Raise an integer to a non-negative integer power
pub fn int_power(base: i64, exp: u64) -> Option<i64> {
    let mut res: i64 = 1;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            res = mul(res, base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = mul(base, base)?;
        }
    }
    Some(res)
}

/// The result of an integer power, which is a real for negative exponents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Power {
    Int(i64),
    Real(f64),
}

pub fn power_int_int(base: i64, exp: i64) -> Scalar<Power> {
    if exp >= 0 {
        return int_power(base, exp as u64)
            .map(Power::Int)
            .ok_or(Fault::Overflow);
    }
    match int_power(base, exp.unsigned_abs()) {
        Some(0) => Err(Fault::DivZero),
        Some(p) => Ok(Power::Real(1.0 / p as f64)),
        // |base| > 1 here, so the reciprocal underflows toward zero
        None => Ok(Power::Real((base as f64).powf(exp as f64))),
    }
}

pub fn power_real_int(base: f64, exp: i64) -> Scalar<f64> {
    let magnitude = exp.unsigned_abs().min(i32::MAX as u64) as i32;
    let p = base.powi(magnitude);
    if exp >= 0 {
        Ok(p)
    } else if p == 0.0 {
        Err(Fault::Power)
    } else {
        Ok(1.0 / p)
    }
}

pub fn power_real_real(base: f64, exp: f64) -> Scalar<Power> {
    if base == 0.0 {
        Ok(Power::Real(if exp != 0.0 { 0.0 } else { 1.0 }))
    } else if base > 0.0 {
        Ok(Power::Real(base.powf(exp)))
    } else if exp.fract() == 0.0 && exp.abs() < i64::MAX as f64 {
        power_real_int(base, exp as i64).map(Power::Real)
    } else {
        Err(Fault::Power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_is_detected() {
        assert_eq!(add(i64::MAX, 1), None);
        assert_eq!(add(i64::MIN, -1), None);
        assert_eq!(add(i64::MAX, -1), Some(i64::MAX - 1));
        assert_eq!(sub(i64::MIN, 1), None);
        assert_eq!(sub(0, i64::MIN), None);
        assert_eq!(sub(-1, i64::MIN), Some(i64::MAX));
        assert_eq!(mul(i64::MAX, 2), None);
        assert_eq!(mul(i64::MIN, -1), None);
        assert_eq!(mul(-1, i64::MIN), None);
        assert_eq!(mul(i64::MIN, 1), Some(i64::MIN));
        assert_eq!(mul(-3, -4), Some(12));
        assert_eq!(abs(i64::MIN), None);
        assert_eq!(neg(i64::MAX), Some(-i64::MAX));
    }

    #[test]
    fn quotient_and_modulo_floor() {
        assert_eq!(quotient(7, 2), Ok(3));
        assert_eq!(quotient(-7, 2), Ok(-4));
        assert_eq!(quotient(-6, 2), Ok(-3));
        assert_eq!(quotient(5, 0), Ok(0));
        assert_eq!(quotient(5, -1), Err(Fault::NegativeDivisor));
        assert_eq!(quotient(i64::MIN, 1), Ok(i64::MIN));
        assert_eq!(modulo(-7, 3), Ok(2));
        assert_eq!(modulo(7, 3), Ok(1));
        assert_eq!(modulo(7, 0), Ok(7));
        assert_eq!(modulo(7, -3), Err(Fault::NegativeDivisor));
        for x in -20..20 {
            for y in 1..7 {
                let (q, m) = (quotient(x, y).unwrap(), modulo(x, y).unwrap());
                assert_eq!(q * y + m, x);
            }
        }
    }

    #[test]
    fn floor_of_reals() {
        assert_eq!(floor(2.7), Ok(2));
        assert_eq!(floor(-2.1), Ok(-3));
        assert_eq!(floor(1e300), Err(Fault::Overflow));
        assert_eq!(floor(f64::NAN), Err(Fault::Overflow));
    }

    #[test]
    fn powers() {
        assert_eq!(power_int_int(2, 10), Ok(Power::Int(1024)));
        assert_eq!(power_int_int(2, 63), Err(Fault::Overflow));
        assert_eq!(power_int_int(-2, 63), Ok(Power::Int(i64::MIN)));
        assert_eq!(power_int_int(2, -2), Ok(Power::Real(0.25)));
        assert_eq!(power_int_int(0, -1), Err(Fault::DivZero));
        assert_eq!(power_real_int(0.0, -1), Err(Fault::Power));
        assert_eq!(power_real_real(0.0, 0.0), Ok(Power::Real(1.0)));
        assert_eq!(power_real_real(-8.0, 2.0), Ok(Power::Real(64.0)));
        assert_eq!(power_real_real(-8.0, 0.5), Err(Fault::Power));
    }
}
