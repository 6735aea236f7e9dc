/// `n!` as a float. Exact up to `n = 22`; overflows to infinity past `n = 170`.
pub fn factorial_f64(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * f64::from(k))
}

/// Physicists' Hermite polynomial `H_n(x)`.
///
/// Built from `H_{n+1} = 2x·H_n - 2n·H_{n-1}` with `H_0 = 1`, `H_1 = 2x`.
pub fn hermite(n: u32, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let mut h_prev = 1.0;
    let mut h_curr = 2.0 * x;
    for k in 1..n {
        let h_next = 2.0 * x * h_curr - 2.0 * f64::from(k) * h_prev;
        h_prev = h_curr;
        h_curr = h_next;
    }
    h_curr
}
