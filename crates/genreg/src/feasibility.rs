//! Parameter pre-check: reject (n, k, g) combinations that provably admit no graph.
//!
//! Policy
//! - `Impossible` only when a theorem rules the parameters out: odd degree sum,
//!   too few vertices, or fewer vertices than the known cage order / Moore bound.
//! - `Open` marks regimes where existence is plausible but the search may be very
//!   slow or the minimum order is unknown. The search logs the advice and proceeds.

use std::fmt;

use crate::search::Params;

/// Known cage orders `(k, g) -> n`: smallest k-regular graphs of girth g.
pub(crate) const CAGE_ORDERS: &[(usize, usize, usize)] =
    &[(3, 5, 10), (3, 6, 14), (4, 5, 19), (4, 6, 26)];

/// Pre-check verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feasibility {
    Plausible,
    Open { advice: String },
    Impossible { reason: String },
}

impl Feasibility {
    #[inline]
    pub fn is_plausible(&self) -> bool {
        !matches!(self, Self::Impossible { .. })
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plausible => write!(f, "plausible"),
            Self::Open { advice } => write!(f, "open: {advice}"),
            Self::Impossible { reason } => write!(f, "impossible: {reason}"),
        }
    }
}

/// Boolean form used by callers that only need a go/no-go signal.
pub fn is_plausible(n: usize, k: usize, g: usize) -> bool {
    assess(Params::new(n, k, g)).is_plausible()
}

pub fn assess(params: Params) -> Feasibility {
    let Params { n, k, g } = params;
    let impossible = |reason: String| Feasibility::Impossible { reason };

    if n == 0 {
        return impossible("no vertices".into());
    }
    if n % 2 == 1 && k % 2 == 1 {
        return impossible("both n and k are odd".into());
    }
    if g <= 3 || k <= 2 {
        if n < g || n <= k {
            return impossible(format!("n <= k or n < g (n={n}, k={k}, g={g})"));
        }
        return Feasibility::Plausible;
    }
    if g == 4 {
        if n < 2 * k {
            return impossible(format!("n < 2k for g = 4 (n={n}, k={k})"));
        }
        return Feasibility::Plausible;
    }
    if let Some(&(_, _, order)) = CAGE_ORDERS.iter().find(|&&(ck, cg, _)| ck == k && cg == g) {
        if n < order {
            return impossible(format!("n < {order} for k = {k} and g = {g}"));
        }
        return Feasibility::Plausible;
    }
    let bound = moore_bound(k, g);
    if (n as u128) < bound {
        return impossible(format!("n below the Moore bound {bound} for k = {k}, g = {g}"));
    }
    let advice = match k {
        3 => "cubic graphs with g >= 7: see the House of Graphs cubic cage tables",
        4 => "quartic graphs with g >= 7: see the House of Graphs quartic tables",
        _ => "k >= 5 and g >= 5: search may be slow; see Meringer's regular graph tables",
    };
    Feasibility::Open {
        advice: advice.to_string(),
    }
}

/// Lower bound on the order of a k-regular graph with girth g (k ≥ 2, g ≥ 3).
///
/// Odd g = 2d+1: `1 + k Σ_{i<d} (k-1)^i`. Even g = 2d: `2 Σ_{i<d} (k-1)^i`.
/// Saturates instead of overflowing.
pub fn moore_bound(k: usize, g: usize) -> u128 {
    let d = g / 2;
    let base = k.saturating_sub(1) as u128;
    let mut sum: u128 = 0;
    let mut term: u128 = 1;
    for _ in 0..d {
        sum = sum.saturating_add(term);
        term = term.saturating_mul(base);
    }
    if g % 2 == 1 {
        sum.saturating_mul(k as u128).saturating_add(1)
    } else {
        sum.saturating_mul(2)
    }
}
