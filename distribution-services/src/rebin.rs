//! Strike rebinning
//!
//! Truncates a full strike distribution to caller-supplied bounds, folding
//! out-of-range probability mass into the boundary bin. Total mass is
//! conserved for every choice of bounds.

use distribution_core::StrikeBin;
use rust_decimal::Decimal;

/// Errors raised by a rebinning request
#[derive(Debug, thiserror::Error)]
pub enum RebinError {
    #[error("Invalid bounds: smallest_bin {lower} exceeds largest_bin {upper}")]
    InvalidBoundOrdering { lower: Decimal, upper: Decimal },
}

/// Truncate a (strike, probability) series to `[lower, upper]`
///
/// The lower bound is applied first, then the upper bound on its result.
/// Each step removes the out-of-range rows and folds their summed mass into
/// the row at the boundary, inserting one if the boundary strike does not
/// already exist. A bound with zero mass beyond it leaves the series
/// untouched, so the output carries no row at that boundary unless one was
/// already there. The result is sorted ascending by strike.
///
/// An empty input yields an empty output. Supplying both bounds with
/// `lower > upper` is rejected.
pub fn rebin(
    mut bins: Vec<StrikeBin>,
    lower: Option<Decimal>,
    upper: Option<Decimal>,
) -> Result<Vec<StrikeBin>, RebinError> {
    if let (Some(lo), Some(hi)) = (lower, upper) {
        if lo > hi {
            return Err(RebinError::InvalidBoundOrdering {
                lower: lo,
                upper: hi,
            });
        }
    }

    if let Some(lo) = lower {
        let lump: Decimal = bins
            .iter()
            .filter(|b| b.strike < lo)
            .map(|b| b.probability)
            .sum();
        bins.retain(|b| b.strike >= lo);
        bins = fold_tail(bins, lump, lo);
    }

    if let Some(hi) = upper {
        let lump: Decimal = bins
            .iter()
            .filter(|b| b.strike > hi)
            .map(|b| b.probability)
            .sum();
        bins.retain(|b| b.strike <= hi);
        bins = fold_tail(bins, lump, hi);
    }

    bins.sort_by(|a, b| a.strike.cmp(&b.strike));
    Ok(bins)
}

/// Fold `lump` into the row at `boundary`
///
/// Merges into an existing row at exactly the boundary strike, otherwise
/// appends a new one. A zero lump is a no-op: no boundary row is created or
/// modified.
fn fold_tail(mut bins: Vec<StrikeBin>, lump: Decimal, boundary: Decimal) -> Vec<StrikeBin> {
    if lump.is_zero() {
        return bins;
    }

    match bins.iter_mut().find(|b| b.strike == boundary) {
        Some(bin) => bin.probability += lump,
        None => bins.push(StrikeBin {
            strike: boundary,
            probability: lump,
        }),
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bins(pairs: &[(Decimal, Decimal)]) -> Vec<StrikeBin> {
        pairs
            .iter()
            .map(|&(strike, probability)| StrikeBin {
                strike,
                probability,
            })
            .collect()
    }

    fn total_mass(bins: &[StrikeBin]) -> Decimal {
        bins.iter().map(|b| b.probability).sum()
    }

    #[test]
    fn test_lump_merges_into_existing_boundary() {
        let input = bins(&[(dec!(10), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(30), dec!(0.6))]);

        let out = rebin(input, Some(dec!(20)), None).unwrap();

        assert_eq!(
            out,
            bins(&[(dec!(20), dec!(0.4)), (dec!(30), dec!(0.6))])
        );
    }

    #[test]
    fn test_lump_inserts_new_boundary_row() {
        let input = bins(&[(dec!(10), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(30), dec!(0.6))]);

        let out = rebin(input, Some(dec!(15)), None).unwrap();

        assert_eq!(
            out,
            bins(&[(dec!(15), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(30), dec!(0.6))])
        );
    }

    #[test]
    fn test_upper_bound_folds_tail() {
        let input = bins(&[(dec!(10), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(30), dec!(0.6))]);

        let out = rebin(input, None, Some(dec!(25))).unwrap();

        assert_eq!(
            out,
            bins(&[(dec!(10), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(25), dec!(0.6))])
        );
    }

    #[test]
    fn test_bounds_outside_support_are_noops() {
        let input = bins(&[(dec!(10), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(30), dec!(0.6))]);

        let out = rebin(input.clone(), Some(dec!(5)), Some(dec!(35))).unwrap();

        // Zero mass beyond either bound, so no boundary rows appear
        assert_eq!(out, input);
    }

    #[test]
    fn test_no_bounds_sorts_by_strike() {
        let input = bins(&[(dec!(30), dec!(0.6)), (dec!(10), dec!(0.1)), (dec!(20), dec!(0.3))]);

        let out = rebin(input, None, None).unwrap();

        assert_eq!(
            out,
            bins(&[(dec!(10), dec!(0.1)), (dec!(20), dec!(0.3)), (dec!(30), dec!(0.6))])
        );
    }

    #[test]
    fn test_mass_is_conserved_for_interior_bounds() {
        let input = bins(&[
            (dec!(3.875), dec!(0.05)),
            (dec!(4.125), dec!(0.20)),
            (dec!(4.375), dec!(0.45)),
            (dec!(4.625), dec!(0.25)),
            (dec!(4.875), dec!(0.05)),
        ]);
        let before = total_mass(&input);

        let out = rebin(input, Some(dec!(4.125)), Some(dec!(4.625))).unwrap();

        assert_eq!(total_mass(&out), before);
        assert_eq!(
            out,
            bins(&[(dec!(4.125), dec!(0.25)), (dec!(4.375), dec!(0.45)), (dec!(4.625), dec!(0.30))])
        );
    }

    #[test]
    fn test_output_strikes_strictly_increasing() {
        let input = bins(&[
            (dec!(20), dec!(0.3)),
            (dec!(10), dec!(0.1)),
            (dec!(40), dec!(0.2)),
            (dec!(30), dec!(0.4)),
        ]);

        let out = rebin(input, Some(dec!(15)), Some(dec!(35))).unwrap();

        for pair in out.windows(2) {
            assert!(pair[0].strike < pair[1].strike);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let out = rebin(Vec::new(), Some(dec!(10)), Some(dec!(20))).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let input = bins(&[(dec!(10), dec!(1.0))]);

        let err = rebin(input, Some(dec!(30)), Some(dec!(20))).unwrap_err();

        assert!(matches!(
            err,
            RebinError::InvalidBoundOrdering { lower, upper }
                if lower == dec!(30) && upper == dec!(20)
        ));
    }
}
