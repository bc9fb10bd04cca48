use cif_core::parse;
use proptest::prelude::*;

fn mantissa_strategy() -> impl Strategy<Value = (i64, u32)> {
    (0i64..999, 0u32..6)
}

proptest! {
    /// For any mantissa digits and any fractional-digit count, the
    /// uncertainty round-trips exactly.
    #[test]
    fn uncertainty_round_trips((whole, frac_digits) in mantissa_strategy(), unc in 0u32..100) {
        let mantissa = if frac_digits == 0 {
            format!("{}", whole)
        } else {
            format!("{:.*}", frac_digits as usize, whole as f64)
        };
        let text = format!("data_x\n_a {}({})\n", mantissa, unc);
        let doc = parse(&text).unwrap();
        let value = doc.first_block().unwrap().get_item("_a").unwrap();

        let expected_value: f64 = mantissa.parse().unwrap();
        let expected_uncertainty = unc as f64 * 10f64.powi(-(frac_digits as i32));

        prop_assert!(value.is_numeric_with_uncertainty());
        prop_assert!((value.numeric_value().unwrap() - expected_value).abs() < 1e-9);
        prop_assert!((value.uncertainty_value().unwrap() - expected_uncertainty).abs() < 1e-9);
    }

    /// Every parsed value's span is containment-consistent: the start
    /// position is contained, the end position is not.
    #[test]
    fn span_containment_is_half_open(n in 0i64..100000) {
        let text = format!("data_x\n_a {}\n", n);
        let doc = parse(&text).unwrap();
        let value = doc.first_block().unwrap().get_item("_a").unwrap();
        let span = value.span;

        prop_assert!(span.contains(span.start_line, span.start_col));
        prop_assert!(!span.contains(span.end_line, span.end_col));
    }

    /// Span coverage: the source substring a value's span points at is
    /// exactly that value's textual form.
    #[test]
    fn span_covers_exact_textual_form(n in 0i64..100000) {
        let literal = n.to_string();
        let text = format!("data_x\n_a {}\n", literal);
        let doc = parse(&text).unwrap();
        let value = doc.first_block().unwrap().get_item("_a").unwrap();
        let span = value.span;

        prop_assert_eq!(span.start_line, span.end_line);
        let line = text.lines().nth(span.start_line - 1).unwrap();
        let slice = &line[span.start_col - 1..span.end_col - 1];
        prop_assert_eq!(slice, literal);
    }
}
