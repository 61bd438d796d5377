//! Answer checking.

use crate::model::Problem;

/// Parse a learner's raw input as a whole number.
///
/// Surrounding whitespace is ignored. Anything else that is not a plain
/// decimal integer (empty input, letters, fractions) yields `None`.
pub fn parse_answer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Whether `raw` is the correct answer to `problem`.
///
/// Unparsable input is simply wrong.
pub fn evaluate(problem: &Problem, raw: &str) -> bool {
    parse_answer(raw) == Some(i64::from(problem.answer()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Operation;

    #[test]
    fn multiplication_match() {
        let p = Problem::new(3, 4, Operation::Multiplication).unwrap();
        assert!(evaluate(&p, "12"));
        assert!(evaluate(&p, " 12\n"));
        assert!(!evaluate(&p, "13"));
        assert!(!evaluate(&p, "-12"));
    }

    #[test]
    fn division_checks_quotient() {
        let p = Problem::new(18, 6, Operation::Division).unwrap();
        assert!(evaluate(&p, "3"));
        assert!(!evaluate(&p, "2"));
        assert!(!evaluate(&p, "18"));
    }

    #[test]
    fn unparsable_input_is_wrong() {
        let p = Problem::new(1, 1, Operation::Multiplication).unwrap();
        for raw in ["", "   ", "one", "1.0", "1a", "+", "99999999999999999999999"] {
            assert!(!evaluate(&p, raw), "{raw:?} should not match");
        }
    }

    #[test]
    fn zero_divisor_never_reaches_evaluate() {
        let parsed: Result<Problem, _> =
            serde_json::from_str(r#"{"a":6,"b":0,"operation":"division"}"#);
        assert!(parsed.is_err());

        let p: Problem =
            serde_json::from_str(r#"{"a":6,"b":3,"operation":"division"}"#).unwrap();
        assert!(evaluate(&p, "2"));
    }

    #[test]
    fn parse_answer_accepts_leading_zeros() {
        assert_eq!(parse_answer("007"), Some(7));
        assert_eq!(parse_answer("abc"), None);
        assert_eq!(parse_answer(""), None);
    }
}
