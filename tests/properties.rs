use infixtree::{build, render, Error};
use proptest::prelude::*;

/// A well-formed expression, with some ignored characters sprinkled between the tokens.
fn expression() -> impl Strategy<Value = String> {
    "[0-9]([ a]{0,2}[-+*/][ a]{0,2}[0-9]){0,24}"
}

fn significant_chars(src: &str) -> Vec<char> {
    src.chars()
        .filter(|ch| ch.is_ascii_digit() || "+-*/".contains(*ch))
        .collect()
}

proptest! {
    /// The output contains exactly the digits and operators of the input.
    #[test]
    fn prop_characters_are_conserved(src in expression()) {
        let mut expected = significant_chars(&src);
        let mut actual = render(&build(&src).unwrap()).chars().collect::<Vec<_>>();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    /// Operands come out in the order they went in.
    #[test]
    fn prop_digit_order_is_preserved(src in expression()) {
        let rendered = render(&build(&src).unwrap());
        let digits_in = src.chars().filter(char::is_ascii_digit).collect::<String>();
        let digits_out = rendered.chars().filter(char::is_ascii_digit).collect::<String>();
        prop_assert_eq!(digits_out, digits_in);
    }

    /// Since every operator node has exactly two children, the traversal reproduces the input's
    /// significant characters exactly, whatever shape precedence gave the tree.
    #[test]
    fn prop_traversal_reproduces_input(src in expression()) {
        let tree = build(&src).unwrap();
        let expected = significant_chars(&src).into_iter().collect::<String>();
        prop_assert_eq!(tree.len(), expected.len());
        prop_assert_eq!(render(&tree), expected);
    }

    /// Arbitrary input either builds or is reported as malformed. It never panics. Inputs like
    /// `+12` still build, so only the multiset of characters is checked.
    #[test]
    fn prop_arbitrary_input_never_panics(src in "\\PC{0,40}") {
        match build(&src) {
            Ok(tree) => {
                let mut expected = significant_chars(&src);
                let mut actual = render(&tree).chars().collect::<Vec<_>>();
                expected.sort_unstable();
                actual.sort_unstable();
                prop_assert_eq!(actual, expected);
            }
            Err(Error::Parse(_)) => (),
            Err(err) => prop_assert!(false, "unexpected error: {}", err),
        }
    }
}
