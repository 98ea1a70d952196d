use super::*;

fn strs(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::as_str).collect()
}

// --- Single tokens and runs ---

#[test]
fn test_literal_runs() {
    assert_eq!(expand("k3"), ["k", "k", "k"]);
    assert_eq!(expand("p2"), ["p", "p"]);
    assert_eq!(expand("K2, P1"), ["k", "k", "p"]);
}

#[test]
fn test_primitives_lowercased() {
    assert_eq!(
        expand("K2TOG, p2tog; SSK ssp YO m1L M1r k P"),
        ["k2tog", "p2tog", "ssk", "ssp", "yo", "m1l", "m1r", "k", "p"]
    );
}

#[test]
fn test_separators_only() {
    assert!(expand("").is_empty());
    assert!(expand(" ,; ,,  ;").is_empty());
}

#[test]
fn test_pass_through_fragments() {
    assert_eq!(expand("k, sl1, kfb; psso"), ["k", "sl1", "kfb", "psso"]);
    assert_eq!(expand("R1: k2"), ["R1:", "k", "k"]);
}

// --- Groups ---

#[test]
fn test_bracket_group() {
    assert_eq!(expand("[k, p] 3x"), ["k", "p", "k", "p", "k", "p"]);
    assert_eq!(expand("[k2tog, yo] 2 times"), ["k2tog", "yo", "k2tog", "yo"]);
}

#[test]
fn test_star_group() {
    assert_eq!(expand("*k, p* 2회; yo"), ["k", "p", "k", "p", "yo"]);
    assert_eq!(expand("* ssk * 3 x"), ["ssk", "ssk", "ssk"]);
}

#[test]
fn test_korean_unit() {
    assert_eq!(expand("[yo] 2회"), ["yo", "yo"]);
}

#[test]
fn test_times_glyph_normalised() {
    assert_eq!(expand("[k] ×3"), ["k", "k", "k"]);
    assert_eq!(expand("[p] 2×"), ["p", "p"]);
}

#[test]
fn test_zero_repeats() {
    assert!(expand("[k,p] 0x").is_empty());
    assert_eq!(expand("yo, *k* 0 times, ssk"), ["yo", "ssk"]);
}

#[test]
fn test_nested_groups() {
    assert_eq!(
        expand("[(p, k) x 2, m1L] x 2"),
        ["p", "k", "p", "k", "m1l", "p", "k", "p", "k", "m1l"]
    );
}

#[test]
fn test_nested_same_brackets() {
    assert_eq!(
        expand("[[k] 2x, p] 2x"),
        ["k", "k", "p", "k", "k", "p"]
    );
}

#[test]
fn test_star_around_brackets() {
    assert_eq!(
        expand("*[k2tog] 2x, yo* 2x"),
        ["k2tog", "k2tog", "yo", "k2tog", "k2tog", "yo"]
    );
}

#[test]
fn test_group_is_n_copies_of_inner() {
    for inner in ["k", "k2, p", "yo, (ssk, k) x 2", "m1l; sl1"] {
        let once = expand(inner);
        for n in 0..4 {
            let expected: Vec<Token> = std::iter::repeat_n(once.clone(), n).flatten().collect();
            assert_eq!(expand(&format!("[{inner}] {n}x")), expected, "[{inner}] {n}x");
        }
    }
}

#[test]
fn test_group_without_multiplier_expands_once() {
    assert_eq!(expand("(k, p)"), ["k", "p"]);
    assert_eq!(expand("[yo, k] k2"), ["yo", "k", "k", "k"]);
    assert_eq!(expand("*k* then"), ["k", "then"]);
}

#[test]
fn test_star_closes_at_counted_star() {
    // The first closing star has no count, so the group runs to the second
    // and the middle star is left over inside it.
    assert_eq!(expand("*k* p* 2x"), ["k", "*", "p", "k", "*", "p"]);
    assert_eq!(expand("*k, p* 2x"), ["k", "p", "k", "p"]);
}

// --- Malformed input ---

#[test]
fn test_unclosed_bracket_kept() {
    assert_eq!(expand("[k, p 2x"), ["[", "k", "p", "2x"]);
}

#[test]
fn test_stray_closer_kept() {
    assert_eq!(expand("k) p]"), ["k", ")", "p", "]"]);
}

#[test]
fn test_lone_star_kept() {
    assert_eq!(expand("rep from * to end"), ["rep", "from", "*", "to", "end"]);
}

#[test]
fn test_unit_without_count() {
    assert_eq!(expand("[k] x, p"), ["k", "x", "p"]);
}

// --- Properties ---

#[test]
fn test_expanded_output_is_stable() {
    let first = expand("[(p, k) x 3, m1L] x 2, k2tog, sl1, yo");
    let joined = strs(&first).join(", ");
    assert_eq!(expand(&joined), first);
}

#[test]
fn test_stray_delimiters_do_not_round_trip() {
    let first = expand("( [ ) ]");
    assert_eq!(first, ["[", "]"]);
    assert!(expand(&strs(&first).join(", ")).is_empty());
}

// --- Korean units ---

#[test]
fn test_korean_unit_followed_by_korean() {
    assert_eq!(expand("[k, p] 2회씩"), ["k", "p", "k", "p"]);
    assert_eq!(expand("*yo* 3회반복, k"), ["yo", "yo", "yo", "k"]);
}

#[test]
fn test_ascii_unit_running_into_word() {
    assert_eq!(expand("[k, p] 2xk"), ["k", "p", "2xk"]);
}

// --- Oversized counts ---

#[test]
fn test_oversized_run_passes_through() {
    assert_eq!(expand("k99999999999, p"), ["k99999999999", "p"]);
    assert_eq!(expand(&format!("p{MAX_REPEAT}")).len(), MAX_REPEAT);
}

#[test]
fn test_oversized_group_count_expands_once() {
    assert_eq!(expand("[k] 99999999999x"), ["k", "99999999999x"]);
}

// --- Generated properties ---

mod properties {
    use proptest::prelude::*;

    use super::*;

    fn arb_fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec![
                "k", "P", "K2TOG", "p2tog", "ssk", "SSP", "Yo", "m1L", "M1R",
            ])
            .prop_map(str::to_string),
            (prop::sample::select(vec!["k", "p", "K"]), 0usize..12)
                .prop_map(|(stitch, n)| format!("{stitch}{n}")),
            "[a-z][a-z0-9]{0,5}",
        ]
    }

    fn arb_flat() -> impl Strategy<Value = String> {
        prop::collection::vec(arb_fragment(), 0..8).prop_map(|parts| parts.join(", "))
    }

    /// A flat list, optionally followed by a counted paren group.
    fn arb_inner() -> impl Strategy<Value = String> {
        (arb_flat(), prop::option::of((arb_flat(), 0usize..4))).prop_map(|(flat, group)| {
            match group {
                Some((grouped, m)) => format!("{flat}, ({grouped}) x {m}"),
                None => flat,
            }
        })
    }

    proptest! {
        #[test]
        fn expanded_tokens_expand_to_themselves(pattern in arb_flat()) {
            let first = expand(&pattern);
            let again = expand(&strs(&first).join(", "));
            prop_assert_eq!(again, first);
        }

        #[test]
        fn counted_group_is_n_copies(inner in arb_inner(), n in 0usize..5) {
            let once = expand(&inner);
            let expected: Vec<Token> = std::iter::repeat_n(once, n).flatten().collect();
            prop_assert_eq!(expand(&format!("[{inner}] {n}x")), expected);
        }

        #[test]
        fn star_and_bracket_groups_agree(inner in arb_flat(), n in 0usize..5) {
            prop_assert_eq!(
                expand(&format!("*{inner}* {n} times")),
                expand(&format!("[{inner}] {n} times"))
            );
        }
    }
}
