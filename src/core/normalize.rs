// src/core/normalize.rs
//! Field normalization shared by the extractor (before write) and the
//! aggregator (after read).
//!
//! Every function here is pure and idempotent: feeding a normalized value
//! back in, in its persisted textual form, yields the same value.

/// Strings that mean "no value" in every column.
pub const NULL_SENTINELS: [&str; 2] = ["N/A", ""];

/// Trimmed text, or `None` for a sentinel.
pub fn text(raw: &str) -> Option<String> {
    let t = raw.trim();
    if NULL_SENTINELS.contains(&t) { None } else { Some(t.to_string()) }
}

pub fn opt_text(raw: Option<&str>) -> Option<String> {
    raw.and_then(text)
}

/// Rating like `"7.9"`. Anything unparseable is `None`.
pub fn score(raw: &str) -> Option<f64> {
    finite(text(raw)?.parse::<f64>().ok()?)
}

pub fn opt_score(raw: Option<&str>) -> Option<f64> {
    raw.and_then(score)
}

/// Vote count in compact notation: `850K` → 850_000, `1.2M` → 1_200_000,
/// `12345` → 12_345. The suffix is folded into an exponent before parsing so
/// `1.2M` is exactly 1200000 rather than `1.2 * 1e6`.
pub fn vote_count(raw: &str) -> Option<f64> {
    let t = text(raw)?.replace(',', "");

    let (mantissa, exp) = if let Some(m) = t.strip_suffix(&['K', 'k'][..]) {
        (m, "e3")
    } else if let Some(m) = t.strip_suffix(&['M', 'm'][..]) {
        (m, "e6")
    } else {
        (t.as_str(), "")
    };

    let mantissa = mantissa.trim_end();
    if mantissa.is_empty() { return None; }

    finite(join!(mantissa, exp).parse::<f64>().ok()?)
}

pub fn opt_vote_count(raw: Option<&str>) -> Option<f64> {
    raw.and_then(vote_count)
}

/// Persisted form of a normalized number; empty for null.
pub fn render_decimal(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn compact_suffixes() {
        assert_eq!(vote_count("1.2M"), Some(1_200_000.0));
        assert_eq!(vote_count("1.3M"), Some(1_300_000.0));
        assert_eq!(vote_count("850K"), Some(850_000.0));
        assert_eq!(vote_count("12k"), Some(12_000.0));
        assert_eq!(vote_count("12345"), Some(12_345.0));
        assert_eq!(vote_count("12,345"), Some(12_345.0));
    }

    #[test]
    fn sentinels_and_junk_are_null() {
        for raw in ["N/A", "", "   ", "K", "M", "abc", "1.2B", "NaN", "inf", "1e3K"] {
            assert_eq!(vote_count(raw), None, "vote_count({raw:?})");
        }
        for raw in ["N/A", "", "seven", "nan"] {
            assert_eq!(score(raw), None, "score({raw:?})");
        }
        assert_eq!(text(" N/A "), None);
        assert_eq!(text("2024"), Some(s!("2024")));
    }

    #[test]
    fn score_parses_decimal() {
        assert_eq!(score("8.0"), Some(8.0));
        assert_eq!(score(" 7.4 "), Some(7.4));
    }

    #[test]
    fn rendering_round_trips_through_normalization() {
        let v = vote_count("1.2M");
        assert_eq!(render_decimal(v), "1200000");
        assert_eq!(vote_count(&render_decimal(v)), v);
        assert_eq!(render_decimal(None), "");
    }

    proptest! {
        #[test]
        fn vote_count_is_idempotent(raw in "\\PC{0,12}") {
            let once = vote_count(&raw);
            prop_assert_eq!(vote_count(&render_decimal(once)), once);
        }

        #[test]
        fn compact_vote_count_is_idempotent(n in 0u32..100_000, suffix in "[KkMm]?") {
            let once = vote_count(&format!("{n}{suffix}"));
            prop_assert!(once.is_some());
            prop_assert_eq!(vote_count(&render_decimal(once)), once);
        }

        #[test]
        fn score_is_idempotent(raw in "\\PC{0,8}") {
            let once = score(&raw);
            prop_assert_eq!(score(&render_decimal(once)), once);
        }

        #[test]
        fn text_is_idempotent(raw in "\\PC{0,16}") {
            let once = text(&raw);
            prop_assert_eq!(opt_text(once.as_deref()), once.clone());
        }
    }
}
