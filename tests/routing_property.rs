//! Property tests for the two routing predicates.

use proptest::prelude::*;

use weathervane::nodes::classify::mentions_weather;
use weathervane::nodes::validate::is_meaningful;

/// Apply a casing mask to "weather", e.g. [true, false, ...] -> "Weather...".
fn cased_weather(mask: &[bool; 7]) -> String {
    "weather"
        .chars()
        .zip(mask)
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    // Anything that trims down to fewer than two characters is rejected,
    // no matter how much whitespace padding it carries.
    #[test]
    fn short_trimmed_input_is_never_meaningful(
        lead in "[ \t\r\n]{0,8}",
        core in "[a-zA-Z0-9]{0,1}",
        trail in "[ \t\r\n]{0,8}",
    ) {
        let content = format!("{lead}{core}{trail}");
        prop_assert!(!is_meaningful(&content));
    }

    // Two or more non-whitespace characters always pass, with or without
    // padding.
    #[test]
    fn padded_real_queries_are_meaningful(
        lead in "[ \t]{0,8}",
        core in "[a-zA-Z0-9 ]{0,20}[a-zA-Z0-9]{2}",
        trail in "[ \t]{0,8}",
    ) {
        let content = format!("{lead}{core}{trail}");
        prop_assert!(is_meaningful(&content));
    }

    // The keyword is detected in every letter casing, wherever it sits in
    // the query.
    #[test]
    fn weather_is_detected_in_any_casing(
        prefix in "[a-z ?!]{0,20}",
        mask in proptest::array::uniform7(any::<bool>()),
        suffix in "[a-z ?!]{0,20}",
    ) {
        let content = format!("{prefix}{}{suffix}", cased_weather(&mask));
        prop_assert!(mentions_weather(&content));
    }

    // Lowercase text that never spells the keyword is never classified as a
    // weather request.
    #[test]
    fn queries_without_the_keyword_are_not_weather(content in "[a-z ?!]{0,40}") {
        prop_assume!(!content.contains("weather"));
        prop_assert!(!mentions_weather(&content));
    }
}
