//! Tokenizer output shape.

use proptest::prelude::*;
use wikindex::tokenize;

proptest! {
    /// Property: every term is non-empty, lowercase ASCII alphanumeric
    #[test]
    fn prop_terms_are_lowercase_alphanumeric(text in "[ -~]{0,80}") {
        for term in tokenize(&text) {
            prop_assert!(!term.is_empty());
            prop_assert!(
                term.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()),
                "bad term {:?} from {:?}", term, text
            );
        }
    }

    /// Property: lowercase words lose one trailing 's'
    #[test]
    fn prop_lowercase_plural_is_stemmed(word in "[a-z]{1,10}") {
        let plural = format!("{}s", word);
        let terms = tokenize(&plural);
        prop_assert_eq!(terms.len(), 1);
        prop_assert!(terms.contains(&word));
    }

    /// Property: punctuation only separates, so joining words with it changes nothing
    #[test]
    fn prop_separators_are_interchangeable(
        words in prop::collection::vec("[a-z]{1,8}", 1..6),
        sep in "[ ,.;:!?()]{1,3}",
    ) {
        prop_assert_eq!(tokenize(&words.join(" ")), tokenize(&words.join(&sep)));
    }

    /// Property: tokenizing is insensitive to a whole-input case change of lowercase text
    #[test]
    fn prop_capitalized_word_same_term(word in "[a-z]{2,10}") {
        let capitalized = format!("{}{}", word[..1].to_ascii_uppercase(), &word[1..]);
        prop_assert_eq!(tokenize(&word), tokenize(&capitalized));
    }
}
