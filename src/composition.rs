use serde::Serialize;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Letter makeup of one input string.
///
/// `value` is the untouched input and acts as the identity key for drivers and
/// destinations. `size` is the length of `value` in UTF-16 code units, so a
/// character outside the Basic Multilingual Plane (an emoji, say) counts twice.
/// `vowels` and `consonants` only count the ASCII letters that survive
/// normalization, so `vowels + consonants <= size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub value: String,
    pub size: usize,
    pub vowels: usize,
    pub consonants: usize,
}

impl Composition {
    pub fn is_even(&self) -> bool {
        self.size % 2 == 0
    }
}

pub fn analyze(text: &str) -> Composition {
    let normalized = normalize(text);
    let letters = normalized.chars().count();
    let vowels = normalized.chars().filter(|c| VOWELS.contains(c)).count();
    Composition {
        value: text.to_string(),
        size: text.encode_utf16().count(),
        vowels,
        consonants: letters - vowels,
    }
}

// Downcase first, then keep only a-z. Lowercasing before filtering matters for
// the few non-ASCII characters whose lowercase form is an ASCII letter.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn counts_vowels_and_consonants() {
        let composition = analyze("ab");
        assert_eq!(composition.value, "ab");
        assert_eq!(composition.size, 2);
        assert_eq!(composition.vowels, 1);
        assert_eq!(composition.consonants, 1);
    }

    #[test]
    fn y_is_a_consonant() {
        let composition = analyze("xyz");
        assert_eq!(composition.vowels, 0);
        assert_eq!(composition.consonants, 3);
    }

    #[test]
    fn empty_string() {
        let composition = analyze("");
        assert_eq!(composition.size, 0);
        assert_eq!(composition.vowels, 0);
        assert_eq!(composition.consonants, 0);
        assert!(composition.is_even());
    }

    #[test]
    fn non_letters_count_towards_size_only() {
        let composition = analyze("  Main St. 42-B!");
        assert_eq!(composition.size, 16);
        assert_eq!(normalize("  Main St. 42-B!"), "mainstb");
        assert_eq!(composition.vowels, 2);
        assert_eq!(composition.consonants, 5);
        assert!(composition.is_even());
    }

    #[test]
    fn uppercase_vowels_are_counted() {
        let composition = analyze("AEIOU xyz");
        assert_eq!(composition.vowels, 5);
        assert_eq!(composition.consonants, 3);
        assert_eq!(composition.size, 9);
    }

    #[test]
    fn accented_letters_are_stripped() {
        let composition = analyze("café");
        assert_eq!(composition.size, 4);
        assert_eq!(composition.vowels, 1);
        assert_eq!(composition.consonants, 2);
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        let composition = analyze("😀");
        assert_eq!(composition.size, 2);
        assert!(composition.is_even());

        let composition = analyze("a😀b");
        assert_eq!(composition.size, 4);
        assert_eq!(composition.vowels, 1);
        assert_eq!(composition.consonants, 1);
    }

    #[test]
    fn composition_invariant_holds_for_random_text() {
        let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,-'!?\téø😀"
            .chars()
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let len = rng.random_range(0..40);
            let text: String = (0..len)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect();
            let composition = analyze(&text);
            let expected_letters = text
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .count();
            assert_eq!(composition.vowels + composition.consonants, expected_letters, "text: {:?}", text);
            assert_eq!(composition.size, text.encode_utf16().count(), "text: {:?}", text);
        }
    }
}
