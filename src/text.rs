//! Review text normalization.
//!
//! The shipped classifier was trained against exactly this frontend:
//! lowercase, strip a narrow punctuation set, split on the literal space
//! character. Widening the punctuation set or switching to general
//! whitespace splitting would shift tokens away from the vocabulary the
//! model saw during training, so both are reproduced verbatim.

/// Characters deleted before splitting. Fixed set; everything else
/// (apostrophes, semicolons, quotes, ...) passes through to the tokens.
const STRIPPED: [char; 6] = ['.', ',', '!', '?', '(', ')'];

/// Split review text into normalized tokens.
///
/// Lowercases the input, deletes every occurrence of `. , ! ? ( )`, then
/// splits on single spaces. Consecutive spaces produce empty-string tokens;
/// those survive here and encode to the out-of-vocabulary sentinel
/// downstream, matching the frontend the model was trained with.
///
/// # Examples
///
/// ```rust
/// let tokens = candle_sentiment::text::tokenize("Great movie!! (loved it)");
/// assert_eq!(tokens, vec!["great", "movie", "loved", "it"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect();

    cleaned.split(' ').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn lowercases_and_strips_fixed_punctuation() {
        assert_eq!(
            tokenize("Great movie!! (loved it)"),
            vec!["great", "movie", "loved", "it"]
        );
    }

    #[test]
    fn only_the_fixed_set_is_stripped() {
        // Apostrophes, semicolons and quotes are not in the set.
        assert_eq!(tokenize("it's \"fine\"; really"), vec!["it's", "\"fine\";", "really"]);
    }

    #[test]
    fn consecutive_spaces_yield_empty_tokens() {
        assert_eq!(tokenize("good  film"), vec!["good", "", "film"]);
    }

    #[test]
    fn empty_input_yields_one_empty_token() {
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn no_stemming_or_stopword_removal() {
        assert_eq!(
            tokenize("the movies were amazing"),
            vec!["the", "movies", "were", "amazing"]
        );
    }
}
