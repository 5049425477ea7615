/// Reports whether `word` reads the same forwards and backwards, ignoring
/// case. Comparison happens on code points, so non-ASCII keys are handled
/// correctly.
pub(crate) fn is_palindrome(word: &str) -> bool {
    let normalized: Vec<char> = word.to_lowercase().chars().collect();
    normalized
        .iter()
        .zip(normalized.iter().rev())
        .take(normalized.len() / 2)
        .all(|(front, back)| front == back)
}
