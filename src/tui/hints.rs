// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

/// Generates `n` distinct hint labels of equal length over `hint_chars`.
///
/// All labels share one length (the shortest that fits `n`), so no label is a prefix of another
/// and a label is complete as soon as enough keys were typed.
pub(crate) fn gen_labels(n: usize, hint_chars: &str) -> Vec<String> {
    let alphabet: Vec<char> = hint_chars.chars().collect();
    assert!(!alphabet.is_empty(), "hint_chars must not be empty");
    let mut seen = HashSet::with_capacity(alphabet.len());
    assert!(
        alphabet.iter().all(|ch| seen.insert(*ch)),
        "hint_chars must not contain duplicate characters"
    );
    if n == 0 {
        return Vec::new();
    }

    let k = alphabet.len();
    let mut len = 1usize;
    let mut capacity = k;
    while capacity < n {
        if k == 1 {
            // A single character can only spell one label per length.
            return (1..=n).map(|len| alphabet[0].to_string().repeat(len)).collect();
        }
        len += 1;
        capacity = capacity.saturating_mul(k);
    }

    (0..n)
        .map(|mut index| {
            let mut chars = vec![alphabet[0]; len];
            for slot in chars.iter_mut().rev() {
                *slot = alphabet[index % k];
                index /= k;
            }
            chars.into_iter().collect()
        })
        .collect()
}

/// Narrows `labels` to the ones starting with `typed` (case-insensitive).
pub(crate) fn matching<'a>(labels: impl IntoIterator<Item = &'a str>, typed: &str) -> Vec<&'a str> {
    let typed = typed.to_ascii_uppercase();
    labels
        .into_iter()
        .filter(|label| label.to_ascii_uppercase().starts_with(&typed))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{gen_labels, matching};

    #[test]
    fn single_char_labels_when_alphabet_suffices() {
        assert_eq!(gen_labels(3, "abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn all_labels_grow_together() {
        assert_eq!(gen_labels(4, "abc"), vec!["aa", "ab", "ac", "ba"]);
    }

    #[test]
    fn labels_are_unique_and_prefix_free() {
        let labels = gen_labels(30, "ASDFJKLEWCMPGH");
        assert_eq!(labels.len(), 30);
        let unique = labels.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 30);
        assert!(labels.iter().all(|label| label.len() == 2));
        assert_eq!(&labels[..3], ["AA", "AS", "AD"]);
    }

    #[test]
    fn single_letter_alphabet_repeats() {
        assert_eq!(gen_labels(3, "x"), vec!["x", "xx", "xxx"]);
    }

    #[test]
    #[should_panic(expected = "hint_chars must not be empty")]
    fn empty_alphabet_panics() {
        let _ = gen_labels(1, "");
    }

    #[test]
    #[should_panic(expected = "hint_chars must not contain duplicate characters")]
    fn duplicate_chars_panic() {
        let _ = gen_labels(1, "abca");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let labels = ["AA", "AS", "SA"];
        assert_eq!(matching(labels, "a"), vec!["AA", "AS"]);
        assert_eq!(matching(labels, "sa"), vec!["SA"]);
        assert!(matching(labels, "q").is_empty());
    }
}
