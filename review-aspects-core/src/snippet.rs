/// Cuts a window of whole words around the mention at byte `mention_offset`.
///
/// Starts with `reach` words on each side and narrows until the fragment is at
/// most `max_len` characters. `None` when even the mentioned word alone is too
/// long or the result is blank.
pub fn extract_snippet(text: &str, mention_offset: usize, max_len: usize, reach: usize) -> Option<String> {
    if text.chars().count() <= max_len {
        return non_blank(text);
    }

    // byte offset where every word starts, plus one past the end
    let mut starts = vec![0];
    for word in text.split(' ') {
        let previous = starts[starts.len() - 1];
        starts.push(previous + word.len() + 1);
    }
    let last = starts.len() - 1;
    let mention = starts.partition_point(|start| *start < mention_offset);

    let mut reach = reach as isize;
    while reach >= 0 {
        let from = (mention as isize - reach).max(0) as usize;
        let to = (mention as isize + reach + 1).min(last as isize) as usize;
        if from.min(last) >= to {
            return None;
        }

        let fragment = &text[starts[from].min(text.len())..starts[to].min(text.len())];
        if fragment.chars().count() <= max_len {
            return non_blank(fragment);
        }

        reach -= 1;
    }

    None
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(count: usize) -> String {
        (0..count).map(|i| format!("w{:02}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn short_text_is_kept_whole() {
        assert_eq!(extract_snippet(" The screen is gorgeous. ", 5, 80, 10), Some("The screen is gorgeous.".to_owned()));
        assert_eq!(extract_snippet("   ", 0, 80, 10), None);
    }

    #[test]
    fn window_narrows_until_it_fits() {
        let text = numbered_words(40);
        // "w20" starts at byte 80
        let snippet = extract_snippet(&text, 80, 80, 10).unwrap();

        assert!(snippet.chars().count() <= 80);
        assert!(snippet.starts_with("w11 "));
        assert!(snippet.ends_with(" w29"));
    }

    #[test]
    fn mention_at_the_start() {
        let text = numbered_words(40);
        let snippet = extract_snippet(&text, 0, 20, 10).unwrap();

        assert_eq!(snippet, "w00 w01 w02 w03 w04");
    }

    #[test]
    fn oversized_word_gives_nothing() {
        let text = format!("short {} words", "x".repeat(100));
        assert_eq!(extract_snippet(&text, 6, 80, 10), None);
    }

    #[test]
    fn multibyte_text_is_cut_on_word_boundaries() {
        let text = vec!["écran"; 30].join(" ");
        let snippet = extract_snippet(&text, 7 * 15, 40, 10).unwrap();

        assert!(snippet.chars().count() <= 40);
        assert!(snippet.split(' ').all(|word| word == "écran"));
    }
}
