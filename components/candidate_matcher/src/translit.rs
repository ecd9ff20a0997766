// components/candidate_matcher/src/translit.rs

/// One-directional Latin to Cyrillic character transliteration.
///
/// The table is deliberately a per-character map: no digraph clusters
/// ("sh", "ch", "ya") and no diacritic handling. It only needs to be good
/// enough for substring matching against channel names, not to be
/// linguistically correct. Characters without a mapping (including 'q')
/// pass through unchanged.
pub fn to_cyrillic(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars().flat_map(|c| c.to_lowercase()) {
        match map_char(c) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(c),
        }
    }
    out
}

fn map_char(c: char) -> Option<&'static str> {
    let mapped = match c {
        'a' => "а",
        'b' => "б",
        'c' => "с",
        'd' => "д",
        'e' => "е",
        'f' => "ф",
        'g' => "г",
        'h' => "х",
        'i' => "и",
        'j' => "й",
        'k' => "к",
        'l' => "л",
        'm' => "м",
        'n' => "н",
        'o' => "о",
        'p' => "п",
        'r' => "р",
        's' => "с",
        't' => "т",
        'u' => "у",
        'v' => "в",
        'w' => "в",
        'x' => "кс",
        'y' => "й",
        'z' => "з",
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_mapping() {
        assert_eq!(to_cyrillic("vesna"), "весна");
        assert_eq!(to_cyrillic("zemfira"), "земфира");
    }

    #[test]
    fn test_multi_char_expansion() {
        assert_eq!(to_cyrillic("xo"), "ксо");
    }

    #[test]
    fn test_unmapped_pass_through() {
        assert_eq!(to_cyrillic("q1-я"), "q1-я");
    }

    #[test]
    fn test_uppercase_input_is_lowered() {
        assert_eq!(to_cyrillic("MOLCHAT"), "молсхат");
    }
}
