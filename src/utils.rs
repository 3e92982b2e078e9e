/// Splits `text` on `separator` wherever it is not nested inside `{}`, `[]` or `()`.
/// An empty input yields no parts.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Byte index of the last `needle` that sits outside any `{}`, `[]` or `()` group.
pub fn rfind_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    for (i, c) in text.char_indices() {
        match c {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => found = Some(i),
            _ => {}
        }
    }
    found
}

/// A type-level generic arity marker (`` `N ``) found in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityMarker {
    /// Byte index of the backtick.
    pub start: usize,
    /// Byte index just past the last digit.
    pub end: usize,
    pub arity: usize,
}

/// Finds all single-backtick arity markers. Method-level markers (``` ``N ```)
/// and generic parameter references are skipped.
pub fn find_arity_markers(name: &str) -> Vec<ArityMarker> {
    let bytes = name.as_bytes();
    let mut markers = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        if i + 1 < bytes.len() && bytes[i + 1] == b'`' {
            // ``N: skip both ticks and the digits that follow
            i += 2;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            continue;
        }
        let digits_start = i + 1;
        let mut end = digits_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // a marker trails a name; a bare `0 is a type parameter reference
        let trails_name = i > 0 && bytes[i - 1] != b'.';
        if end > digits_start && trails_name {
            if let Ok(arity) = name[digits_start..end].parse() {
                markers.push(ArityMarker { start: i, end, arity });
            }
        }
        i = end.max(i + 1);
    }
    markers
}

/// Removes every type-level arity marker, e.g. ``Ab.Cd`1`` becomes `Ab.Cd`.
pub fn strip_arity_markers(name: &str) -> String {
    let mut stripped = String::with_capacity(name.len());
    let mut copied = 0;
    for marker in find_arity_markers(name) {
        stripped.push_str(&name[copied..marker.start]);
        copied = marker.end;
    }
    stripped.push_str(&name[copied..]);
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_top_level_flat() {
        assert_eq!(split_top_level("A,B.C,``0", ','), vec!["A", "B.C", "``0"]);
        assert!(split_top_level("", ',').is_empty());
    }

    #[test]
    fn test_split_top_level_nested() {
        assert_eq!(
            split_top_level("System.Collections.Generic.Dictionary{System.String,System.Int32},System.Int32[0:,0:]", ','),
            vec![
                "System.Collections.Generic.Dictionary{System.String,System.Int32}",
                "System.Int32[0:,0:]"
            ]
        );
    }

    #[test]
    fn test_rfind_top_level() {
        assert_eq!(rfind_top_level("A.B.C", '.'), Some(3));
        assert_eq!(rfind_top_level("A.List{B.C}", '.'), Some(1));
        assert_eq!(rfind_top_level("List{B.C}", '.'), None);
    }

    #[test]
    fn test_find_arity_markers() {
        let markers = find_arity_markers("A.B`1.C`10");
        assert_eq!(
            markers,
            vec![
                ArityMarker { start: 3, end: 5, arity: 1 },
                ArityMarker { start: 7, end: 10, arity: 10 },
            ]
        );
    }

    #[test]
    fn test_find_arity_markers_skips_method_markers() {
        assert!(find_arity_markers("x``2").is_empty());
        assert!(find_arity_markers("``0").is_empty());
        assert!(find_arity_markers("`0").is_empty());
        assert!(find_arity_markers("Plain.Name").is_empty());
    }

    #[test]
    fn test_strip_arity_markers() {
        assert_eq!(strip_arity_markers("Ab.Cd`1"), "Ab.Cd");
        assert_eq!(strip_arity_markers("A.Outer`1.Inner`2"), "A.Outer.Inner");
        assert_eq!(strip_arity_markers("A.B.x``2"), "A.B.x``2");
        assert_eq!(strip_arity_markers("Plain"), "Plain");
    }
}
