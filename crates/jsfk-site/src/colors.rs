//! Stable tag colours.

/// Brand colours for well-known tags, checked in order by substring.
const PREDEFINED: [(&str, &str); 6] = [
    ("html", "#e34c26"),
    ("npm", "#cc3534"),
    ("pinia", "#ffdc67"),
    ("typescript", "#0086e0"),
    ("vite", "#9499ff"),
    ("vue", "#41b883"),
];

fn hsla(hue: i64) -> String {
    format!("hsla({}, 40%, 70%, 1)", hue)
}

/// Colour for a tag name.
///
/// Tags containing a predefined key get its brand colour; everything else is
/// hashed into a hue. The hash runs over UTF-16 code units and truncates the
/// accumulator to 32 bits before each shift, so hues match the ones the site
/// theme computes in the browser, including negative hues.
pub fn tag_color(name: &str) -> String {
    if let Some((_, color)) = PREDEFINED.iter().find(|(key, _)| name.contains(key)) {
        return color.to_string();
    }

    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = unit as i64 + (shifted - hash);
    }

    hsla(hash % 360)
}
