// ---------------------------------------------------------------------------
// Field normalizer: free-text spec → comparable magnitude
// ---------------------------------------------------------------------------

/// Extract the first maximal run of ASCII digits from `raw` as a number.
///
/// Everything else (units, whitespace, punctuation) is ignored, so
/// `"8 GB"` gives `8.0` and `"RAM: 12GB extra 4"` gives `12.0`. There is no
/// decimal point, sign or thousands-separator handling: `"5,000 mAh"` gives
/// `5.0`.
///
/// Only ASCII `0-9` count as digits. Other scripts' digits (Arabic-Indic
/// `"٨ GB"`, fullwidth `"８GB"`) are treated like any other text.
///
/// Returns `None` when the string has no digit at all. That is an absent
/// value, not zero.
pub fn normalize(raw: &str) -> Option<f64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let rest = &raw[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let run = &rest[..end];

    match run.parse::<u64>() {
        Ok(n) => Some(n as f64),
        // Longer than u64: still a magnitude, just a very large one.
        Err(_) => run.parse::<f64>().ok(),
    }
}
