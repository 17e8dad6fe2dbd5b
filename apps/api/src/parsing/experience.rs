use std::sync::LazyLock;

use regex::Regex;

static YEARS_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*\+?\s*years?").expect("years pattern should compile")
});

/// Largest "N years" / "N+ years" figure in the text. `None` when nothing
/// matches or the largest figure is zero.
pub fn extract_experience_years(text: &str) -> Option<f64> {
    let low = text.to_lowercase();
    let max = YEARS_MENTION
        .captures_iter(&low)
        .filter_map(|cap| cap.get(1)?.as_str().parse::<f64>().ok())
        .fold(0.0_f64, f64::max);
    (max > 0.0).then_some(max)
}
