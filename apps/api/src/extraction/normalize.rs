use serde::Serialize;

/// Canonical resume text: non-empty, whitespace-collapsed lines in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedText {
    lines: Vec<String>,
    full: String,
}

impl NormalizedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The lines joined with `\n`.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn into_string(self) -> String {
        self.full
    }
}

/// Collapses every whitespace run to one space, trims each line and drops the
/// lines left empty. Total; never fails.
pub fn normalize(text: &str) -> NormalizedText {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect();
    let full = lines.join("\n");
    NormalizedText { lines, full }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_internal_whitespace_and_trims() {
        let n = normalize("  Jane \t  Doe  \n\tSenior   Engineer ");
        assert_eq!(n.lines(), ["Jane Doe", "Senior Engineer"]);
        assert_eq!(n.as_str(), "Jane Doe\nSenior Engineer");
    }

    #[test]
    fn test_drops_blank_lines_and_keeps_order() {
        let n = normalize("first\n\n   \n\u{a0}\nsecond\r\nthird");
        assert_eq!(n.lines(), ["first", "second", "third"]);
    }

    #[test]
    fn test_empty_input_yields_empty_text() {
        let n = normalize(" \n\n\t");
        assert!(n.lines().is_empty());
        assert_eq!(n.as_str(), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "JOHN SMITH\n  Software   Engineer\n\njohn@example.com  ",
            "\t\ta\u{2003}b\n\n\nc  d\r\n",
            "",
            "single",
        ];
        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }
}
