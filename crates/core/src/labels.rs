//! Parser for the uploaded class-label text file.

/// Parse a class-label file: one label per line, file order preserved.
///
/// Blank lines are skipped; surrounding whitespace (including a Windows
/// carriage return) is trimmed off each label.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_labels;

    #[test]
    fn preserves_file_order() {
        let labels = parse_labels("car\ntruck\nperson\n");
        assert_eq!(labels, vec!["car", "truck", "person"]);
    }

    #[test]
    fn skips_blank_lines_and_trims() {
        let labels = parse_labels("car\r\n\n  bike \n");
        assert_eq!(labels, vec!["car", "bike"]);
    }

    #[test]
    fn empty_file_yields_empty_list() {
        assert!(parse_labels("").is_empty());
    }
}
