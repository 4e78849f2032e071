//! TSV parsing into a review corpus.

use revlens_core::Corpus;

use crate::source::LoadError;

/// Parse header-row TSV text, extracting non-blank values from `column`.
///
/// Rows missing the column or holding whitespace-only values are dropped,
/// so the returned corpus may be empty. A missing header column or an
/// unparseable record is [`LoadError::Malformed`].
pub fn parse_tsv(raw: &str, column: &str) -> Result<Corpus, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?;
    let idx = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::Malformed(format!("no '{column}' column in header")))?;

    let mut reviews = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        // Short rows simply lack the column; drop them like blank values.
        if let Some(text) = record.get(idx) {
            let text = text.trim();
            if !text.is_empty() {
                reviews.push(text.to_string());
            }
        }
    }

    Ok(Corpus::new(reviews))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_column() {
        let tsv = "id\ttext\n1\tGreat product!\n2\tTerrible service.\n";
        let corpus = parse_tsv(tsv, "text").unwrap();
        assert_eq!(corpus.len(), 2);
        let items: Vec<_> = corpus.iter().collect();
        assert_eq!(items, vec!["Great product!", "Terrible service."]);
    }

    #[test]
    fn blank_and_whitespace_rows_dropped() {
        let tsv = "text\tid\nfine\t1\n\t2\n   \t3\nalso fine\t4\n";
        let corpus = parse_tsv(tsv, "text").unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn short_rows_dropped() {
        let tsv = "id\ttext\n1\tkept\n2\n";
        let corpus = parse_tsv(tsv, "text").unwrap();
        let items: Vec<_> = corpus.iter().collect();
        assert_eq!(items, vec!["kept"]);
    }

    #[test]
    fn missing_column_is_malformed() {
        let tsv = "id\tbody\n1\thello\n";
        let err = parse_tsv(tsv, "text").unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn values_are_trimmed() {
        let tsv = "text\n  padded  \n";
        let corpus = parse_tsv(tsv, "text").unwrap();
        assert_eq!(corpus.iter().next(), Some("padded"));
    }

    #[test]
    fn only_header_yields_empty_corpus() {
        let corpus = parse_tsv("text\n", "text").unwrap();
        assert!(corpus.is_empty());
    }
}
