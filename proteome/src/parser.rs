//! Delimiter-aware parsing of exported peptide and protein tables
//!
//! The field delimiter is picked once per table from the header line. Rows
//! whose cell count disagrees with the header are skipped and recorded,
//! rather than aborting the whole table.
use super::*;
use memchr::memchr2_iter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Which of a sample's two input tables is being handled
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Peptide,
    Protein,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TableKind::Peptide => write!(f, "peptide"),
            TableKind::Protein => write!(f, "protein"),
        }
    }
}

/// Decimal separator used by numeric cells
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericLocale {
    #[default]
    Dot,
    /// `1234,5` is read as `1234.5`
    Comma,
}

/// Permissively convert a cell to a number: unparsable or non-finite
/// values become `0.0`
pub fn coerce(value: &str, locale: NumericLocale) -> f64 {
    let value = value.trim();
    let parsed = match locale {
        NumericLocale::Dot => value.parse::<f64>(),
        NumericLocale::Comma => value.replace(',', ".").parse::<f64>(),
    };
    match parsed {
        Ok(x) if x.is_finite() => x,
        _ => 0.0,
    }
}

/// Splits a line on `delimiter`, ignoring delimiters inside a matched pair
/// of double quotes. A quote left open at the end of the line is literal.
/// Unlike a plain byte split, a trailing delimiter produces a trailing
/// empty cell.
struct Fork<'a> {
    pos: usize,
    haystack: &'a str,
    delimiter: u8,
    done: bool,
}

impl<'a> Fork<'a> {
    fn new(delimiter: u8, haystack: &'a str) -> Self {
        Self {
            pos: 0,
            haystack,
            delimiter,
            done: false,
        }
    }
}

impl<'a> Iterator for Fork<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let bytes = &self.haystack.as_bytes()[self.pos..];
        let mut from = 0;
        loop {
            let mut quoted = false;
            let mut open = 0;
            for idx in memchr2_iter(self.delimiter, b'"', &bytes[from..]).map(|i| i + from) {
                if bytes[idx] == b'"' {
                    if !quoted {
                        open = idx;
                    }
                    quoted = !quoted;
                } else if !quoted {
                    let cell = &self.haystack[self.pos..self.pos + idx];
                    self.pos += idx + 1;
                    return Some(cell);
                }
            }
            if !quoted {
                break;
            }
            // unmatched: rescan past the quote
            from = open + 1;
        }
        self.done = true;
        Some(&self.haystack[self.pos..])
    }
}

/// Trim a cell and remove one pair of surrounding double quotes, undoubling
/// any escaped quotes inside
fn unquote(cell: &str) -> Cow<'_, str> {
    let cell = cell.trim();
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        let inner = &cell[1..cell.len() - 1];
        if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        }
    } else {
        Cow::Borrowed(cell)
    }
}

/// Pick the field delimiter from a header line: tab if it outnumbers both
/// other candidates, else semicolon if it outnumbers comma, else comma
pub(crate) fn detect_delimiter(header: &str) -> u8 {
    let count = |c: u8| header.bytes().filter(|&b| b == c).count();
    let (tabs, commas, semis) = (count(b'\t'), count(b','), count(b';'));
    if tabs > commas && tabs > semis {
        b'\t'
    } else if semis > commas {
        b';'
    } else {
        b','
    }
}

/// A data row dropped because its cell count disagreed with the header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

/// A parsed table: ordered header cells and one cell vector per data row
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub kind: TableKind,
    pub delimiter: u8,
    headers: Vec<String>,
    /// Lowercased header -> column index, first occurrence wins
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
    skipped: Vec<SkippedRow>,
}

impl Table {
    /// Parse raw file text into a [`Table`]
    ///
    /// # Example
    ///
    /// ```rust
    /// # use proteome::*;
    /// let table = Table::parse(TableKind::Protein, "Accession,Description\nP1,\"a, b\"\n").unwrap();
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.rows().next().unwrap().get("description"), Some("a, b"));
    /// ```
    pub fn parse(kind: TableKind, text: &str) -> Result<Table> {
        let mut lines = text
            .split('\n')
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines.next().ok_or(Error::EmptyTable(kind))?;
        let delimiter = detect_delimiter(header);

        let headers = Fork::new(delimiter, header)
            .map(|cell| unquote(cell).into_owned())
            .collect::<Vec<String>>();

        let mut index = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            index.entry(name.to_lowercase()).or_insert(idx);
        }

        let mut rows = Vec::new();
        let mut skipped = Vec::new();
        for (line, text) in lines {
            let cells = Fork::new(delimiter, text)
                .map(|cell| unquote(cell).into_owned())
                .collect::<Vec<String>>();
            if cells.len() != headers.len() {
                log::warn!(
                    "{} table line {}: expected {} cells, found {}; row skipped",
                    kind,
                    line,
                    headers.len(),
                    cells.len()
                );
                skipped.push(SkippedRow {
                    line,
                    expected: headers.len(),
                    found: cells.len(),
                });
                continue;
            }
            rows.push(cells);
        }

        Ok(Table {
            kind,
            delimiter,
            headers,
            index,
            rows,
            skipped,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Case-insensitive column lookup
    pub fn column(&self, name: &str) -> Option<usize> {
        self.index.get(&name.trim().to_lowercase()).copied()
    }

    /// Every name in `required` that has no matching column
    pub fn missing(&self, required: &[&str]) -> Vec<MissingColumn> {
        required
            .iter()
            .filter(|name| self.column(name).is_none())
            .map(|name| MissingColumn {
                table: self.kind,
                column: name.to_string(),
            })
            .collect()
    }

    /// Number of data rows that were kept
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            table: self,
            cells: cells.as_slice(),
        })
    }
}

/// A borrowed view of one data row, addressable by header name
#[derive(Copy, Clone, Debug)]
pub struct Row<'t> {
    table: &'t Table,
    cells: &'t [String],
}

impl<'t> Row<'t> {
    pub fn get(&self, column: &str) -> Option<&'t str> {
        let idx = self.table.column(column)?;
        self.cells.get(idx).map(String::as_str)
    }

    /// Cell value coerced to a number, `0.0` if missing or unparsable
    pub fn number(&self, column: &str, locale: NumericLocale) -> f64 {
        self.get(column).map(|v| coerce(v, locale)).unwrap_or(0.0)
    }

    /// (header, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'t str, &'t str)> {
        self.table
            .headers
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fork() {
        let mut fork = Fork::new(b'\t', "hello\t\"quoted\tfield\"\t1111\t");
        assert_eq!(fork.next(), Some("hello"));
        assert_eq!(fork.next(), Some("\"quoted\tfield\""));
        assert_eq!(fork.next(), Some("1111"));
        assert_eq!(fork.next(), Some(""));
        assert_eq!(fork.next(), None);
    }

    #[test]
    fn delimiter_detection() {
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb,c"), b',');
        assert_eq!(detect_delimiter("abc"), b',');
        assert_eq!(detect_delimiter("a;b,c;d"), b';');
    }

    #[test]
    fn unquoting() {
        assert_eq!(unquote(" \"Area\" "), "Area");
        assert_eq!(unquote("\"say \"\"hi\"\"\""), "say \"hi\"");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn coercion() {
        assert_eq!(coerce("12.5", NumericLocale::Dot), 12.5);
        assert_eq!(coerce("12,5", NumericLocale::Dot), 0.0);
        assert_eq!(coerce("12,5", NumericLocale::Comma), 12.5);
        assert_eq!(coerce("n/a", NumericLocale::Dot), 0.0);
        assert_eq!(coerce("NaN", NumericLocale::Dot), 0.0);
        assert_eq!(coerce(" 3 ", NumericLocale::Dot), 3.0);
    }

    #[test]
    fn empty_table() {
        match Table::parse(TableKind::Peptide, "\n \r\n\n") {
            Err(Error::EmptyTable(TableKind::Peptide)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn crlf_and_blank_lines() {
        let table = Table::parse(TableKind::Protein, "A\tB\r\n\r\n1\t2\r\n3\t4\r\n").unwrap();
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.headers(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.len(), 2);
        let values = table
            .rows()
            .map(|r| r.get("b").unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["2", "4"]);
    }

    #[test]
    fn mismatched_rows_are_skipped() {
        let text = "a,b,c,d,e\n1,2,3,4,5\n1,2,3,4\n6,7,8,9,10\n";
        let table = Table::parse(TableKind::Protein, text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.skipped(),
            &[SkippedRow {
                line: 3,
                expected: 5,
                found: 4
            }]
        );
        assert_eq!(table.rows().nth(1).unwrap().number("e", NumericLocale::Dot), 10.0);
    }

    #[test]
    fn quoted_tabs_in_descriptions() {
        let text = "Accession\tDescription\n\"P1\"\t\"kinase\tdomain containing\"\n";
        let table = Table::parse(TableKind::Protein, text).unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Accession"), Some("P1"));
        assert_eq!(row.get("Description"), Some("kinase\tdomain containing"));
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec![("Accession", "P1"), ("Description", "kinase\tdomain containing")]
        );
    }

    #[test]
    fn unmatched_quote_is_literal() {
        let mut fork = Fork::new(b'\t', "P1\t5\" fragment\t100");
        assert_eq!(fork.next(), Some("P1"));
        assert_eq!(fork.next(), Some("5\" fragment"));
        assert_eq!(fork.next(), Some("100"));
        assert_eq!(fork.next(), None);

        let mut fork = Fork::new(b',', "\"a,b\",c\",d");
        assert_eq!(fork.next(), Some("\"a,b\""));
        assert_eq!(fork.next(), Some("c\""));
        assert_eq!(fork.next(), Some("d"));
        assert_eq!(fork.next(), None);

        let text = "Accession\tDescription\tArea\nP1\t5\" fragment\t100\nP2\tok\t200\n";
        let table = Table::parse(TableKind::Protein, text).unwrap();
        assert!(table.skipped().is_empty());
        assert_eq!(table.len(), 2);
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("Description"), Some("5\" fragment"));
        assert_eq!(row.number("Area", NumericLocale::Dot), 100.0);
    }

    #[test]
    fn missing_reports_all() {
        let table = Table::parse(TableKind::Peptide, "Peptide,Area\nPEPTIDE,1\n").unwrap();
        let missing = table
            .missing(&["Peptide", "Unique", "Protein Group"])
            .into_iter()
            .map(|m| m.column)
            .collect::<Vec<_>>();
        assert_eq!(missing, vec!["Unique", "Protein Group"]);
    }
}
