// src/output/csv.rs

use crate::table::{ResultSet, Role};

/// Anything that can be written as a CSV field. `None` encodes as empty.
pub trait Field {
    fn text(&self) -> Option<&str>;
}

impl Field for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Field for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: Field + ?Sized> Field for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

impl<T: Field> Field for Option<T> {
    fn text(&self) -> Option<&str> {
        match self {
            Some(v) => v.text(),
            None => None,
        }
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

fn push_field(out: &mut String, field: &str) {
    if needs_quotes(field) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Render rows as CSV: `,` between fields, `\n` after every row.
pub fn encode<I, R, F>(rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: Field,
{
    let mut out = String::new();
    for row in rows {
        let mut first = true;
        for field in row {
            if !first {
                out.push(',');
            }
            first = false;
            push_field(&mut out, field.text().unwrap_or(""));
        }
        out.push('\n');
    }
    out
}

/// The full output file body: `Low,High,Last,Weight Avg` followed by one line per record.
pub fn encode_records(records: &ResultSet) -> String {
    let header = Role::ALL.map(Role::label);
    encode(std::iter::once(header).chain(records.iter().map(|r| r.fields())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::extract;

    #[test]
    fn test_plain_rows() {
        let out = encode([
            ["Low", "High", "Last", "Weight Avg"],
            ["10", "20", "15", "17.5"],
        ]);
        assert_eq!(out, "Low,High,Last,Weight Avg\n10,20,15,17.5\n");
    }

    #[test]
    fn test_quotes_commas_and_newlines() {
        let out = encode([["He said \"hi\", ok\n"]]);
        assert_eq!(out, "\"He said \"\"hi\"\", ok\n\"\n");

        assert_eq!(encode([["a,b", "c"]]), "\"a,b\",c\n");
        assert_eq!(encode([["cr\rhere"]]), "\"cr\rhere\"\n");
        assert_eq!(encode([["\""]]), "\"\"\"\"\n");
    }

    #[test]
    fn test_comma_with_spaces_is_quoted_verbatim() {
        assert_eq!(encode([[" 1.234,5 "]]), "\" 1.234,5 \"\n");
    }

    #[test]
    fn test_spaces_tabs_and_semicolons_not_quoted() {
        assert_eq!(encode([[" 12;3 "]]), " 12;3 \n");
        assert_eq!(encode([["a\tb"]]), "a\tb\n");
    }

    #[test]
    fn test_none_is_empty_field() {
        let rows = vec![vec![Some("a"), None, Some("c")], vec![None, None, None]];
        assert_eq!(encode(rows), "a,,c\n,,\n");
    }

    #[test]
    fn test_no_rows_is_empty_output() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(encode(rows), "");
    }

    #[test]
    fn test_owned_strings() {
        let rows = vec![vec!["x".to_string(), "y z".to_string()]];
        assert_eq!(encode(&rows), "x,y z\n");
    }

    #[test]
    fn test_encode_records_writes_header_first() {
        let headers: Vec<String> = ["Hour", "Low", "High", "Last", "Weighted Avg"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec!["1".into(), "10".into(), "20".into(), "15".into(), "17.5".into()],
            vec!["2".into(), "1,000.00".into(), "-".into(), "".into(), "9".into()],
        ];
        let set = extract(&headers, &rows).unwrap();
        assert_eq!(
            encode_records(&set),
            "Low,High,Last,Weight Avg\n10,20,15,17.5\n\"1,000.00\",-,,9\n"
        );
    }
}
