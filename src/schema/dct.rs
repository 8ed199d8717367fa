//! Stata dictionary (`.dct`) parsing
//!
//! A dictionary describes one variable per line:
//!
//! ```text
//! infile dictionary {
//!     _column(1)   str12   caseid    %12s  "RESPONDENT ID NUMBER"
//!     _column(13)  byte    pregordr  %2f   "PREGNANCY ORDER (NUMBER)"
//! }
//! ```
//!
//! Only lines carrying a `_column(N)` directive are variables; everything else
//! (the `infile` header, braces, blank lines) is skipped.

use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use itertools::Itertools;

use crate::error::util::safe_read_to_string;
use crate::error::{NsfgError, Result};

const COLUMN_DIRECTIVE: &str = "_column(";

/// Value kind of a dictionary variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `byte`, `int`, `long`
    Int,
    /// `float`, `double`, `numeric`
    Float,
    /// `strN`
    Str,
}

impl VariableKind {
    /// Map a Stata storage type name to a kind
    #[must_use]
    pub fn from_stata(type_name: &str) -> Option<Self> {
        match type_name {
            "byte" | "int" | "long" => Some(Self::Int),
            "float" | "double" | "numeric" => Some(Self::Float),
            t if t.starts_with("str") => Some(Self::Str),
            _ => None,
        }
    }

    /// Arrow type used to hold values of this kind
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Int => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::Str => DataType::Utf8,
        }
    }
}

/// One variable of a fixed-width dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    /// 1-based start column
    pub start: usize,
    /// 1-based exclusive end column; `None` runs to end of line
    pub end: Option<usize>,
    pub kind: VariableKind,
    /// Lowercased variable name
    pub name: String,
    /// Stata display format, e.g. `%12s`
    pub format: String,
    pub description: String,
}

impl VariableSpec {
    /// Zero-based byte range of this variable within a record line
    #[must_use]
    pub fn byte_range(&self, line_len: usize) -> std::ops::Range<usize> {
        let start = self.start.saturating_sub(1).min(line_len);
        let end = self.end.map_or(line_len, |e| e.saturating_sub(1).min(line_len));
        start..end.max(start)
    }
}

/// Parsed Stata dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StataDictionary {
    variables: Vec<VariableSpec>,
}

impl StataDictionary {
    #[must_use]
    pub fn variables(&self) -> &[VariableSpec] {
        &self.variables
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Arrow schema with one nullable column per variable
    #[must_use]
    pub fn arrow_schema(&self) -> Arc<Schema> {
        let fields: Vec<Field> = self
            .variables
            .iter()
            .map(|v| Field::new(&v.name, v.kind.data_type(), true))
            .collect();
        Arc::new(Schema::new(fields))
    }
}

/// Read and parse a Stata dictionary file
pub fn read_stata_dct(path: &Path) -> Result<StataDictionary> {
    let content = safe_read_to_string(path, "reading Stata dictionary")?;
    let dictionary = parse_dct(&content)?;
    log::debug!(
        "Parsed {} variables from dictionary {}",
        dictionary.len(),
        path.display()
    );
    Ok(dictionary)
}

/// Parse the text of a Stata dictionary
pub fn parse_dct(content: &str) -> Result<StataDictionary> {
    let mut parsed = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let Some(pos) = line.find(COLUMN_DIRECTIVE) else {
            continue;
        };
        let after = &line[pos + COLUMN_DIRECTIVE.len()..];
        let close = after.find(')').ok_or_else(|| dct_error(line_no, "unclosed _column("))?;

        let start: usize = after[..close]
            .trim()
            .parse()
            .map_err(|_| dct_error(line_no, format!("invalid column '{}'", &after[..close])))?;
        if start == 0 {
            return Err(dct_error(line_no, "columns are 1-based"));
        }

        let rest = &after[close + 1..];
        let mut tokens = rest.split_whitespace();
        let (Some(type_name), Some(name), Some(format)) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(dct_error(line_no, "expected type, name and format"));
        };

        let kind = VariableKind::from_stata(type_name)
            .ok_or_else(|| dct_error(line_no, format!("unknown storage type '{type_name}'")))?;
        let description = tokens.join(" ").trim_matches('"').to_string();

        parsed.push((
            line_no,
            VariableSpec {
                start,
                end: None,
                kind,
                name: name.to_lowercase(),
                format: format.to_string(),
                description,
            },
        ));
    }

    if parsed.is_empty() {
        return Err(dct_error(0, "no _column() variables found"));
    }

    let duplicates: Vec<&str> = parsed
        .iter()
        .map(|(_, v)| v.name.as_str())
        .duplicates()
        .collect();
    if !duplicates.is_empty() {
        return Err(dct_error(
            0,
            format!("duplicate variable names: {}", duplicates.iter().join(", ")),
        ));
    }

    let next_starts: Vec<Option<usize>> = parsed
        .iter()
        .skip(1)
        .map(|(_, v)| Some(v.start))
        .chain(std::iter::once(None))
        .collect();

    let mut variables = Vec::with_capacity(parsed.len());
    for ((line_no, mut spec), end) in parsed.into_iter().zip(next_starts) {
        if let Some(end) = end {
            if end <= spec.start {
                return Err(dct_error(
                    line_no,
                    format!("variable '{}' does not start before the next one", spec.name),
                ));
            }
        }
        spec.end = end;
        variables.push(spec);
    }

    Ok(StataDictionary { variables })
}

fn dct_error(line: usize, message: impl Into<String>) -> NsfgError {
    NsfgError::Dictionary {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREG_DCT: &str = r#"infile dictionary {
    _column(1)      str12        caseid  %12s  "RESPONDENT ID NUMBER"
    _column(13)     byte       pregordr  %2f  "PREGNANCY ORDER (NUMBER)"
    _column(275)    int         agepreg  %4f  "AGE AT PREGNANCY OUTCOME"
    _column(423)    double  finalwgt  %18f  "FINAL POST-STRATIFIED WEIGHT"
}
"#;

    #[test]
    fn parses_variables_and_spans() {
        let dct = parse_dct(PREG_DCT).unwrap();
        assert_eq!(dct.len(), 4);

        let caseid = dct.variable("caseid").unwrap();
        assert_eq!(caseid.kind, VariableKind::Str);
        assert_eq!(caseid.start, 1);
        assert_eq!(caseid.end, Some(13));
        assert_eq!(caseid.format, "%12s");
        assert_eq!(caseid.description, "RESPONDENT ID NUMBER");

        let agepreg = dct.variable("agepreg").unwrap();
        assert_eq!(agepreg.kind, VariableKind::Int);
        assert_eq!(agepreg.end, Some(423));

        let finalwgt = dct.variable("finalwgt").unwrap();
        assert_eq!(finalwgt.kind, VariableKind::Float);
        assert_eq!(finalwgt.end, None);
    }

    #[test]
    fn names_are_lowercased() {
        let dct = parse_dct(r#"_column(1) long CASEID %5f "ID""#).unwrap();
        assert_eq!(dct.variables()[0].name, "caseid");
    }

    #[test]
    fn byte_range_clips_to_line() {
        let dct = parse_dct(PREG_DCT).unwrap();
        let caseid = dct.variable("caseid").unwrap();
        assert_eq!(caseid.byte_range(40), 0..12);
        assert_eq!(caseid.byte_range(5), 0..5);

        let finalwgt = dct.variable("finalwgt").unwrap();
        assert_eq!(finalwgt.byte_range(440), 422..440);
        assert_eq!(finalwgt.byte_range(100), 100..100);
    }

    #[test]
    fn byte_range_of_hand_built_zero_start() {
        let spec = VariableSpec {
            start: 0,
            end: Some(0),
            kind: VariableKind::Int,
            name: "x".to_string(),
            format: "%1f".to_string(),
            description: String::new(),
        };
        assert_eq!(spec.byte_range(10), 0..0);

        let open = VariableSpec { end: None, ..spec };
        assert_eq!(open.byte_range(4), 0..4);
    }

    #[test]
    fn arrow_schema_follows_kinds() {
        let schema = parse_dct(PREG_DCT).unwrap().arrow_schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(1).data_type(), &DataType::Int64);
        assert_eq!(schema.field(3).data_type(), &DataType::Float64);
        assert!(schema.fields().iter().all(|f| f.is_nullable()));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = parse_dct(r#"_column(1) quad caseid %12s "ID""#).unwrap_err();
        assert!(matches!(err, NsfgError::Dictionary { line: 1, .. }));
    }

    #[test]
    fn rejects_missing_tokens() {
        assert!(parse_dct("_column(1) byte").is_err());
    }

    #[test]
    fn rejects_empty_dictionary() {
        assert!(parse_dct("infile dictionary {\n}\n").is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = parse_dct("_column(1) byte a %1f\n_column(2) byte a %1f\n").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_unordered_columns() {
        let err = parse_dct("_column(5) byte a %1f\n_column(2) byte b %1f\n").unwrap_err();
        assert!(matches!(err, NsfgError::Dictionary { line: 1, .. }));
    }
}
