use serde::{Deserialize, Serialize};
use std::fmt;

/// `mi` 屬性的零值，只有字面上完全等於 "0" 才算完全覆蓋
pub const FULLY_COVERED_MARKER: &str = "0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub name: Option<String>,
    pub packages: Vec<Package>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub source_files: Vec<SourceFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub number: u32,
    /// 原樣保留報告中的字串，缺少屬性時為 None
    pub missed_instructions: Option<String>,
}

impl Line {
    pub fn is_uncovered(&self) -> bool {
        self.missed_instructions
            .as_deref()
            .is_some_and(|mi| mi != FULLY_COVERED_MARKER)
    }
}

impl Package {
    /// `com.acme.foo` -> `com/acme/foo`
    pub fn path(&self) -> String {
        self.name.replace('.', "/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncoveredLine {
    pub path: String,
    pub line: u32,
}

impl fmt::Display for UncoveredLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 每行一筆 `path:line`
    #[default]
    Text,
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub packages: usize,
    pub source_files: usize,
    pub lines: usize,
    pub uncovered_lines: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<UncoveredLine>,
    pub summary: ExtractionSummary,
    pub rendered: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(number: u32, mi: Option<&str>) -> Line {
        Line {
            number,
            missed_instructions: mi.map(str::to_string),
        }
    }

    #[test]
    fn test_zero_marker_is_covered() {
        assert!(!line(1, Some("0")).is_uncovered());
        assert!(line(2, Some("3")).is_uncovered());
    }

    #[test]
    fn test_marker_is_compared_literally() {
        assert!(line(1, Some("00")).is_uncovered());
        assert!(line(1, Some(" 0")).is_uncovered());
    }

    #[test]
    fn test_missing_marker_is_not_reported() {
        assert!(!line(1, None).is_uncovered());
    }

    #[test]
    fn test_package_path() {
        let package = Package {
            name: "com.acme.widgets".to_string(),
            source_files: vec![],
        };
        assert_eq!(package.path(), "com/acme/widgets");

        let already_slashed = Package {
            name: "org/example/dao".to_string(),
            source_files: vec![],
        };
        assert_eq!(already_slashed.path(), "org/example/dao");
    }

    #[test]
    fn test_record_display() {
        let record = UncoveredLine {
            path: "src/main/java/com/acme/Widget.java".to_string(),
            line: 11,
        };
        assert_eq!(record.to_string(), "src/main/java/com/acme/Widget.java:11");
    }
}
