use crate::domain::model::{CoverageReport, ExtractionSummary, Package, SourceFile, UncoveredLine};

pub const DEFAULT_SOURCE_ROOT: &str = "src/main/java";

/// 組合 `<source_root>/<package path>/<file name>`，套件名稱原樣保留（預設套件會產生 `//`）
pub fn source_path(source_root: &str, package: &Package, file: &SourceFile) -> String {
    let root = source_root.trim_end_matches('/');
    let relative = format!("{}/{}", package.path(), file.name);

    if root.is_empty() {
        relative
    } else {
        format!("{}/{}", root, relative)
    }
}

/// Every line whose missed-instruction marker is not `"0"`, in document order.
pub fn uncovered_lines(report: &CoverageReport, source_root: &str) -> Vec<UncoveredLine> {
    let mut records = Vec::new();

    for package in &report.packages {
        for file in &package.source_files {
            let path = source_path(source_root, package, file);
            records.extend(
                file.lines
                    .iter()
                    .filter(|line| line.is_uncovered())
                    .map(|line| UncoveredLine {
                        path: path.clone(),
                        line: line.number,
                    }),
            );
        }
    }

    records
}

pub fn summarize(report: &CoverageReport, records: &[UncoveredLine]) -> ExtractionSummary {
    let source_files = report.packages.iter().flat_map(|p| &p.source_files);

    ExtractionSummary {
        packages: report.packages.len(),
        source_files: source_files.clone().count(),
        lines: source_files.map(|f| f.lines.len()).sum(),
        uncovered_lines: records.len(),
    }
}
