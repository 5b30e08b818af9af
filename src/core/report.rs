use crate::domain::model::{CoverageReport, Line, Package, SourceFile};
use crate::utils::error::{CoverageError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// 目前所在的元素種類，`Other` 代表 class/method/counter 等用不到的節點
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Report,
    Group,
    Package,
    SourceFile,
    Line,
    Other,
}

#[derive(Default)]
struct ReportBuilder {
    stack: Vec<Element>,
    report: Option<CoverageReport>,
    finished: bool,
    package: Option<Package>,
    source_file: Option<SourceFile>,
}

/// Parse a JaCoCo XML report into the package -> sourcefile -> line model.
///
/// Packages are taken from the `<report>` root and from any `<group>` below it.
/// Source files and lines are only read from their direct parents, so the
/// `<class>`/`<method>`/`<counter>` subtrees never contribute records.
pub fn parse_report(bytes: &[u8]) -> Result<CoverageReport> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut builder = ReportBuilder::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) => {
                let element = builder.open(&tag, reader.buffer_position())?;
                builder.stack.push(element);
            }
            Event::Empty(tag) => {
                let element = builder.open(&tag, reader.buffer_position())?;
                builder.stack.push(element);
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

impl ReportBuilder {
    fn open(&mut self, tag: &BytesStart<'_>, position: usize) -> Result<Element> {
        let name = tag.name();
        let parent = self.stack.last().copied();

        let element = match (parent, name.as_ref()) {
            (None, b"report") => {
                if self.finished {
                    return Err(CoverageError::malformed(
                        "found a second root element after </report>",
                    ));
                }
                self.report = Some(CoverageReport {
                    name: attribute_value(tag, b"name")?,
                    packages: Vec::new(),
                });
                Element::Report
            }
            (None, other) => {
                return Err(CoverageError::malformed(format!(
                    "root element is <{}>, expected <report>",
                    String::from_utf8_lossy(other)
                )));
            }
            (Some(Element::Report | Element::Group), b"group") => Element::Group,
            (Some(Element::Report | Element::Group), b"package") => {
                self.package = Some(Package {
                    name: required_attribute(tag, b"name", position)?,
                    source_files: Vec::new(),
                });
                Element::Package
            }
            (Some(Element::Package), b"sourcefile") => {
                self.source_file = Some(SourceFile {
                    name: required_attribute(tag, b"name", position)?,
                    lines: Vec::new(),
                });
                Element::SourceFile
            }
            (Some(Element::SourceFile), b"line") => {
                let line = parse_line(tag, position)?;
                if let Some(source_file) = self.source_file.as_mut() {
                    source_file.lines.push(line);
                }
                Element::Line
            }
            _ => Element::Other,
        };

        Ok(element)
    }

    fn close(&mut self) -> Result<()> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| CoverageError::malformed("closing tag without a matching opening tag"))?;

        match element {
            Element::SourceFile => {
                if let (Some(source_file), Some(package)) =
                    (self.source_file.take(), self.package.as_mut())
                {
                    package.source_files.push(source_file);
                }
            }
            Element::Package => {
                if let (Some(package), Some(report)) = (self.package.take(), self.report.as_mut()) {
                    report.packages.push(package);
                }
            }
            Element::Report => self.finished = true,
            Element::Group | Element::Line | Element::Other => {}
        }

        Ok(())
    }

    fn finish(self) -> Result<CoverageReport> {
        if let Some(open) = self.stack.last() {
            return Err(CoverageError::malformed(format!(
                "unexpected end of document inside {:?} element",
                open
            )));
        }

        self.report
            .ok_or_else(|| CoverageError::malformed("document has no root element"))
    }
}

fn parse_line(tag: &BytesStart<'_>, position: usize) -> Result<Line> {
    let nr = required_attribute(tag, b"nr", position)?;
    let number = nr.trim().parse::<u32>().map_err(|_| {
        CoverageError::malformed(format!(
            "line number '{}' near byte {} is not a valid number",
            nr, position
        ))
    })?;

    Ok(Line {
        number,
        missed_instructions: attribute_value(tag, b"mi")?,
    })
}

fn required_attribute(tag: &BytesStart<'_>, name: &[u8], position: usize) -> Result<String> {
    attribute_value(tag, name)?.ok_or_else(|| CoverageError::MissingAttributeError {
        element: String::from_utf8_lossy(tag.name().as_ref()).into_owned(),
        attribute: String::from_utf8_lossy(name).into_owned(),
        position,
    })
}

fn attribute_value(tag: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in tag.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JACOCO_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<!DOCTYPE report PUBLIC "-//JACOCO//DTD Report 1.1//EN" "report.dtd">"#;

    #[test]
    fn test_parse_full_jacoco_report() {
        let xml = format!(
            r#"{}
<report name="shop">
  <sessioninfo id="host-1234" start="1700000000000" dump="1700000001000"/>
  <package name="org/example/dao">
    <class name="org/example/dao/InMemoryUtenteDao" sourcefilename="InMemoryUtenteDao.java">
      <method name="trova" desc="(I)V" line="12">
        <counter type="INSTRUCTION" missed="3" covered="0"/>
      </method>
    </class>
    <sourcefile name="InMemoryUtenteDao.java">
      <line nr="12" mi="3" ci="0" mb="0" cb="0"/>
      <line nr="13" mi="0" ci="4" mb="0" cb="0"/>
      <counter type="LINE" missed="1" covered="1"/>
    </sourcefile>
  </package>
  <counter type="INSTRUCTION" missed="3" covered="4"/>
</report>"#,
            JACOCO_HEADER
        );

        let report = parse_report(xml.as_bytes()).unwrap();

        assert_eq!(report.name.as_deref(), Some("shop"));
        assert_eq!(report.packages.len(), 1);
        let package = &report.packages[0];
        assert_eq!(package.name, "org/example/dao");
        assert_eq!(package.source_files.len(), 1);
        let file = &package.source_files[0];
        assert_eq!(file.name, "InMemoryUtenteDao.java");
        assert_eq!(
            file.lines,
            vec![
                Line {
                    number: 12,
                    missed_instructions: Some("3".to_string())
                },
                Line {
                    number: 13,
                    missed_instructions: Some("0".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_document_order_is_preserved() {
        let xml = r#"<report name="r">
            <package name="b.pkg"><sourcefile name="Z.java"><line nr="9" mi="1"/></sourcefile>
                <sourcefile name="A.java"><line nr="2" mi="1"/><line nr="1" mi="1"/></sourcefile></package>
            <package name="a.pkg"><sourcefile name="M.java"/></package>
        </report>"#;

        let report = parse_report(xml.as_bytes()).unwrap();
        let names: Vec<&str> = report.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b.pkg", "a.pkg"]);

        let files: Vec<&str> = report.packages[0]
            .source_files
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(files, vec!["Z.java", "A.java"]);

        let numbers: Vec<u32> = report.packages[0].source_files[1]
            .lines
            .iter()
            .map(|l| l.number)
            .collect();
        assert_eq!(numbers, vec![2, 1]);
        assert!(report.packages[1].source_files[0].lines.is_empty());
    }

    #[test]
    fn test_packages_inside_groups() {
        let xml = r#"<report name="multi">
            <group name="core"><package name="com.acme.core"><sourcefile name="Core.java"><line nr="1" mi="2"/></sourcefile></package></group>
            <group name="outer"><group name="inner"><package name="com.acme.web"/></group></group>
        </report>"#;

        let report = parse_report(xml.as_bytes()).unwrap();
        let names: Vec<&str> = report.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["com.acme.core", "com.acme.web"]);
    }

    #[test]
    fn test_empty_report() {
        let report = parse_report(br#"<report name="empty"></report>"#).unwrap();
        assert!(report.packages.is_empty());

        let report = parse_report(br#"<report name="empty"/>"#).unwrap();
        assert!(report.packages.is_empty());
    }

    #[test]
    fn test_line_without_missed_marker() {
        let xml = r#"<report><package name="p"><sourcefile name="F.java"><line nr="5" ci="1"/></sourcefile></package></report>"#;
        let report = parse_report(xml.as_bytes()).unwrap();
        assert_eq!(
            report.packages[0].source_files[0].lines[0].missed_instructions,
            None
        );
    }

    #[test]
    fn test_escaped_attribute_values() {
        let xml = r#"<report><package name="a&amp;b"><sourcefile name="F&lt;T&gt;.java"/></package></report>"#;
        let report = parse_report(xml.as_bytes()).unwrap();
        assert_eq!(report.packages[0].name, "a&b");
        assert_eq!(report.packages[0].source_files[0].name, "F<T>.java");
    }

    #[test]
    fn test_package_without_name_is_rejected() {
        let xml = r#"<report><package><sourcefile name="F.java"/></package></report>"#;
        let err = parse_report(xml.as_bytes()).unwrap_err();
        match err {
            CoverageError::MissingAttributeError {
                element, attribute, ..
            } => {
                assert_eq!(element, "package");
                assert_eq!(attribute, "name");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sourcefile_without_name_is_rejected() {
        let xml = r#"<report><package name="p"><sourcefile/></package></report>"#;
        assert!(matches!(
            parse_report(xml.as_bytes()),
            Err(CoverageError::MissingAttributeError { ref element, .. }) if element == "sourcefile"
        ));
    }

    #[test]
    fn test_line_number_is_normalised() {
        let xml = r#"<report><package name="p"><sourcefile name="F.java"><line nr=" 7" mi="1"/><line nr="08" mi="1"/></sourcefile></package></report>"#;
        let report = parse_report(xml.as_bytes()).unwrap();
        let numbers: Vec<u32> = report.packages[0].source_files[0]
            .lines
            .iter()
            .map(|l| l.number)
            .collect();
        assert_eq!(numbers, vec![7, 8]);
    }

    #[test]
    fn test_invalid_line_number_is_rejected() {
        let xml = r#"<report><package name="p"><sourcefile name="F.java"><line nr="x" mi="1"/></sourcefile></package></report>"#;
        assert!(matches!(
            parse_report(xml.as_bytes()),
            Err(CoverageError::MalformedReportError { .. })
        ));
    }

    #[test]
    fn test_class_attributes_do_not_leak_into_model() {
        // <class> has no sourcefile/line children that count, and its name is not required
        let xml = r#"<report><package name="p"><class><line nr="1" mi="9"/></class></package></report>"#;
        let report = parse_report(xml.as_bytes()).unwrap();
        assert!(report.packages[0].source_files.is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse_report(b"").is_err());
        assert!(parse_report(b"not xml at all").is_err());
        assert!(parse_report(br#"<report><package name="p">"#).is_err());
        assert!(parse_report(br#"<report><package name="p"></sourcefile></report>"#).is_err());
        assert!(parse_report(br#"<coverage></coverage>"#).is_err());
        assert!(parse_report(br#"<report/><report/>"#).is_err());
    }
}
