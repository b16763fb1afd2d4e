//! Call-Log Variant Synthesizer.
//!
//! Collects one enumeration case per renderable member and emits the closed
//! `<Mock>Elements` type tests assert against.

use mockgen_common::layout::ELEMENTS_SUFFIX;
use mockgen_common::safe_name;

use crate::writer::SourceWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CallLogCase {
    offset: i64,
    text: String,
}

#[derive(Debug, Default)]
pub struct CallLogSynthesizer {
    cases: Vec<CallLogCase>,
}

/// `name: Type` pairs carried by a case.
pub type Payload = Vec<(String, String)>;

impl CallLogSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Getter case, plus a setter case carrying the new value for read-write properties.
    ///
    /// Reads are always logged as `<id>Getter`, never as the bare `<id>`, so a
    /// read-only property and a method of the same base name cannot share a
    /// case. This matches the case names existing Mockolo-based suites assert on.
    pub fn add_variable(&mut self, offset: i64, identifier: &str, value_type: Option<&str>) {
        self.push(offset, format!("{identifier}Getter"));
        if let Some(value_type) = value_type {
            self.push(offset, format!("{identifier}Setter(value: {value_type})"));
        }
    }

    /// Method or subscript case; the payload mirrors the parameter list.
    pub fn add_invocation(&mut self, offset: i64, identifier: &str, payload: &Payload) {
        let name = safe_name(identifier);
        if payload.is_empty() {
            self.push(offset, name);
        } else {
            let fields = payload
                .iter()
                .map(|(label, ty)| format!("{label}: {ty}"))
                .collect::<Vec<_>>()
                .join(", ");
            self.push(offset, format!("{name}({fields})"));
        }
    }

    fn push(&mut self, offset: i64, case: String) {
        self.cases.push(CallLogCase {
            offset,
            text: format!("case {case}"),
        });
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Case lines ordered by source position, then by text.
    pub fn sorted_cases(&self) -> Vec<&str> {
        let mut cases: Vec<&CallLogCase> = self.cases.iter().collect();
        cases.sort_by(|a, b| a.offset.cmp(&b.offset).then_with(|| a.text.cmp(&b.text)));
        cases.into_iter().map(|c| c.text.as_str()).collect()
    }

    pub fn emit(&self, access_level: &str, mock_name: &str) -> String {
        let acl = if access_level.is_empty() {
            String::new()
        } else {
            format!("{access_level} ")
        };
        let mut writer = SourceWriter::new();
        writer.block(
            &format!("{acl}enum {mock_name}{ELEMENTS_SUFFIX}: MockEquatable"),
            |w| {
                for case in self.sorted_cases() {
                    w.line(case);
                }
            },
        );
        writer.finish()
    }
}
