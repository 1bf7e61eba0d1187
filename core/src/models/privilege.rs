use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
}

impl PrivilegeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            jurisdiction: None,
        }
    }
}

optional_setters!(PrivilegeRequest {
    with_context => context: String,
    with_jurisdiction => jurisdiction: String,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PrivilegeType {
    AttorneyClient,
    WorkProduct,
    CommonInterest,
    #[serde(other)]
    Unknown,
}

/// Character range of the input that triggered a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivilegeAssessment {
    pub privileged: bool,
    #[serde(default)]
    pub privilege_types: Vec<PrivilegeType>,
    pub confidence: f64,
    pub rationale: String,
    #[serde(default)]
    pub flagged_spans: Vec<FlaggedSpan>,
}

impl PrivilegeAssessment {
    /// Text of each flagged span, sliced from the text that was assessed.
    ///
    /// Spans outside `text` or not on character boundaries are skipped.
    pub fn flagged_text<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.flagged_spans
            .iter()
            .filter_map(|span| text.get(span.start..span.end))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPrivilegeRequest {
    pub documents: Vec<PrivilegeRequest>,
}

impl BatchPrivilegeRequest {
    pub fn new(documents: Vec<PrivilegeRequest>) -> Self {
        Self { documents }
    }
}

/// One assessment per submitted document, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPrivilegeResult {
    pub results: Vec<PrivilegeAssessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_text_skips_out_of_range_spans() {
        let text = "Per our counsel's advice, hold the shipment.";
        let assessment = PrivilegeAssessment {
            privileged: true,
            privilege_types: vec![PrivilegeType::AttorneyClient],
            confidence: 0.87,
            rationale: "Relays legal advice".into(),
            flagged_spans: vec![
                FlaggedSpan { start: 8, end: 24, label: "advice".into() },
                FlaggedSpan { start: 40, end: 400, label: "bogus".into() },
            ],
        };
        assert_eq!(assessment.flagged_text(text), vec!["counsel's advice"]);
    }

    #[test]
    fn privilege_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&PrivilegeType::WorkProduct).unwrap(),
            "\"work_product\""
        );
    }
}
