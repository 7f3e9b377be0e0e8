//! Human-readable rendering of structured step results.
//!
//! Each methodology step has a dedicated text template. Rendering is
//! total: when a payload is missing the fields a template expects, or the
//! step kind is unknown, the output falls back to pretty-printed JSON
//! rather than failing. The rendered text is what operators review and
//! approve, and approved text is what downstream steps consume.

use serde_json::Value;

/// The five known methodology steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    SegmentText,
    ExtractRules,
    DetectConflicts,
    CreateDataModel,
    GenerateBusinessRules,
}

impl StepKind {
    /// Resolve a step kind from its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Segment Text" => Some(Self::SegmentText),
            "Extract Rules" => Some(Self::ExtractRules),
            "Detect Conflicts" => Some(Self::DetectConflicts),
            "Create Data Model" => Some(Self::CreateDataModel),
            "Generate Business Rules" => Some(Self::GenerateBusinessRules),
            _ => None,
        }
    }

    /// The display name of the step.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SegmentText => "Segment Text",
            Self::ExtractRules => "Extract Rules",
            Self::DetectConflicts => "Detect Conflicts",
            Self::CreateDataModel => "Create Data Model",
            Self::GenerateBusinessRules => "Generate Business Rules",
        }
    }
}

/// Render a structured result as operator-facing text.
///
/// Never fails: unrecognized shapes fall back to pretty JSON, and a
/// payload that cannot even be pretty-printed falls back to `to_string`.
pub fn render(kind: Option<StepKind>, value: &Value) -> String {
    let rendered = match kind {
        Some(StepKind::SegmentText) => render_sections(value),
        Some(StepKind::ExtractRules) => render_rules(value),
        Some(StepKind::DetectConflicts) => render_conflicts(value),
        Some(StepKind::CreateDataModel) => render_data_model(value),
        Some(StepKind::GenerateBusinessRules) => render_business_rules(value),
        None => None,
    };
    rendered.unwrap_or_else(|| pretty_fallback(value))
}

fn pretty_fallback(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// A string field of an object, or a placeholder when absent.
fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("None")
}

fn render_sections(value: &Value) -> Option<String> {
    let sections = value.get("sections")?.as_array()?;
    let blocks: Vec<String> = sections
        .iter()
        .map(|s| {
            format!(
                "ID: {}\nTitle: {}\nContent:\n{}\nReference ID: {}",
                field(s, "id"),
                field(s, "title"),
                field(s, "content"),
                field(s, "referenceId"),
            )
        })
        .collect();
    Some(blocks.join("\n\n"))
}

fn render_rules(value: &Value) -> Option<String> {
    let entities = value.get("entities")?.as_array()?;
    let rules = value.get("rules")?.as_array()?;

    let entity_blocks: Vec<String> = entities
        .iter()
        .map(|e| {
            format!(
                "type: {}\nname: {}\ndescription: {}\nsource: {}",
                field(e, "type"),
                field(e, "name"),
                field(e, "description"),
                field(e, "source"),
            )
        })
        .collect();

    let rule_blocks: Vec<String> = rules
        .iter()
        .map(|r| {
            format!(
                "id: {}\ncondition: {}\naction: {}\nsource: {}\ntext: \"{}\"",
                field(r, "id"),
                field(r, "condition"),
                field(r, "action"),
                field(r, "source"),
                field(r, "text"),
            )
        })
        .collect();

    Some(format!(
        "Entities\n\n{}\n\nRules\n\n{}",
        entity_blocks.join("\n\n\n"),
        rule_blocks.join("\n\n\n"),
    ))
}

fn render_conflicts(value: &Value) -> Option<String> {
    if value.get("noConflicts").and_then(Value::as_bool) == Some(true) {
        return Some("No conflicts detected.".to_string());
    }
    let conflicts = value.get("conflicts")?.as_array()?;
    if conflicts.is_empty() {
        return Some("No conflicts detected.".to_string());
    }
    let blocks: Vec<String> = conflicts
        .iter()
        .map(|c| {
            let involved = c
                .get("rulesInvolved")
                .and_then(Value::as_array)
                .map(|rules| {
                    rules
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_else(|| "None".to_string());
            format!(
                "[CONFLICT] {}\nType: {}\nSeverity: {}\nDescription: {}\nRules Involved: {}\nRecommendation: {}\n{}",
                field(c, "id"),
                field(c, "type"),
                field(c, "severity"),
                field(c, "description"),
                involved,
                field(c, "recommendation"),
                "-".repeat(40),
            )
        })
        .collect();
    Some(blocks.join("\n\n"))
}

fn render_data_model(value: &Value) -> Option<String> {
    let classes = value.get("classes")?.as_array()?;
    let mut out = String::from("classDiagram\n");
    for class in classes {
        let name = class.get("name").and_then(Value::as_str)?;
        out.push_str(&format!("    class {name} {{\n"));
        if let Some(attrs) = class.get("attributes").and_then(Value::as_array) {
            for attr in attrs {
                let attr_name = field(attr, "name");
                let attr_type = field(attr, "type");
                out.push_str(&format!("        +{attr_type} {attr_name}\n"));
            }
        }
        if let Some(methods) = class.get("methods").and_then(Value::as_array) {
            for method in methods {
                let method_name = field(method, "name");
                out.push_str(&format!("        +{method_name}()\n"));
            }
        }
        out.push_str("    }\n");
    }
    if let Some(relations) = value.get("relationships").and_then(Value::as_array) {
        for rel in relations {
            let from = field(rel, "from");
            let to = field(rel, "to");
            let label = field(rel, "type");
            out.push_str(&format!("    {from} --> {to} : {label}\n"));
        }
    }
    Some(out)
}

fn render_business_rules(value: &Value) -> Option<String> {
    let rules = value.get("rules")?.as_array()?;
    let blocks: Vec<String> = rules
        .iter()
        .map(|r| {
            let mut block = format!(
                "// Rule: {}\n// Desc: {}\nIF ({}) THEN\n  {}",
                field(r, "id"),
                field(r, "description"),
                field(r, "condition"),
                field(r, "action"),
            );
            if let Some(alt) = r.get("elseAction").and_then(Value::as_str) {
                block.push_str(&format!("\nELSE\n  {alt}"));
            }
            block.push_str("\nEND IF");
            block
        })
        .collect();
    Some(blocks.join("\n\n"))
}
