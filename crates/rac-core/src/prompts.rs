//! Prompt templates for the methodology steps.
//!
//! Each prompt demands a bare JSON object of the shape
//! `{"result": ..., "confidence": ...}` so responses can be normalized
//! and rendered uniformly.

use crate::render::StepKind;

const RESPONSE_CONTRACT: &str = "Respond with a single JSON object and nothing else: \
{\"result\": <the structured output described above>, \"confidence\": <a number between 0 and 1>}. \
Do not wrap the JSON in markdown fences or add commentary.";

/// Build the full prompt for a step over the given input text.
pub fn prompt_for(kind: StepKind, input: &str) -> String {
    let task = match kind {
        StepKind::SegmentText => {
            "Segment the following legal or regulatory text into coherent sections. \
             The result must be an object with a \"sections\" array; each section has \
             \"id\", \"title\", \"content\" and, where the source provides one, \
             \"referenceId\"."
        }
        StepKind::ExtractRules => {
            "Extract the normative rules and the entities they refer to from the \
             following segmented text. The result must be an object with an \
             \"entities\" array (each with \"type\", \"name\", \"description\", \
             \"source\") and a \"rules\" array (each with \"id\", \"condition\", \
             \"action\", \"source\" and the verbatim \"text\")."
        }
        StepKind::DetectConflicts => {
            "Analyze the following extracted rules for contradictions, overlaps and \
             gaps. The result must be an object with a \"conflicts\" array; each \
             conflict has \"id\", \"type\", \"severity\", \"description\", \
             \"rulesInvolved\" (array of rule ids) and \"recommendation\". Use an \
             empty array when no conflicts exist."
        }
        StepKind::CreateDataModel => {
            "Derive a data model from the following rules and entities. The result \
             must be an object with a \"classes\" array (each with \"name\", \
             \"attributes\" of {\"name\", \"type\"}, and \"methods\" of {\"name\"}) \
             and a \"relationships\" array (each with \"from\", \"to\", \"type\")."
        }
        StepKind::GenerateBusinessRules => {
            "Translate the following data model and rules into executable business \
             rules. The result must be an object with a \"rules\" array; each rule \
             has \"id\", \"description\", \"condition\", \"action\" and an optional \
             \"elseAction\"."
        }
    };

    format!("{task}\n\n{RESPONSE_CONTRACT}\n\nInput:\n{input}")
}
