#[cfg(test)]
mod model_tests {
    use jiff::Timestamp;
    use serde_json::json;

    use crate::models::{Project, ProjectSummary, StepRecord, StepState};

    fn create_test_step(approved: bool) -> StepRecord {
        StepRecord {
            id: 123,
            project_id: 456,
            phase: "Preparation".to_string(),
            name: "Segment Text".to_string(),
            ordinal: 0,
            raw_input: Some("Section 1. All dogs must be registered.".to_string()),
            structured_result: Some(json!({"sections": []})),
            human_override: None,
            human_modified: false,
            rendered_text: Some("No sections.".to_string()),
            confidence: Some(0.85),
            approved,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn create_test_project() -> Project {
        Project {
            id: 789,
            name: "Dog Registration Act".to_string(),
            description: Some("Pilot project".to_string()),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
            steps: vec![create_test_step(true), create_test_step(false)],
        }
    }

    #[test]
    fn test_step_state_with_icon() {
        assert_eq!(StepState::Empty.with_icon(), "○ Empty");
        assert_eq!(StepState::Drafted.with_icon(), "➤ Drafted");
        assert_eq!(StepState::Approved.with_icon(), "✓ Approved");
    }

    #[test]
    fn test_step_state_derivation() {
        let empty = StepRecord::default();
        assert_eq!(empty.state(), StepState::Empty);

        let drafted = create_test_step(false);
        assert_eq!(drafted.state(), StepState::Drafted);

        let approved = create_test_step(true);
        assert_eq!(approved.state(), StepState::Approved);
    }

    #[test]
    fn test_step_state_parsing() {
        assert_eq!("approved".parse::<StepState>().unwrap(), StepState::Approved);
        assert_eq!("Drafted".parse::<StepState>().unwrap(), StepState::Drafted);
        assert!("bogus".parse::<StepState>().is_err());
    }

    #[test]
    fn test_authoritative_value_prefers_override() {
        let mut step = create_test_step(false);
        assert_eq!(step.authoritative_value(), Some(&json!({"sections": []})));

        step.human_override = Some(json!({"text": "edited"}));
        step.human_modified = true;
        assert_eq!(step.authoritative_value(), Some(&json!({"text": "edited"})));
    }

    #[test]
    fn test_summary_from_project_counts_approvals() {
        let project = create_test_project();
        let summary = ProjectSummary::from(&project);
        assert_eq!(summary.total_steps, 2);
        assert_eq!(summary.approved_steps, 1);
        assert_eq!(summary.name, "Dog Registration Act");
    }

    #[test]
    fn test_step_record_serialization_round_trip() {
        let step = create_test_step(true);
        let encoded = serde_json::to_string(&step).unwrap();
        let decoded: StepRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(step, decoded);
    }
}
