//! Display implementations for domain models.
//!
//! Markdown-formatted output for rich terminal display, with state icons
//! and structured sections.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Project, ProjectSummary, StepRecord, StepState};

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Description as a paragraph
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.steps.is_empty() {
            let mut current_phase: Option<&str> = None;
            for step in &self.steps {
                if current_phase != Some(step.phase.as_str()) {
                    writeln!(f, "\n## {}", step.phase)?;
                    writeln!(f)?;
                    current_phase = Some(step.phase.as_str());
                }
                write!(f, "{step}")?;
            }
        } else {
            writeln!(f, "\nNo steps in this project.")?;
        }

        Ok(())
    }
}

impl StepRecord {
    fn fmt_step(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.ordinal + 1,
            self.name,
            self.state().with_icon()
        )?;
        writeln!(f)?;

        if let Some(confidence) = self.confidence {
            writeln!(f, "- Confidence: {confidence:.2}")?;
        }
        if self.human_modified {
            writeln!(f, "- Modified by operator")?;
        }

        if let Some(text) = &self.rendered_text {
            writeln!(f)?;
            writeln!(f, "#### Output")?;
            writeln!(f)?;
            writeln!(f, "{text}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_step(f)
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}. {} ({}/{} approved)",
            self.id, self.name, self.approved_steps, self.total_steps
        )?;
        if let Some(desc) = &self.description {
            writeln!(f, "  {desc}")?;
        }
        writeln!(f, "  Created: {}", LocalDateTime(&self.created_at))?;
        Ok(())
    }
}
