//! Project summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Project;

/// Summary information about a project with step statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project ID
    pub id: u64,
    /// Name of the project
    pub name: String,
    /// Detailed multi-line description of the project
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of methodology steps
    pub total_steps: u32,
    /// Number of approved steps
    pub approved_steps: u32,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        let total_steps = project.steps.len() as u32;
        let approved_steps = project.steps.iter().filter(|s| s.approved).count() as u32;
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
            total_steps,
            approved_steps,
        }
    }
}
