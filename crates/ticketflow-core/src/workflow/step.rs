use serde::Serialize;

/// The pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepId {
    #[serde(rename = "fetch")]
    FetchParse,
    #[serde(rename = "generate")]
    GenerateCode,
    #[serde(rename = "test")]
    CreateTests,
    #[serde(rename = "validate")]
    ValidateCoverage,
    #[serde(rename = "git")]
    GitAutomation,
    #[serde(rename = "update")]
    UpdateJira,
}

impl StepId {
    pub const ALL: [StepId; 6] = [
        StepId::FetchParse,
        StepId::GenerateCode,
        StepId::CreateTests,
        StepId::ValidateCoverage,
        StepId::GitAutomation,
        StepId::UpdateJira,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            StepId::FetchParse => "Fetch & Parse",
            StepId::GenerateCode => "Generate Code",
            StepId::CreateTests => "Create Tests",
            StepId::ValidateCoverage => "Validate Coverage",
            StepId::GitAutomation => "Git Automation",
            StepId::UpdateJira => "Update Jira",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StepId::FetchParse => "Extract requirements from Jira",
            StepId::GenerateCode => "AI-powered code generation",
            StepId::CreateTests => "Automated test creation",
            StepId::ValidateCoverage => "Ensure quality standards",
            StepId::GitAutomation => "Branch and PR creation",
            StepId::UpdateJira => "Status and progress tracking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
    Error,
}

/// Progress of one step within a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepState {
    pub id: StepId,
    pub status: StepStatus,
    /// Output of the last successful run.
    pub output: Option<String>,
}

impl StepState {
    pub(super) fn pending(id: StepId) -> Self {
        Self {
            id,
            status: StepStatus::Pending,
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_order() {
        for (i, step) in StepId::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn titles_and_wire_ids_in_pipeline_order() {
        let titles: Vec<_> = StepId::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            [
                "Fetch & Parse",
                "Generate Code",
                "Create Tests",
                "Validate Coverage",
                "Git Automation",
                "Update Jira",
            ]
        );
        let ids = serde_json::to_value(StepId::ALL).unwrap();
        assert_eq!(ids, serde_json::json!(["fetch", "generate", "test", "validate", "git", "update"]));
    }
}
