use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStage {
    id: String,
    name: String,
    message_types: Vec<String>,
}

impl CatalogStage {
    pub fn new(id: &str, name: &str, message_types: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            message_types: message_types.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message_types(&self) -> &[String] {
        &self.message_types
    }
}

/// Ordered reference list of journey stages and their message types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    stages: Vec<CatalogStage>,
}

impl Catalog {
    pub fn new() -> Self {
        let stages = vec![
            CatalogStage::new(
                "new-member-activation",
                "New Member Activation",
                &[
                    "After Join / Welcome",
                    "First Visit Reminder",
                    "2nd Visit Milestone",
                    "3rd Visit Milestone",
                    "4th Visit Milestone",
                    "Joined but No Purchase",
                ],
            ),
            CatalogStage::new(
                "habituation-repeat-visits",
                "Habituation & Repeat Visits",
                &[
                    "Flash Sale / Happy Hour",
                    "Monthly Push Offer",
                    "Visit Milestone Autoconnect",
                    "Standard Weekly Messaging",
                    "Brand / Category Campaigns",
                    "Birthday Message",
                    "Seasonal Promos",
                ],
            ),
            CatalogStage::new(
                "churn-risk-reengagement",
                "Churn Risk / Re-engagement",
                &[
                    "Winback - 45 Days",
                    "Winback - 90 Days",
                    "Winback - 180+ Days",
                    "Points Expiring - 30 Days",
                ],
            ),
            CatalogStage::new(
                "high-value-customer-recognition",
                "High-Value Customer Recognition",
                &[
                    "VIP Spender",
                    "Frequent Flyer",
                    "Big Purchase Milestone",
                    "Referral Program Trigger",
                    "Tier Upgrade Notice",
                ],
            ),
        ];

        Self { stages }
    }

    /// Builds a catalog from custom stages, rejecting stage ids or message
    /// type ids that would collide.
    pub fn from_stages(stages: Vec<CatalogStage>) -> Result<Self> {
        let mut stage_ids = HashSet::new();
        let mut message_type_ids = HashSet::new();

        for stage in &stages {
            if stage.id.trim().is_empty() {
                bail!("Journey stage '{}' has an empty id", stage.name);
            }
            if !stage_ids.insert(stage.id.as_str()) {
                bail!("Duplicate journey stage id: {}", stage.id);
            }
            for name in &stage.message_types {
                let id = message_type_id(&stage.id, name);
                if !message_type_ids.insert(id.clone()) {
                    bail!(
                        "Message type '{}' in stage '{}' collides with id {}",
                        name,
                        stage.name,
                        id
                    );
                }
            }
        }

        Ok(Self { stages })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let stages: Vec<CatalogStage> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Self::from_stages(stages)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to open catalog: {}", path.as_ref().display()))?;
        Self::from_json_str(&content)
    }

    pub fn stages(&self) -> &[CatalogStage] {
        &self.stages
    }

    pub fn stage(&self, id: &str) -> Option<&CatalogStage> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    pub fn stage_by_name(&self, name: &str) -> Option<&CatalogStage> {
        self.stages.iter().find(|stage| stage.name == name)
    }

    pub fn message_type_count(&self) -> usize {
        self.stages
            .iter()
            .map(|stage| stage.message_types.len())
            .sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every character outside `[A-Za-z0-9]` with `-`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub fn message_type_id(stage_id: &str, message_type: &str) -> String {
    format!("{}-{}", stage_id, sanitize(message_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::new();
        assert_eq!(catalog.stages().len(), 4);
        assert_eq!(catalog.message_type_count(), 22);
        assert_eq!(
            catalog.stages()[0].message_types()[0],
            "After Join / Welcome"
        );
        assert!(catalog.stage("churn-risk-reengagement").is_some());
        assert_eq!(
            catalog
                .stage_by_name("High-Value Customer Recognition")
                .map(|s| s.id()),
            Some("high-value-customer-recognition")
        );
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("After Join / Welcome"), "After-Join---Welcome");
        assert_eq!(sanitize("Winback - 180+ Days"), "Winback---180--Days");
        assert_eq!(sanitize("Café"), "Caf-");
        assert_eq!(
            message_type_id("new-member-activation", "2nd Visit Milestone"),
            "new-member-activation-2nd-Visit-Milestone"
        );
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[{"id": "onboarding", "name": "Onboarding", "messageTypes": ["Welcome", "Day 2 Tips"]}]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.stages().len(), 1);
        assert_eq!(catalog.stages()[0].message_types().len(), 2);
    }

    #[test]
    fn test_duplicate_stage_ids_rejected() {
        let stages = vec![
            CatalogStage::new("a", "A", &["One"]),
            CatalogStage::new("a", "Also A", &["Two"]),
        ];
        assert!(Catalog::from_stages(stages).is_err());
    }

    #[test]
    fn test_colliding_message_type_ids_rejected() {
        let stages = vec![CatalogStage::new("a", "A", &["Hello World", "Hello/World"])];
        assert!(Catalog::from_stages(stages).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = r#"[
            {"id": "retention", "name": "Retention", "messageTypes": ["Winback"]},
            {"id": "loyalty", "name": "Loyalty", "messageTypes": ["Tier Upgrade", "Birthday"]}
        ]"#;
        temp_file.write_all(content.as_bytes()).unwrap();

        let catalog = Catalog::load_from_file(temp_file.path()).unwrap();
        assert_eq!(catalog.message_type_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Catalog::load_from_file("/definitely/not/here.json").is_err());
    }
}
