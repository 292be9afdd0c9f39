//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application config.

mod archive;
mod competitions;
mod season;

pub use archive::FileArchiveConfig;
pub use competitions::FileCompetitionConfig;
pub use season::FileSeasonConfig;

use serde::{Deserialize, Serialize};
use showrunner_application::{ConfigIssue, ConfigIssueCode, SeasonConfig};
use std::collections::BTreeMap;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Operators and season rules
    pub season: FileSeasonConfig,
    /// Season archive location
    pub archive: FileArchiveConfig,
    /// Competition kinds, keyed by kind name
    pub competitions: BTreeMap<String, FileCompetitionConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings are reported and
    /// the run continues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.season.operators.iter().all(|o| o.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoOperators,
                "season.operators is empty: operator commands will always be rejected",
            ));
        }

        if self.season.finalists == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoFinalists,
                "season.finalists must be at least 1",
            ));
        }

        for (kind, competition) in &self.competitions {
            if competition.answer.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyAnswer { kind: kind.clone() },
                    format!("competitions.{}.answer cannot be empty", kind),
                ));
            }
            if competition.duration_secs == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroDuration { kind: kind.clone() },
                    format!("competitions.{}.duration_secs cannot be 0", kind),
                ));
            }
            if competition.points == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroPoints { kind: kind.clone() },
                    format!("competitions.{}.points is 0: winners gain nothing", kind),
                ));
            }
        }

        issues
    }

    /// Convert into the application-level season configuration
    pub fn to_season_config(&self) -> SeasonConfig {
        let operators = self
            .season
            .operators
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string);

        self.competitions.iter().fold(
            SeasonConfig::new()
                .with_operators(operators)
                .with_finalists(self.season.finalists)
                .with_reveal_delay(Duration::from_millis(self.season.reveal_delay_ms)),
            |config, (kind, competition)| {
                config.with_competition(kind, competition.to_competition_config())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showrunner_application::Severity;
    use showrunner_domain::{CompetitionKind, ParticipantId, Role};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[season]
operators = ["host", "producer"]
finalists = 2
reveal_delay_ms = 1500

[archive]
path = "seasons.jsonl"

[competitions.trivia]
answer = "Paris"
duration_secs = 30
points = 2

[competitions.Puzzle]
answer = "sphinx"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.season.operators, vec!["host", "producer"]);
        assert_eq!(config.season.finalists, 2);
        assert_eq!(config.archive.path.as_deref(), Some("seasons.jsonl"));
        assert_eq!(config.competitions.len(), 2);
        assert!(config.validate().is_empty());

        let season = config.to_season_config();
        assert_eq!(season.role_of(&ParticipantId::new("producer")), Role::Operator);
        assert_eq!(season.rules().finalists, 2);
        assert_eq!(season.reveal_delay(), Duration::from_millis(1500));

        let trivia = season
            .competition_spec(&CompetitionKind::new("trivia"))
            .unwrap();
        assert_eq!(trivia.duration, Duration::from_secs(30));
        assert_eq!(trivia.points, 2);
        assert!(
            season
                .competition_spec(&CompetitionKind::new("puzzle"))
                .is_some()
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.season.operators.is_empty());
        assert_eq!(config.season.finalists, 3);
        assert_eq!(config.season.reveal_delay_ms, 3000);
        assert!(config.archive.path.is_none());
        assert!(config.competitions.is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let toml_str = r#"
[season]
finalists = 0

[competitions.trivia]
answer = "  "
duration_secs = 0
points = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        let codes: Vec<_> = issues.iter().map(|i| i.code.clone()).collect();
        assert!(codes.contains(&ConfigIssueCode::NoOperators));
        assert!(codes.contains(&ConfigIssueCode::NoFinalists));
        assert!(codes.contains(&ConfigIssueCode::EmptyAnswer {
            kind: "trivia".to_string()
        }));
        assert!(codes.contains(&ConfigIssueCode::ZeroDuration {
            kind: "trivia".to_string()
        }));
        assert!(codes.contains(&ConfigIssueCode::ZeroPoints {
            kind: "trivia".to_string()
        }));

        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        assert_eq!(errors, 3);
    }
}
