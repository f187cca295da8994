use std::path::PathBuf;

use gitflow_notifier_core::{
    StatusId,
    config::Config,
    models::{JobReport, ResolvedRun},
};

use crate::{
    ButtonSection, Fact, FactSection, NotificationCard, Section, TextSection, TitleSection,
    release_notes,
};

pub const RELEASE_NOTES_TITLE: &str = "Release Notes";
pub const LOGS_BUTTON_LABEL: &str = "Deployment Logs";

/// Assembles the notification card for a resolved run.
///
/// The builder itself is deterministic: the same run and job reports always
/// yield the same card, as long as the release notes file is unchanged.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    release_ref: String,
    project_name: String,
    project_url: String,
    release_notes_path: PathBuf,
}

impl CardBuilder {
    pub fn new(config: &Config) -> Self {
        let repository = &config.run.repository;
        let project_url = format!(
            "{}/{}/{}/tree/{}",
            config.github.server_url.as_str().trim_end_matches('/'),
            repository.owner,
            repository.name,
            config.run.ref_name()
        );
        Self {
            release_ref: config.run.release_ref.clone(),
            project_name: repository.name.clone(),
            project_url,
            release_notes_path: config.notify.release_notes_path.clone(),
        }
    }

    /// Sections, in order: title, project/status facts, release notes (only
    /// on success), logs button.
    ///
    /// Job reports are accepted for future per-job sections but do not
    /// change the card yet.
    pub fn build(&self, run: &ResolvedRun, jobs: Option<&[JobReport]>) -> NotificationCard {
        if let Some(jobs) = jobs {
            tracing::debug!("Building card for run {} with {} job reports", run.run_id, jobs.len());
        }
        let mut sections = vec![self.title_section(run), self.project_status_section(run)];
        if run.status.id == StatusId::Success {
            sections.push(self.release_notes_section());
        }
        sections.push(button_section(run));
        NotificationCard { title: format!("Realtime Release: {}", self.release_ref), sections }
    }

    fn title_section(&self, run: &ResolvedRun) -> Section {
        Section::Title(TitleSection {
            activity_title: format!("Release Tag: {}", self.release_ref),
            activity_subtitle: run.activity_subtitle.clone(),
            activity_image: run.status.image_url.to_string(),
        })
    }

    fn project_status_section(&self, run: &ResolvedRun) -> Section {
        Section::Facts(FactSection {
            facts: vec![
                Fact {
                    label: "Project".to_string(),
                    value: format!("[{}]({})", self.project_name, self.project_url),
                    color: None,
                },
                Fact {
                    label: "Status".to_string(),
                    value: format!("{} {}", run.conclusion, run.status.icon),
                    color: Some(run.status.color),
                },
            ],
        })
    }

    fn release_notes_section(&self) -> Section {
        Section::Text(TextSection {
            title: RELEASE_NOTES_TITLE.to_string(),
            text: release_notes::load(&self.release_notes_path),
        })
    }
}

fn button_section(run: &ResolvedRun) -> Section {
    Section::Button(ButtonSection {
        label: LOGS_BUTTON_LABEL.to_string(),
        url: run.html_url.clone(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    pub use gitflow_notifier_core::test_util::config;
    use gitflow_notifier_core::{
        CardColor,
        models::{StepReport, format_subtitle},
        status,
        test_util::{RUN_ID, RUN_URL, SHA},
    };
    use time::macros::datetime;

    use super::*;

    pub fn resolved(conclusion: &str) -> ResolvedRun {
        let date = datetime!(2024-01-15 10:30:00 UTC);
        ResolvedRun {
            run_id: RUN_ID,
            commit_sha: SHA.to_string(),
            commit_author_date: date,
            activity_subtitle: format_subtitle(date),
            html_url: RUN_URL.to_string(),
            conclusion: conclusion.to_string(),
            status: status::resolve(conclusion),
        }
    }

    fn kinds(card: &NotificationCard) -> Vec<&'static str> {
        card.sections
            .iter()
            .map(|s| match s {
                Section::Title(_) => "title",
                Section::Facts(_) => "facts",
                Section::Text(_) => "text",
                Section::Button(_) => "button",
            })
            .collect()
    }

    #[test]
    fn test_section_layout() {
        let dir = tempfile::tempdir().unwrap();
        let builder = CardBuilder::new(&config(&dir.path().join("Release-Notes.txt")));
        let cases: &[(&str, &[&str])] = &[
            ("success", &["title", "facts", "text", "button"]),
            ("SUCCESS", &["title", "facts", "text", "button"]),
            ("failure", &["title", "facts", "button"]),
            ("cancelled", &["title", "facts", "button"]),
            ("skipped", &["title", "facts", "button"]),
            ("weird_value", &["title", "facts", "button"]),
        ];
        for &(conclusion, expected) in cases {
            let card = builder.build(&resolved(conclusion), None);
            assert_eq!(kinds(&card), expected, "{conclusion}");
        }
    }

    #[test]
    fn test_success_with_release_notes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Release-Notes.txt");
        fs::write(&path, "v1.2 fixes bug X").unwrap();
        let card = CardBuilder::new(&config(&path)).build(&resolved("SUCCESS"), None);

        assert_eq!(card.title, "Realtime Release: refs/tags/v1.2.0");
        assert_eq!(card.sections.len(), 4);
        assert_eq!(card.title_section(), Some(&TitleSection {
            activity_title: "Release Tag: refs/tags/v1.2.0".to_string(),
            activity_subtitle: "2024-01-15 10:30:00 UTC".to_string(),
            activity_image: status::resolve("success").image_url.to_string(),
        }));
        let facts: Vec<_> = card.facts().cloned().collect();
        assert_eq!(facts, [
            Fact {
                label: "Project".to_string(),
                value: "[release-app](https://github.com/octo-org/release-app/tree/v1.2.0)"
                    .to_string(),
                color: None,
            },
            Fact {
                label: "Status".to_string(),
                value: "SUCCESS ✓".to_string(),
                color: Some(CardColor::Good),
            },
        ]);
        assert_eq!(card.text_section(), Some(&TextSection {
            title: RELEASE_NOTES_TITLE.to_string(),
            text: "v1.2 fixes bug X".to_string(),
        }));
        assert_eq!(card.button_section(), Some(&ButtonSection {
            label: LOGS_BUTTON_LABEL.to_string(),
            url: "https://github.com/octo-org/release-app/actions/runs/9876543210".to_string(),
        }));
    }

    #[test]
    fn test_success_without_release_notes() {
        let dir = tempfile::tempdir().unwrap();
        let card = CardBuilder::new(&config(&dir.path().join("missing.txt")))
            .build(&resolved("success"), None);
        let text = card.text_section().unwrap();
        assert_eq!(text.text, release_notes::PLACEHOLDER);
        assert!(!text.text.is_empty());
    }

    #[test]
    fn test_failure_card() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Release-Notes.txt");
        fs::write(&path, "should not be shown").unwrap();
        let card = CardBuilder::new(&config(&path)).build(&resolved("failure"), None);
        assert_eq!(card.sections.len(), 3);
        assert_eq!(card.text_section(), None);
        let status = card.facts().find(|f| f.label == "Status").unwrap();
        assert_eq!(status.value, "failure ✗");
        assert_eq!(status.color, Some(CardColor::Attention));
    }

    #[test]
    fn test_unknown_card() {
        let dir = tempfile::tempdir().unwrap();
        let run = resolved("weird_value");
        assert_eq!(run.status.id, StatusId::Unknown);
        assert_eq!(run.status.title, "No job context has been provided");
        let card = CardBuilder::new(&config(&dir.path().join("n.txt"))).build(&run, None);
        assert_eq!(card.sections.len(), 3);
        let status = card.facts().find(|f| f.label == "Status").unwrap();
        assert_eq!(status.value, "weird_value ?");
        assert_eq!(status.color, Some(CardColor::Default));
        assert_eq!(
            card.title_section().map(|t| t.activity_image.as_str()),
            Some(status::resolve("unknown").image_url)
        );
    }

    #[test]
    fn test_build_is_idempotent_and_accepts_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Release-Notes.txt");
        fs::write(&path, "notes").unwrap();
        let builder = CardBuilder::new(&config(&path));
        let jobs = vec![JobReport {
            job_number: 1,
            name: "build".to_string(),
            status: "completed".to_string(),
            conclusion: Some("success".to_string()),
            started_at: None,
            completed_at: None,
            steps: vec![StepReport {
                step_number: 1,
                name: "checkout".to_string(),
                status: "completed".to_string(),
                conclusion: Some("success".to_string()),
            }],
        }];
        for conclusion in ["success", "failure", "skipped"] {
            let run = resolved(conclusion);
            let first = builder.build(&run, Some(&jobs));
            let second = builder.build(&run, Some(&jobs));
            assert_eq!(first, second);
            assert_eq!(first, builder.build(&run, None));
        }
    }

    #[test]
    fn test_project_link_uses_server_url_and_ref_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(&dir.path().join("n.txt"));
        config.run.release_ref = "refs/heads/main".to_string();
        config.github.server_url = "https://github.example.com/".parse().unwrap();
        let card = CardBuilder::new(&config).build(&resolved("failure"), None);
        let project = card.facts().find(|f| f.label == "Project").unwrap();
        assert_eq!(
            project.value,
            "[release-app](https://github.example.com/octo-org/release-app/tree/main)"
        );
        assert_eq!(card.title, "Realtime Release: refs/heads/main");
    }
}
