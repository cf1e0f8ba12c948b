// coordinator.rs

use crate::agent::Agent;
use crate::artifact;
use crate::config::Config;
use crate::error::PipelineError;
use crate::generation::OllamaGenerator;
use crate::logging;
use crate::mailbox::Mailbox;
use crate::message::MessageKind;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_MODEL: &str = "llama3.2:latest";

/// One sequential step of the pipeline, bound to one agent activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Research,
    Draft,
    Edit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let phase_str = match self {
            Phase::Research => "research",
            Phase::Draft => "draft",
            Phase::Edit => "edit",
        };
        write!(f, "{}", phase_str)
    }
}

/// Driver state. Advancing is only possible through the match in `run`, so
/// phase ordering is enforced by the state machine rather than by call order.
enum PipelineState {
    AwaitingResearch,
    AwaitingDraft,
    AwaitingFinal,
    Done(String),
}

/// Owns the shared mailbox and the three agents, and drives the three-phase
/// sequential execution.
///
/// The coordinator never hands text from one agent to the next. Each phase
/// only activates an agent; the data travels through the mailbox, so agents
/// can be replaced or inserted without touching the call sequence here, as
/// long as they honor the send/receive kind contract.
pub struct Coordinator {
    mailbox: Arc<Mailbox>,
    researcher: Agent,
    writer: Agent,
    editor: Agent,
    output_dir: PathBuf,
    log_path: PathBuf,
}

impl Coordinator {
    /// Builds the shared mailbox and the three agents, each with its own
    /// generator instance so every role keeps its own temperature.
    pub fn new(config: &Config) -> Self {
        let mailbox = Mailbox::new();
        let model = config
            .ollama_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let researcher = Agent::researcher(
            mailbox.clone(),
            Arc::new(OllamaGenerator::new(
                model.clone(),
                config.agents.researcher.temperature,
            )),
        );
        let writer = Agent::writer(
            mailbox.clone(),
            Arc::new(OllamaGenerator::new(
                model.clone(),
                config.agents.writer.temperature,
            )),
        );
        let editor = Agent::editor(
            mailbox.clone(),
            Arc::new(OllamaGenerator::new(
                model,
                config.agents.editor.temperature,
            )),
        );

        for a in [&researcher, &writer, &editor] {
            logging::debug(&format!("[{}] ready ({})", a.name, a.role));
        }

        Self {
            mailbox,
            researcher,
            writer,
            editor,
            output_dir: config.output_dir.clone(),
            log_path: config.log_path.clone(),
        }
    }

    /// Runs the full pipeline for one topic and returns the final article.
    ///
    /// Phases run strictly in sequence; each one blocks until its agent's
    /// generation call returns. A phase that finds no matching message makes
    /// the whole run fail with `PipelineError::Incomplete` - later phases
    /// are not attempted and no partial result is returned.
    pub async fn run(&mut self, topic: &str) -> Result<String, PipelineError> {
        logging::info(&format!("starting pipeline for topic: {}", topic));
        let mut state = PipelineState::AwaitingResearch;

        let article = loop {
            state = match state {
                PipelineState::AwaitingResearch => {
                    logging::info("phase 1: research");
                    self.researcher
                        .produce(topic)
                        .await
                        .map_err(|source| PipelineError::Generation {
                            phase: Phase::Research,
                            source,
                        })?;
                    PipelineState::AwaitingDraft
                }
                PipelineState::AwaitingDraft => {
                    logging::info("phase 2: drafting");
                    let drafted = self.writer.process_inbox().await.map_err(|source| {
                        PipelineError::Generation {
                            phase: Phase::Draft,
                            source,
                        }
                    })?;
                    match drafted {
                        Some(_) => PipelineState::AwaitingFinal,
                        None => {
                            return Err(PipelineError::Incomplete {
                                phase: Phase::Draft,
                                expected: MessageKind::Research,
                            })
                        }
                    }
                }
                PipelineState::AwaitingFinal => {
                    logging::info("phase 3: editing");
                    let edited = self.editor.process_inbox().await.map_err(|source| {
                        PipelineError::Generation {
                            phase: Phase::Edit,
                            source,
                        }
                    })?;
                    match edited {
                        Some(text) => PipelineState::Done(text),
                        None => {
                            return Err(PipelineError::Incomplete {
                                phase: Phase::Edit,
                                expected: MessageKind::Draft,
                            })
                        }
                    }
                }
                PipelineState::Done(text) => break text,
            };
        };

        let path = artifact::save_artifact(&self.output_dir, topic, &article).map_err(
            |source| PipelineError::Persistence {
                topic: topic.to_string(),
                article: article.clone(),
                source,
            },
        )?;
        logging::info(&format!("article saved: {}", path.display()));

        self.mailbox
            .export_log(&self.log_path)
            .map_err(PipelineError::LogExport)?;
        logging::info(&format!("message log saved: {}", self.log_path.display()));

        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::WRITER;
    use crate::error::GenerationError;
    use crate::generation::TextGenerator;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes a prefix plus the sole variable value, counting invocations.
    struct EchoGenerator {
        prefix: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(
            &self,
            _template: &str,
            vars: &HashMap<String, String>,
        ) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let input = vars.values().next().cloned().unwrap_or_default();
            Ok(format!("{}{}", self.prefix, input))
        }
    }

    /// Always succeeds with empty output.
    struct SilentGenerator;

    #[async_trait]
    impl TextGenerator for SilentGenerator {
        async fn generate(
            &self,
            _template: &str,
            _vars: &HashMap<String, String>,
        ) -> Result<String, GenerationError> {
            Ok(String::new())
        }
    }

    struct TestPipeline {
        coordinator: Coordinator,
        mailbox: Arc<Mailbox>,
        editor_calls: Arc<AtomicUsize>,
        _tmp: tempfile::TempDir,
    }

    fn stub_pipeline(researcher_gen: Arc<dyn TextGenerator>) -> TestPipeline {
        let tmp = tempfile::tempdir().unwrap();
        let mailbox = Mailbox::new();
        let editor_calls = Arc::new(AtomicUsize::new(0));

        let coordinator = Coordinator {
            mailbox: mailbox.clone(),
            researcher: Agent::researcher(mailbox.clone(), researcher_gen),
            writer: Agent::writer(
                mailbox.clone(),
                Arc::new(EchoGenerator {
                    prefix: "W:",
                    calls: Arc::new(AtomicUsize::new(0)),
                }),
            ),
            editor: Agent::editor(
                mailbox.clone(),
                Arc::new(EchoGenerator {
                    prefix: "E:",
                    calls: editor_calls.clone(),
                }),
            ),
            output_dir: tmp.path().join("articles"),
            log_path: tmp.path().join("log.json"),
        };

        TestPipeline {
            coordinator,
            mailbox,
            editor_calls,
            _tmp: tmp,
        }
    }

    fn echo(prefix: &'static str) -> Arc<dyn TextGenerator> {
        Arc::new(EchoGenerator {
            prefix,
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    #[tokio::test]
    async fn test_full_run_threads_text_through_all_phases() {
        let mut pipeline = stub_pipeline(echo("R:"));

        let article = pipeline.coordinator.run("Mechanical Watches").await.unwrap();
        assert_eq!(article, "E:W:R:Mechanical Watches");

        let log = pipeline.mailbox.log_snapshot();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].kind, "research");
        assert_eq!(log[1].kind, "draft");
        assert_eq!(log[2].kind, "final");

        // The artifact and the exported log landed on disk.
        assert!(pipeline.coordinator.log_path.exists());
        let articles: Vec<_> = std::fs::read_dir(&pipeline.coordinator.output_dir)
            .unwrap()
            .collect();
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_research_content_still_flows() {
        // Filtering is by kind, not by content: an empty research message is
        // still picked up by the writer.
        let mut pipeline = stub_pipeline(Arc::new(SilentGenerator));

        let article = pipeline.coordinator.run("Anything").await.unwrap();
        assert_eq!(article, "E:W:");
        assert_eq!(pipeline.mailbox.log_snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_research_fails_before_editor() {
        let mut pipeline = stub_pipeline(echo("R:"));
        // Misroute the researcher so nothing reaches the writer.
        pipeline.coordinator.researcher.forward_to = Some("Nobody".to_string());

        let result = pipeline.coordinator.run("Topic").await;
        assert!(matches!(
            result,
            Err(PipelineError::Incomplete {
                phase: Phase::Draft,
                ..
            })
        ));

        // The editor was never activated.
        assert_eq!(pipeline.editor_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_stray_message_does_not_derail_the_writer() {
        let mut pipeline = stub_pipeline(echo("R:"));
        pipeline.mailbox.deposit(
            "Intruder",
            WRITER,
            "noise".into(),
            MessageKind::from("unexpected"),
        );

        let article = pipeline.coordinator.run("Topic").await.unwrap();
        assert_eq!(article, "E:W:R:Topic");

        // The stray deposit is in the log but produced no pipeline output.
        assert_eq!(pipeline.mailbox.log_snapshot().len(), 4);
    }

    #[tokio::test]
    async fn test_persistence_failure_carries_the_article() {
        let mut pipeline = stub_pipeline(echo("R:"));
        // Point the output directory at a path that cannot be a directory.
        let blocker = pipeline.coordinator.log_path.clone();
        std::fs::write(&blocker, "x").unwrap();
        pipeline.coordinator.output_dir = blocker;

        let result = pipeline.coordinator.run("Topic").await;
        match result {
            Err(PipelineError::Persistence { article, topic, .. }) => {
                assert_eq!(article, "E:W:R:Topic");
                assert_eq!(topic, "Topic");
            }
            other => panic!("expected persistence failure, got {:?}", other.map(|_| ())),
        }
    }
}
