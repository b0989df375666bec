use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{
    app::Config,
    chat::{ChatBackend, ChatSession},
    cli::OutputFormat,
};

/// Result of a non-interactive run
#[derive(Debug, Serialize, Deserialize)]
pub struct NonInteractiveResult {
    /// The question that was asked
    pub prompt: String,
    /// The text appended to the transcript
    pub response: String,
    /// Documents the backend grounded its answer on
    pub sources: Vec<String>,
    /// Any errors that occurred
    pub errors: Vec<String>,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend endpoint used
    pub endpoint: String,
    /// Retrieval breadth sent
    pub top_k: u32,
    /// Prior turns sent along with the question
    pub history_len: usize,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Non-interactive runner for asking single questions
pub struct NonInteractiveRunner {
    session: ChatSession,
    backend: Box<dyn ChatBackend>,
}

impl NonInteractiveRunner {
    pub fn new(config: &Config, backend: Box<dyn ChatBackend>) -> Self {
        Self {
            session: ChatSession::from_config(&config.chat),
            backend,
        }
    }

    /// Ask one question and return the outcome
    pub async fn execute(&mut self, prompt: String) -> Result<NonInteractiveResult> {
        let Some(exchange) = self.session.submit(&prompt, self.backend.as_ref()).await else {
            anyhow::bail!("Nothing to ask: the prompt is empty");
        };

        Ok(NonInteractiveResult {
            prompt: exchange.request.message.clone(),
            response: exchange.reply.text.clone(),
            sources: exchange.sources,
            errors: exchange.error.into_iter().collect(),
            metadata: ExecutionMetadata {
                endpoint: self.backend.endpoint(),
                top_k: exchange.request.top_k,
                history_len: exchange.request.messages.len(),
                duration_ms: exchange.duration_ms,
            },
        })
    }

    /// Format the result according to the output format
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => {
                let mut output = String::new();
                output.push_str(&result.response);

                if !result.sources.is_empty() {
                    output.push_str("\n\n--- Sources ---\n");
                    for source in &result.sources {
                        output.push_str(&format!("• {}\n", source));
                    }
                }

                output
            }
            OutputFormat::Markdown => {
                let mut output = String::new();

                output.push_str("## Question\n\n");
                output.push_str(&result.prompt);
                output.push_str("\n\n## Answer\n\n");
                output.push_str(&result.response);
                output.push_str("\n\n");

                if !result.sources.is_empty() {
                    output.push_str("## Sources\n\n");
                    for source in &result.sources {
                        output.push_str(&format!("- `{}`\n", source));
                    }
                    output.push('\n');
                }

                output.push_str("---\n");
                output.push_str(&format!(
                    "*Endpoint: {} | top_k: {} | Duration: {}ms*\n",
                    result.metadata.endpoint, result.metadata.top_k, result.metadata.duration_ms
                ));

                output
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatError, ChatReply, ChatRequest};
    use crate::constants::UNAVAILABLE_MESSAGE;
    use async_trait::async_trait;

    struct Canned(Option<&'static str>);

    #[async_trait]
    impl ChatBackend for Canned {
        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, ChatError> {
            match self.0 {
                Some(answer) => Ok(ChatReply {
                    answer: Some(answer.to_string()),
                    context_sources: vec!["experience.md".to_string()],
                }),
                None => Err(ChatError::Status(500)),
            }
        }

        fn endpoint(&self) -> String {
            "http://test/api/v1/chat".to_string()
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let mut runner =
            NonInteractiveRunner::new(&Config::default(), Box::new(Canned(Some("Python, ML, NLP..."))));
        let result = runner.execute("  What are his skills? ".to_string()).await.unwrap();

        assert_eq!(result.prompt, "What are his skills?");
        assert_eq!(result.response, "Python, ML, NLP...");
        assert!(result.errors.is_empty());
        assert_eq!(result.metadata.top_k, 6);
        assert_eq!(result.metadata.history_len, 0);

        let text = runner.format_result(&result, OutputFormat::Text);
        assert!(text.contains("experience.md"));
        let json: serde_json::Value =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(json["response"], "Python, ML, NLP...");
    }

    #[tokio::test]
    async fn test_execute_failure_is_reported_not_raised() {
        let mut runner = NonInteractiveRunner::new(&Config::default(), Box::new(Canned(None)));
        let result = runner.execute("hello".to_string()).await.unwrap();

        assert_eq!(result.response, UNAVAILABLE_MESSAGE);
        assert_eq!(result.errors.len(), 1);
        let markdown = runner.format_result(&result, OutputFormat::Markdown);
        assert!(markdown.starts_with("## Question\n\nhello"));
    }

    #[tokio::test]
    async fn test_execute_empty_prompt() {
        let mut runner = NonInteractiveRunner::new(&Config::default(), Box::new(Canned(Some("x"))));
        assert!(runner.execute("   ".to_string()).await.is_err());
    }
}
