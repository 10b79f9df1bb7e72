use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use nr_core::{ChatMessage, ChatModel, Report, Result};

const AGENT_PROMPT: &str = "You are a helpful AI news assistant.\n\
You answer questions about recent updates on a specific topic using \
ONLY the information in the provided report.\n\
If the user asks a vague question like 'What's happening nowadays?' \
or 'Any news?', summarise the most important points from the report.\n\
If the user asks about something not covered by the report, say you \
don't know and gently steer them back to the topic.";

/// Conversational interface bound to one report for its whole
/// lifetime. Answers come from the report content only; the rendered
/// context is re-sent with every question.
pub struct ChatAgent<'r> {
    model: Arc<dyn ChatModel>,
    report: &'r Report,
    history: Vec<ChatMessage>,
}

impl<'r> ChatAgent<'r> {
    pub fn new(model: Arc<dyn ChatModel>, report: &'r Report) -> Self {
        Self {
            model,
            report,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Derived fresh on every call so it always reflects the bound
    /// report exactly.
    fn build_context(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("Topic: {}", self.report.topic));
        lines.push(format!(
            "Generated at: {}",
            self.report.generated_at.to_rfc3339()
        ));
        lines.push(String::new());
        lines.push("Summary:".to_string());
        lines.push(self.report.summary.clone());
        lines.push(String::new());
        lines.push("Key takeaways:".to_string());
        for item in &self.report.key_takeaways {
            lines.push(format!("- {}", item));
        }
        lines.push(String::new());
        lines.push("Organizations / Terms:".to_string());
        for item in &self.report.organizations_and_terms {
            lines.push(format!("- {}", item));
        }
        lines.join("\n")
    }

    /// One blocking question/answer exchange. On success the question
    /// and the answer are appended to history, in that order; a failed
    /// call records nothing.
    pub async fn ask(&mut self, question: &str) -> Result<String> {
        let context = self.build_context();

        let mut messages = Vec::with_capacity(self.history.len() + 3);
        messages.push(ChatMessage::system(AGENT_PROMPT));
        messages.push(ChatMessage::system(format!(
            "Here is the latest report:\n\n{}",
            context
        )));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::user(question));

        let answer = self.model.invoke(&messages).await?;

        self.history.push(ChatMessage::user(question));
        self.history.push(ChatMessage::assistant(answer.clone()));
        Ok(answer)
    }

    /// Line-per-turn interactive loop. Exits on `exit`/`quit`
    /// (case-insensitive), end of input or Ctrl-C; empty lines are
    /// skipped without a model call.
    pub async fn run_chat_loop(&mut self) -> Result<()> {
        println!("\nChatting about the latest report.");
        println!("Type 'exit' or 'quit' to leave.\n");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("You: ");
            std::io::stdout().flush()?;

            let line = tokio::select! {
                _ = tokio::signal::ctrl_c() => None,
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                println!("\nExiting chat.");
                break;
            };

            let question = line.trim();
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                println!("Goodbye.");
                break;
            }
            if question.is_empty() {
                continue;
            }

            let answer = self.ask(question).await?;
            println!("Agent: {}\n", answer);
        }

        Ok(())
    }
}
