use async_trait::async_trait;
use nlqa::chat::{run_session, LineReader};
use nlqa::llm::{AnswerClient, AnswerError};
use nlqa::text::Normalizer;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Feeds a fixed list of lines, then reports end of input
struct ScriptedInput {
    lines: VecDeque<String>,
    history: Vec<String>,
}

impl ScriptedInput {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            history: Vec::new(),
        }
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.lines.pop_front()
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

/// Answers with the prompt it received
#[derive(Default)]
struct EchoClient {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl AnswerClient for EchoClient {
    async fn answer(&self, prompt: &str) -> Result<String, AnswerError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(prompt.to_string())
    }
}

/// Fails every call the way an unreachable provider would
#[derive(Default)]
struct BrokenClient {
    calls: Mutex<usize>,
}

#[async_trait]
impl AnswerClient for BrokenClient {
    async fn answer(&self, _prompt: &str) -> Result<String, AnswerError> {
        *self.calls.lock().unwrap() += 1;
        Err(AnswerError::Api { status: 503, message: "service unavailable".to_string() })
    }
}

async fn run(lines: &[&str], client: &dyn AnswerClient) -> (String, ScriptedInput) {
    let mut input = ScriptedInput::new(lines);
    let mut out = Vec::new();
    let normalizer = Normalizer::new().unwrap();
    run_session(&mut input, &mut out, &normalizer, client).await.unwrap();
    (String::from_utf8(out).unwrap(), input)
}

#[tokio::test]
async fn shows_tokens_and_sends_templated_prompt() {
    let client = EchoClient::default();
    let (output, _) = run(&["What is 2+2", "exit"], &client).await;

    assert!(output.contains("[Debug] Tokens: ['what', 'is', '22']"), "output: {}", output);
    assert_eq!(
        *client.prompts.lock().unwrap(),
        vec!["Answer the following question concisely: What is 2+2".to_string()]
    );
    assert!(output.contains("Answer the following question concisely: What is 2+2"));
    assert!(output.contains("Exiting..."));
}

#[tokio::test]
async fn failure_is_printed_and_loop_continues() {
    let client = BrokenClient::default();
    let (output, _) = run(&["first question", "second question", "quit"], &client).await;

    assert_eq!(*client.calls.lock().unwrap(), 2);
    assert_eq!(output.matches("Error communicating with LLM:").count(), 2, "output: {}", output);
    assert!(output.contains("503"));
}

#[tokio::test]
async fn blank_lines_do_not_call_the_client() {
    let client = EchoClient::default();
    let (_, input) = run(&["", "   ", "\t", "EXIT"], &client).await;

    assert!(client.prompts.lock().unwrap().is_empty());
    assert!(input.history.is_empty());
}

#[tokio::test]
async fn exit_stops_before_remaining_lines() {
    let client = EchoClient::default();
    let (_, input) = run(&["Quit", "never asked"], &client).await;

    assert!(client.prompts.lock().unwrap().is_empty());
    assert_eq!(input.lines.len(), 1);
}

#[tokio::test]
async fn end_of_input_ends_the_session() {
    let client = EchoClient::default();
    let (output, input) = run(&["Why is the sky blue?"], &client).await;

    assert_eq!(client.prompts.lock().unwrap().len(), 1);
    assert_eq!(input.history, vec!["Why is the sky blue?".to_string()]);
    assert!(output.trim_end().ends_with("Exiting..."));
}

#[tokio::test]
async fn each_turn_is_independent() {
    let client = EchoClient::default();
    run(&["one", "two", "exit"], &client).await;

    assert_eq!(
        *client.prompts.lock().unwrap(),
        vec![
            "Answer the following question concisely: one".to_string(),
            "Answer the following question concisely: two".to_string(),
        ]
    );
}
