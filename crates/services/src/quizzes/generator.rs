use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use portal_core::model::{Difficulty, QuizQuestion};

use crate::error::QuizGenError;

/// Number of questions requested per generated quiz.
const QUESTIONS_PER_QUIZ: usize = 5;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("PORTAL_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("PORTAL_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("PORTAL_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// A generated, validated quiz awaiting storage.
///
/// The generator never writes to the library itself; callers pass the
/// draft's parts to `QuizLibraryService::add_quiz`.
#[derive(Debug, Clone)]
pub struct GeneratedQuizDraft {
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
}

/// Opaque generative collaborator that produces quiz drafts.
///
/// Whatever the model returns goes through the same question validation as
/// hand-authored quizzes; a malformed payload never reaches the library.
#[derive(Clone)]
pub struct QuizGeneratorService {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl QuizGeneratorService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GeneratorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Generate a quiz draft for a topic and difficulty.
    ///
    /// # Errors
    ///
    /// Returns `QuizGenError` when the service is disabled, the request
    /// fails, the payload does not parse, or a generated question fails
    /// validation.
    pub async fn generate(
        &self,
        topic: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<GeneratedQuizDraft, QuizGenError> {
        let config = self.config.as_ref().ok_or(QuizGenError::Disabled)?;

        let subject = topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("General Bible");
        let prompt = format!(
            "Generate {QUESTIONS_PER_QUIZ} Bible quiz questions about \"{subject}\" with \
             difficulty \"{}\". Include the correct answer index (0-3). Respond with JSON only, \
             shaped as {{\"questions\": [{{\"question\": string, \"options\": [4 strings], \
             \"correctIndex\": number}}]}}.",
            difficulty.as_str()
        );

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuizGenError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(QuizGenError::EmptyResponse)?;

        let questions = parse_generated_questions(&content)?;
        tracing::info!(
            topic = subject,
            difficulty = difficulty.as_str(),
            count = questions.len(),
            "generated quiz draft"
        );

        let topic = topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(
                || format!("AI Generated: {}", difficulty.as_str()),
                ToOwned::to_owned,
            );
        Ok(GeneratedQuizDraft {
            topic,
            difficulty,
            questions,
        })
    }
}

/// Parse the model's JSON payload into validated questions.
fn parse_generated_questions(content: &str) -> Result<Vec<QuizQuestion>, QuizGenError> {
    let json = strip_code_fences(content);
    let payload: GeneratedPayload = serde_json::from_str(json)?;

    let mut questions = Vec::with_capacity(payload.questions.len());
    for generated in payload.questions {
        questions.push(QuizQuestion::new(
            generated.question,
            generated.options,
            generated.correct_index,
        )?);
    }
    Ok(questions)
}

/// Models often wrap JSON in a markdown code fence; unwrap it when present.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedPayload {
    questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Deserialize)]
struct GeneratedQuestion {
    question: String,
    options: Vec<String>,
    #[serde(rename = "correctIndex")]
    correct_index: usize,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_generator_is_disabled() {
        let service = QuizGeneratorService::new(None);
        assert!(!service.enabled());
    }

    #[test]
    fn parses_a_plain_json_payload() {
        let content = r#"{"questions": [{"question": "Who built the ark?",
            "options": ["Noah", "Moses", "David", "Paul"], "correctIndex": 0}]}"#;
        let questions = parse_generated_questions(content).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index(), 0);
        assert_eq!(questions[0].options().len(), 4);
    }

    #[test]
    fn parses_a_fenced_payload() {
        let content = "```json\n{\"questions\": [{\"question\": \"Who built the ark?\",\n\
            \"options\": [\"Noah\", \"Moses\", \"David\", \"Paul\"], \"correctIndex\": 0}]}\n```";
        let questions = parse_generated_questions(content).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn rejects_an_out_of_range_correct_index() {
        let content = r#"{"questions": [{"question": "Who built the ark?",
            "options": ["Noah", "Moses"], "correctIndex": 5}]}"#;
        let err = parse_generated_questions(content).unwrap_err();
        assert!(matches!(err, QuizGenError::Quiz(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_generated_questions("not json at all").unwrap_err();
        assert!(matches!(err, QuizGenError::MalformedPayload(_)));
    }
}
