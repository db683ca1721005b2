//! Prompt building for the completion endpoints.
//!
//! Templates are plain functions over typed fields so they can be tested
//! without touching the network. Context and data maps are embedded as
//! compact JSON.

use serde_json::{Map, Value};

/// System instruction for the recommendation chat prompt
pub const RECOMMENDATION_SYSTEM_PROMPT: &str = "You are a business intelligence AI assistant.";

/// Stringify a JSON object for embedding into a prompt
fn stringify_map(map: &Map<String, Value>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

/// Build the decision prompt from context and options.
pub fn decision_prompt(context: &Map<String, Value>, options: &[String]) -> String {
    format!(
        "Based on the following context and options, provide a decision recommendation:\n\
         \n\
         Context: {}\n\
         Options: {:?}\n\
         \n\
         Please analyze the situation and provide a recommendation with explanation.",
        stringify_map(context),
        options,
    )
}

/// Build the analysis prompt from data and a question.
pub fn analysis_prompt(data: &Map<String, Value>, question: &str) -> String {
    format!(
        "Analyze the following data and answer the question:\n\
         \n\
         Data: {}\n\
         Question: {}\n\
         \n\
         Please provide a detailed analysis.",
        stringify_map(data),
        question,
    )
}

/// Build the user message for the recommendation chat prompt.
pub fn recommendation_prompt(user_context: &Map<String, Value>) -> String {
    format!(
        "Based on the following user context, provide personalized recommendations:\n\
         \n\
         User Context: {}\n\
         \n\
         Please provide actionable recommendations with explanations.",
        stringify_map(user_context),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_decision_prompt_embeds_fields() {
        let context = map(&[("budget", serde_json::json!(1000))]);
        let options = vec!["A".to_string(), "B".to_string()];

        let prompt = decision_prompt(&context, &options);

        assert!(prompt.contains(r#"{"budget":1000}"#));
        assert!(prompt.contains(r#"["A", "B"]"#));
        assert!(prompt.contains("decision recommendation"));
        assert!(prompt.contains("recommendation with explanation"));
    }

    #[test]
    fn test_decision_prompt_empty_inputs_allowed() {
        let prompt = decision_prompt(&Map::new(), &[]);
        assert!(prompt.contains("Context: {}"));
        assert!(prompt.contains("Options: []"));
    }

    #[test]
    fn test_analysis_prompt_embeds_question() {
        let data = map(&[("sales", serde_json::json!(42))]);

        let prompt = analysis_prompt(&data, "trend?");

        assert!(prompt.contains(r#"{"sales":42}"#));
        assert!(prompt.contains("Question: trend?"));
        assert!(prompt.contains("detailed analysis"));
    }

    #[test]
    fn test_recommendation_prompt_and_system_instruction() {
        let context = map(&[("tier", serde_json::json!("gold"))]);

        let prompt = recommendation_prompt(&context);

        assert!(prompt.contains(r#"{"tier":"gold"}"#));
        assert!(prompt.contains("actionable recommendations"));
        assert!(RECOMMENDATION_SYSTEM_PROMPT.contains("business intelligence"));
    }
}
