//! Prompt text for the generation service and parsing of its replies.

use board_rules::{FlavorKind, Language};
use serde::Deserialize;

use super::TaskSuggestion;
use crate::error::GenerationError;

/// Context line used when a follow-up request has no campaign goal.
pub const DEFAULT_GOAL_CONTEXT: &str = "General Project";

/// Instruction pinning the reply language.
pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Ja => "Respond strictly in Japanese.",
        Language::En => "Respond in English.",
    }
}

/// System instruction for follow-up task generation.
pub fn followup_system(language: Language) -> String {
    format!(
        "You are a helpful productivity assistant gamifying tasks. {}",
        language_instruction(language)
    )
}

/// System instruction for campaign generation.
pub fn campaign_system(language: Language) -> String {
    format!(
        "You are a Level Designer for a productivity RPG. {}",
        language_instruction(language)
    )
}

/// Prompt asking for 2-4 follow-up tasks of the task at the pawn.
pub fn followup_prompt(title: &str, description: &str, language: Language, goal_context: &str) -> String {
    format!(
        "You are a Dungeon Master for a productivity RPG board game.\n\
         The player is currently at a tile representing the task: \"{title}\".\n\
         Description: \"{description}\".\n\
         Context: \"{goal_context}\".\n\n\
         Generate 2 to 4 actionable sub-tasks or follow-up steps that naturally flow from this task.\n\
         These will become new adjacent tiles on the game board.\n\
         Make them sound like RPG quests if possible, but keep them practical.\n\
         {}",
        language_instruction(language)
    )
}

/// Prompt asking for a 3-6 step quest line from a start task to a goal.
pub fn campaign_prompt(start_title: &str, goal: &str, milestones: &str, language: Language) -> String {
    format!(
        "You are a Dungeon Master designing a quest line (campaign) for a productivity RPG.\n\
         Start Point: \"{start_title}\".\n\
         Ultimate Goal: \"{goal}\".\n\
         Intermediate Milestones: \"{milestones}\".\n\n\
         Generate a linear or slightly branching sequence of 3 to 6 tasks that connect the start point to the goal, incorporating the milestones.\n\
         The tasks should progress logically from start to finish.\n\
         The last task should be the Goal itself.\n\
         {}",
        language_instruction(language)
    )
}

/// Prompt for a one-line flavor message.
pub fn flavor_prompt(kind: FlavorKind, subject: &str, language: Language) -> String {
    let length = match language {
        Language::Ja => "Write in Japanese. Keep it under 60 characters.",
        Language::En => "Write in English. Keep it under 60 characters.",
    };
    match kind {
        FlavorKind::Complete => format!(
            "Write a very short RPG-style victory message for completing the quest: \"{subject}\". {length}"
        ),
        FlavorKind::Move => format!(
            "Write a very short flavor text for traveling to the location: \"{subject}\". {length}"
        ),
    }
}

/// JSON schema the service is asked to reply with.
pub const TASK_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "tasks": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "title": { "type": "string", "description": "Short title of the task (max 20 characters)" },
          "description": { "type": "string", "description": "Concise actionable description" },
          "difficulty": { "type": "integer", "description": "Difficulty level 1-5 based on complexity" }
        },
        "required": ["title", "description", "difficulty"]
      }
    }
  },
  "required": ["tasks"]
}"#;

#[derive(Deserialize)]
struct TaskEnvelope {
    #[serde(default)]
    tasks: Vec<TaskSuggestion>,
}

/// Parse a `{"tasks": [...]}` reply. A missing `tasks` field is an empty list.
pub fn parse_task_response(text: &str) -> Result<Vec<TaskSuggestion>, GenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<TaskEnvelope>(trimmed)
        .map(|envelope| envelope.tasks)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_response() {
        let reply = r#"{"tasks": [
            {"title": "Outline", "description": "Sketch chapters", "difficulty": 2},
            {"title": "Research", "description": "Collect sources", "difficulty": 3}
        ]}"#;

        let tasks = parse_task_response(reply).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Outline");
        assert_eq!(tasks[1].difficulty, 3);
    }

    #[test]
    fn test_missing_tasks_is_empty() {
        assert!(parse_task_response("{}").unwrap().is_empty());
        assert!(parse_task_response("   ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_reply_is_error() {
        let result = parse_task_response("Sure! Here are some tasks:");
        assert!(matches!(result, Err(GenerationError::InvalidResponse(_))));
    }

    #[test]
    fn test_prompts_carry_inputs_and_language() {
        let prompt = followup_prompt("Write book", "A novel", Language::En, DEFAULT_GOAL_CONTEXT);
        assert!(prompt.contains("\"Write book\""));
        assert!(prompt.contains("General Project"));
        assert!(prompt.ends_with("Respond in English."));

        let prompt = campaign_prompt("Start", "Run a marathon", "10k, half", Language::Ja);
        assert!(prompt.contains("Ultimate Goal: \"Run a marathon\""));
        assert!(prompt.contains("Japanese"));

        let prompt = flavor_prompt(FlavorKind::Move, "Library", Language::En);
        assert!(prompt.contains("traveling to the location: \"Library\""));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(TASK_SCHEMA).unwrap();
        assert_eq!(schema["required"][0], "tasks");
    }
}
