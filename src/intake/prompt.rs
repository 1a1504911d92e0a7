// Prompt templates for injury analysis
// Author: kelexine (https://github.com/kelexine)

const RESPONSE_FORMAT: &str = r#"Respond with ONLY valid JSON in this exact format:
{
  "injury_name": "Specific injury name",
  "first_aid_steps": [
    "Step 1 description",
    "Step 2 description",
    "Step 3 description"
  ],
  "severity": "minor|moderate|severe"
}"#;

const FIELDS: &str = "'injury_name', 'first_aid_steps' (as a list of strings), and 'severity' ('minor', 'moderate', or 'severe')";

const SEVERE_FIRST_STEP: &str =
    "If it's a severe injury that requires immediate medical attention, include that as the first step.";

const NO_EXTRA_TEXT: &str =
    "Do not include any text before or after the JSON. Only return the JSON object.";

/// Prompt for a free-text injury description. The description is embedded verbatim.
pub fn text_prompt(description: &str) -> String {
    format!(
        "You are a first aid assistant. Analyze the following injury description and provide ONLY a valid JSON response with these exact fields: {FIELDS}.\n\n\
         Injury Description: {description}\n\n\
         {RESPONSE_FORMAT}\n\n\
         {SEVERE_FIRST_STEP}\n\
         {NO_EXTRA_TEXT}"
    )
}

/// Prompt sent together with an uploaded injury photo.
pub fn image_prompt() -> String {
    format!(
        "You are a first aid assistant. Analyze this image of an injury and provide ONLY a valid JSON response with these exact fields: {FIELDS}.\n\n\
         {RESPONSE_FORMAT}\n\n\
         {SEVERE_FIRST_STEP}\n\
         {NO_EXTRA_TEXT}"
    )
}
