//! Fixed prompt text for the permitting agent.
//!
//! The wording is part of the deployed behavior; changing it changes what
//! the agent checks and how the scorecard is formatted.

/// System instructions the agent is created with.
pub const AGENT_INSTRUCTIONS: &str = "You are a city permitting assistant for food trucks and mobile units. Use embedded city codes and health regulations to pre-screen applications, flag errors, detect compliance gaps, and output a detailed scorecard. Summarize gaps and missing sections.";

/// Builds the review prompt for one rendered application form.
///
/// Instructs the agent to consult only the ingested regulatory corpus and to
/// respond with a markdown scorecard table followed by a summary paragraph.
#[must_use]
pub fn build_review_prompt(form_text: &str) -> String {
    format!(
        "You are a city permitting AI agent. Using only the embedded city requirements and regulations, \
         review the following food truck permit application submission for completeness and compliance. \
         Generate a scorecard listing missing sections, errors, compliance gaps (with reference citations), and a summary compliance score. \
         Respond in markdown table format for the scorecard, followed by a summary paragraph. \n\n\
         Form Content:\n{form_text}"
    )
}
