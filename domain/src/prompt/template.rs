//! Prompt templates for P&ID analysis

/// Fixed prompts and fallback texts for a diagram analysis session
pub struct PidPromptTemplate;

impl PidPromptTemplate {
    /// System instruction set once when a session is created
    pub fn system_instruction() -> &'static str {
        r#"You are an expert Process Engineer and Automation Specialist with 20 years of experience reading Piping and Instrumentation Diagrams (P&IDs).

Your goal is to help users understand the technical diagrams they upload.

When analyzing a P&ID:
1. Identify the main equipment (Tanks, Pumps, Heat Exchangers, Reactors).
2. Explain the process flow clearly, step-by-step, from input to output.
3. Identify key control loops (Level Control, Flow Control, Pressure Control, Temperature Control).
4. Note any critical safety devices (relief valves, interlocks).
5. Use professional engineering terminology but keep the explanation accessible.
6. Format your response with clear Markdown headers, bullet points, and bold text for equipment tags (e.g., **P-101**)."#
    }

    /// Text part sent alongside the image on the seeding turn
    pub fn analysis_request() -> &'static str {
        "Please provide a detailed technical analysis of this P&ID. Explain the process flow, identify the major equipment with their tags, and describe the control strategy depicted."
    }

    /// Returned when the seeding turn produced no text
    pub fn empty_analysis() -> &'static str {
        "No analysis generated."
    }

    /// Returned when a follow-up turn produced no text
    pub fn empty_answer() -> &'static str {
        "I couldn't generate a response."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_instruction_covers_all_points() {
        let prompt = PidPromptTemplate::system_instruction();
        for needle in [
            "Identify the main equipment",
            "process flow",
            "control loops",
            "safety devices",
            "engineering terminology",
            "**P-101**",
        ] {
            assert!(prompt.contains(needle), "missing: {}", needle);
        }
    }

    #[test]
    fn fallbacks_are_distinct() {
        assert_eq!(PidPromptTemplate::empty_analysis(), "No analysis generated.");
        assert_ne!(
            PidPromptTemplate::empty_analysis(),
            PidPromptTemplate::empty_answer()
        );
    }
}
