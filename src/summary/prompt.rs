//! Prompt construction for justification requests.

/// Builds the single user message sent to the chat model.
pub fn build_prompt(description: &str, text: &str) -> String {
    format!(
        "You are assisting a recruiter. Below are a job description and a candidate's resume.\n\
         In 2-3 sentences, explain why this candidate is a good fit for the role.\n\
         \n\
         Job Description:\n\
         {description}\n\
         \n\
         Candidate Resume:\n\
         {text}\n\
         \n\
         Summary:\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_both_inputs() {
        let prompt = build_prompt("Senior Rust engineer", "Built a storage engine");
        assert!(prompt.contains("Job Description:\nSenior Rust engineer\n"));
        assert!(prompt.contains("Candidate Resume:\nBuilt a storage engine\n"));
        assert!(prompt.ends_with("Summary:\n"));
    }

    #[test]
    fn test_prompt_preserves_multiline_text() {
        let prompt = build_prompt("job", "line one\nline two");
        assert!(prompt.contains("line one\nline two"));
    }
}
