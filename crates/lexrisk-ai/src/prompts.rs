//! Prompt templates for the chat-completion oracle.

pub const SYSTEM_PROMPT: &str = "You are a helpful and precise legal assistant. Always output JSON.";

/// System prompt for free-text answers (translation, Q&A), where JSON is not wanted.
pub const PLAIN_SYSTEM_PROMPT: &str = "You are a helpful and precise legal assistant.";

pub fn clause_prompt(clause: &str, context: &str) -> String {
    format!(
        "You are a legal expert specializing in Indian Contract Law. \
         Analyze the following contract clause:\n\
         \n\
         \"{clause}\"\n\
         \n\
         Context: {context}\n\
         \n\
         Provide the output in valid JSON format with the following keys:\n\
         - \"explanation\": Simple plain English explanation (max 2 sentences).\n\
         - \"risk_score\": Integer 1-10 (10 being highest risk).\n\
         - \"risk_reason\": Why is this risky? (If risk > 3).\n\
         - \"favorable\": \"Buyer\", \"Seller\", \"Mutual\", or \"Unknown\".\n\
         - \"suggestion\": Suggestion for improvement if risk > 5."
    )
}

/// `text` must already be capped by the caller.
pub fn summary_prompt(text: &str) -> String {
    format!(
        "You are a legal expert specializing in Indian Contract Law. \
         Summarize the following contract text:\n\
         \n\
         \"{text}\"\n\
         \n\
         Provide the output in valid JSON format with keys:\n\
         - \"summary\": Executive summary (max 100 words).\n\
         - \"contract_type\": Type of contract (e.g., NDA, Employment, Lease).\n\
         - \"key_dates\": List of important dates/deadlines.\n\
         - \"key_obligations\": List of major obligations for both parties.\n\
         - \"overall_risk\": Low/Medium/High.\n\
         - \"specific_risks\": {{\n\
         \x20   \"has_indemnity\": boolean,\n\
         \x20   \"has_non_compete\": boolean,\n\
         \x20   \"has_termination_for_convenience\": boolean,\n\
         \x20   \"has_auto_renewal\": boolean\n\
         }}"
    )
}

pub fn comparison_prompt(actual: &str, standard: &str) -> String {
    format!(
        "Compare the following two contract clauses.\n\
         \n\
         Standard (Fair) Clause:\n\
         \"{standard}\"\n\
         \n\
         Actual Clause from Contract:\n\
         \"{actual}\"\n\
         \n\
         Provide valid JSON output:\n\
         - \"similarity_score\": Integer 0-100 (how close in intent/fairness).\n\
         - \"deviations\": Explain key differences (e.g., \"Actual clause imposes one-way indemnity instead of mutual\").\n\
         - \"verdict\": \"Fair\", \"Strict\", or \"Unfavorable\"."
    )
}

pub fn translation_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following legal text to {target_language}. \
         Maintain legal accuracy:\n\n{text}"
    )
}

pub fn question_prompt(text: &str, question: &str) -> String {
    format!(
        "You are a legal assistant. Answer the user's question based strictly on \
         the following contract text.\n\
         If the answer is not in the text, say so. Keep the answer concise and professional.\n\
         \n\
         Contract Text:\n\
         \"{text}\"\n\
         \n\
         User Question: \"{question}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_prompt_names_every_key() {
        let p = clause_prompt("The Supplier may terminate at will.", "Clause 4.");
        for key in ["explanation", "risk_score", "risk_reason", "favorable", "suggestion"] {
            assert!(p.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert!(p.contains("Context: Clause 4."));
        assert!(p.contains("\"The Supplier may terminate at will.\""));
    }

    #[test]
    fn summary_prompt_lists_specific_risks() {
        let p = summary_prompt("text");
        assert!(p.contains("\"text\""));
        assert!(p.contains("\"has_auto_renewal\": boolean"));
        assert!(p.contains("\"overall_risk\": Low/Medium/High."));
    }

    #[test]
    fn comparison_prompt_orders_standard_first() {
        let p = comparison_prompt("ACTUAL", "STANDARD");
        assert!(p.find("STANDARD").unwrap() < p.find("ACTUAL").unwrap());
    }
}
