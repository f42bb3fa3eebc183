//! FAQ lookup

use crate::fixtures::Faq;

const INTERROGATIVES: &[&str] = &[
    "what", "why", "how", "when", "where", "which", "who", "explain", "define", "meaning",
    "tell me",
];

/// True when the query reads as a question or a request for explanation
pub fn is_interrogative(query: &str) -> bool {
    if query.contains('?') {
        return true;
    }
    let lower = query.to_lowercase();
    let padded = format!(
        " {} ",
        lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    );
    INTERROGATIVES
        .iter()
        .any(|kw| padded.contains(&format!(" {} ", kw)))
}

fn normalize_question(question: &str) -> String {
    question
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim()
        .to_lowercase()
}

/// First FAQ whose question (ignoring case and trailing punctuation) appears in the query
pub fn match_faq<'a>(query: &str, faqs: &'a [Faq]) -> Option<&'a Faq> {
    let lower = query.to_lowercase();
    faqs.iter().find(|faq| {
        let question = normalize_question(&faq.question);
        !question.is_empty() && lower.contains(&question)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faqs() -> Vec<Faq> {
        vec![
            Faq {
                question: "Why did my GST filing fail?".to_string(),
                answer: "Missing GSTIN".to_string(),
            },
            Faq {
                question: "What is ITC?".to_string(),
                answer: "Input Tax Credit".to_string(),
            },
        ]
    }

    #[test]
    fn test_exact_substring_match() {
        let faqs = faqs();
        let hit = match_faq("why did my GST filing fail?", &faqs).unwrap();
        assert_eq!(hit.answer, "Missing GSTIN");
    }

    #[test]
    fn test_match_without_question_mark() {
        let faqs = faqs();
        assert!(match_faq("so what is itc", &faqs).is_some());
    }

    #[test]
    fn test_no_partial_match() {
        let faqs = faqs();
        assert!(match_faq("why did my filing fail", &faqs).is_none());
    }

    #[test]
    fn test_interrogative_detection() {
        assert!(is_interrogative("Why did my GST filing fail"));
        assert!(is_interrogative("ITC?"));
        assert!(is_interrogative("please tell me about GSTR-2A"));
        assert!(!is_interrogative("filter invoices from IndiSky"));
        assert!(!is_interrogative("somewhat whatever"));
    }
}
