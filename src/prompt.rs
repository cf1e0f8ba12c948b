// prompt.rs

use std::collections::HashMap;

/// Instruction template for the researcher. Variable: `{topic}`.
pub const RESEARCHER: &str = "\
You are a technology researcher. Gather objective, current information about the requested topic.

TOPIC: {topic}

Provide:
1. Definition and context of the topic (2 paragraphs)
2. Relevant data and statistics (3-5 points)
3. Current practical applications
4. Recent trends and developments
5. Notable companies or projects

Be objective, concise and precise. Focus on verifiable facts.
";

/// Instruction template for the writer. Variable: `{research}`.
pub const WRITER: &str = "\
You are a technical writer. Write a clear, objective blog article based on the provided research.

RESEARCH NOTES:
{research}

STRUCTURE:
1. Descriptive title
2. Introduction (2 paragraphs): what it is and why it matters
3. Section 1: Fundamentals and context
4. Section 2: Applications and use cases
5. Section 3: Current state and trends
6. Conclusion: summary and outlook

STYLE:
- Professional, informative tone
- Short, direct paragraphs
- Focus on facts and data
- Avoid promotional or speculative language
- 700-900 words

Produce the complete article draft.
";

/// Instruction template for the editor. Variable: `{draft}`.
pub const EDITOR: &str = "\
You are a professional editor. Review and improve the draft to produce the final version.

DRAFT:
{draft}

TASKS:
1. Fix spelling and grammar errors
2. Improve clarity and coherence
3. Check structure and flow
4. Tighten titles and subtitles
5. Keep a consistent professional tone

IMPORTANT: Output ONLY the corrected, final article. No notes, no change
summaries, no suggestions. Just the article, ready to publish.
";

/// Substitutes each `{name}` placeholder in `template` with its value from
/// `vars`. Unknown placeholders are left in place.
pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (name, value) in vars {
        rendered = rendered.replace(&format!("{{{}}}", name), value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholder() {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), "Quantum Computing".to_string());

        let rendered = render(RESEARCHER, &vars);
        assert!(rendered.contains("TOPIC: Quantum Computing"));
        assert!(!rendered.contains("{topic}"));
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let mut vars = HashMap::new();
        vars.insert("other".to_string(), "x".to_string());

        let rendered = render("a {topic} b", &vars);
        assert_eq!(rendered, "a {topic} b");
    }
}
