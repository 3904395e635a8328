// crates/testsmith-server/src/prompt.rs
// Prompt compilation: template + user code -> single completion prompt

use testsmith_types::{Framework, Language, PromptTemplate};

use crate::templates::TemplateRegistry;

/// Closing instruction appended to every prompt.
///
/// First line of defense against prose-wrapped replies; the normalizer only
/// cleans up what slips past it. Do not reword casually.
pub const CLOSING_INSTRUCTION: &str = "Generate ONLY the test code without explanations or markdown formatting. The response should be clean, executable test code.";

/// Render a template and the user's code into one prompt.
///
/// Layout: instruction, optional worked example, fenced code labeled with the
/// language, bulleted requirements, closing instruction. The code is inserted
/// verbatim as one contiguous block.
pub fn compile(template: &PromptTemplate, code: &str, language: Language) -> String {
    let mut prompt = String::with_capacity(
        template.instruction.len()
            + template.examples.as_ref().map_or(0, |e| e.len())
            + code.len()
            + 512,
    );

    prompt.push_str(template.instruction.trim());
    prompt.push_str("\n\n");

    if let Some(examples) = template.examples.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        prompt.push_str(examples);
        prompt.push_str("\n\n");
    }

    prompt.push_str("```");
    prompt.push_str(language.as_str());
    prompt.push('\n');
    prompt.push_str(code);
    prompt.push_str("\n```\n\n");

    prompt.push_str("Requirements:\n");
    for requirement in &template.requirements {
        prompt.push_str("- ");
        prompt.push_str(requirement);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}

/// Resolve the template for a pair and compile it
pub fn compile_for(
    registry: &TemplateRegistry,
    code: &str,
    language: Language,
    framework: Framework,
) -> String {
    let template = registry.resolve(language, framework);
    compile(&template, code, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::generic_template;

    fn template_with_example() -> PromptTemplate {
        PromptTemplate {
            instruction: "Write Jest tests.".to_string(),
            examples: Some("Example:\nInput: f\nOutput: g".to_string()),
            requirements: vec!["First".to_string(), "Second".to_string()],
        }
    }

    #[test]
    fn test_compile_layout_order() {
        let prompt = compile(&template_with_example(), "function f() {}", Language::JavaScript);

        let instruction = prompt.find("Write Jest tests.").unwrap();
        let example = prompt.find("Example:").unwrap();
        let code = prompt.find("```javascript\nfunction f() {}\n```").unwrap();
        let requirements = prompt.find("Requirements:\n- First\n- Second\n").unwrap();
        let closing = prompt.find(CLOSING_INSTRUCTION).unwrap();

        assert!(instruction < example);
        assert!(example < code);
        assert!(code < requirements);
        assert!(requirements < closing);
        assert!(prompt.ends_with(CLOSING_INSTRUCTION));
    }

    #[test]
    fn test_compile_without_example() {
        let template = generic_template(Language::Go, Framework::GoTest);
        let prompt = compile(&template, "func Add(a, b int) int { return a + b }", Language::Go);
        assert!(!prompt.contains("Example:"));
        assert!(prompt.starts_with(
            "Generate comprehensive unit tests for the following go code using go-test.\n\n```go\n"
        ));
    }

    #[test]
    fn test_compile_contains_code_verbatim() {
        let code = "def f(x):\n    # ``` tricky fence in a comment\n    return {'a': x}\n";
        let template = generic_template(Language::Python, Framework::Pytest);
        let prompt = compile(&template, code, Language::Python);
        assert!(prompt.contains(code));
    }

    #[test]
    fn test_compile_bullets_every_requirement() {
        let template = generic_template(Language::Rust, Framework::RustTest);
        let prompt = compile(&template, "fn x() {}", Language::Rust);
        for requirement in &template.requirements {
            assert!(prompt.contains(&format!("- {}\n", requirement)));
        }
    }

    #[test]
    fn test_blank_example_is_skipped() {
        let template = PromptTemplate {
            instruction: "Do it.".to_string(),
            examples: Some("   ".to_string()),
            requirements: vec![],
        };
        let prompt = compile(&template, "x", Language::Cpp);
        assert!(prompt.starts_with("Do it.\n\n```cpp\nx\n```\n\nRequirements:\n\n"));
    }

    #[test]
    fn test_compile_for_uses_registered_template() {
        let registry = TemplateRegistry::with_builtins();
        let prompt = compile_for(&registry, "def f(): pass", Language::Python, Framework::Pytest);
        assert!(prompt.starts_with("Generate comprehensive pytest unit tests"));
        assert!(prompt.contains("pytest.raises"));
        assert!(prompt.contains("```python\ndef f(): pass\n```"));
    }
}
