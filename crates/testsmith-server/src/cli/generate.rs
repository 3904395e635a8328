// crates/testsmith-server/src/cli/generate.rs
// One-shot generation and prompt preview from the command line

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use testsmith_types::{GenerationRequest, ModelConfigOverrides};

use super::context::setup_generator;
use super::{GenerateArgs, TargetArgs};

/// Read source code from a file, or stdin when no file is given
fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("Failed to read source from stdin")?;
            Ok(code)
        }
    }
}

/// Collect model flags; `None` when no flag was given
fn overrides(args: &GenerateArgs) -> Option<ModelConfigOverrides> {
    let overrides = ModelConfigOverrides {
        model: args.model.clone(),
        temperature: args.temperature,
        max_tokens: args.max_tokens,
        top_p: args.top_p,
        stream: None,
    };
    (overrides != ModelConfigOverrides::default()).then_some(overrides)
}

pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let code = read_source(args.target.file.as_deref())?;
    let (generator, _) = setup_generator()?;

    let request = GenerationRequest {
        code,
        language: args.target.language,
        framework: args.target.framework,
        model_config: overrides(&args),
    };

    let result = generator.generate(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.test_code);
        eprintln!(
            "{} test(s) from {} in {} ms",
            result.metadata.test_count, result.model_name, result.metadata.execution_time_ms
        );
    }

    Ok(())
}

pub async fn run_prompt(args: TargetArgs) -> Result<()> {
    let code = read_source(args.file.as_deref())?;
    let (generator, _) = setup_generator()?;

    println!("{}", generator.preview_prompt(&code, args.language, args.framework));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use testsmith_types::{Framework, Language};

    fn args() -> GenerateArgs {
        GenerateArgs {
            target: TargetArgs {
                language: Language::Python,
                framework: Framework::Pytest,
                file: None,
            },
            model: None,
            temperature: None,
            max_tokens: None,
            top_p: None,
            json: false,
        }
    }

    #[test]
    fn test_no_flags_means_no_overrides() {
        assert!(overrides(&args()).is_none());
    }

    #[test]
    fn test_flags_become_overrides() {
        let mut a = args();
        a.model = Some("llama3".to_string());
        a.top_p = Some(0.5);
        let o = overrides(&a).unwrap();
        assert_eq!(o.model.as_deref(), Some("llama3"));
        assert_eq!(o.top_p, Some(0.5));
        assert!(o.temperature.is_none());
        assert!(o.stream.is_none());
    }

    #[test]
    fn test_read_source_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "def add(a, b):\n    return a + b\n").unwrap();
        let code = read_source(Some(file.path())).unwrap();
        assert!(code.starts_with("def add"));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Some(&PathBuf::from("/nonexistent/testsmith/src.py"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
