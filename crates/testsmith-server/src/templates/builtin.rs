// crates/testsmith-server/src/templates/builtin.rs
// Built-in prompt templates registered at startup

use testsmith_types::{Framework, Language, PromptTemplate};

const JEST_EXAMPLE: &str = r#"Example:
Input: function add(a, b) { return a + b; }
Output:
```javascript
describe('add', () => {
  test('should add two positive numbers', () => {
    expect(add(2, 3)).toBe(5);
  });

  test('should add negative numbers', () => {
    expect(add(-1, -2)).toBe(-3);
  });

  test('should handle zero', () => {
    expect(add(0, 5)).toBe(5);
    expect(add(5, 0)).toBe(5);
  });
});
```"#;

const PYTEST_EXAMPLE: &str = r#"Example:
Input: def divide(a, b): return a / b
Output:
```python
import pytest

def test_divide_positive_numbers():
    assert divide(10, 2) == 5

def test_divide_negative_numbers():
    assert divide(-10, 2) == -5

def test_divide_by_zero_raises_error():
    with pytest.raises(ZeroDivisionError):
        divide(10, 0)
```"#;

const GO_TEST_EXAMPLE: &str = r#"Example:
Input: func Abs(x int) int { if x < 0 { return -x }; return x }
Output:
```go
package mathx

import "testing"

func TestAbs(t *testing.T) {
	cases := []struct{ in, want int }{{-2, 2}, {0, 0}, {3, 3}}
	for _, c := range cases {
		if got := Abs(c.in); got != c.want {
			t.Errorf("Abs(%d) = %d, want %d", c.in, got, c.want)
		}
	}
}
```"#;

const RUST_TEST_EXAMPLE: &str = r#"Example:
Input: pub fn clamp(v: i32, lo: i32, hi: i32) -> i32 { v.max(lo).min(hi) }
Output:
```rust
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_within_range() {
        assert_eq!(clamp(5, 0, 10), 5);
    }

    #[test]
    fn test_clamp_below_range() {
        assert_eq!(clamp(-3, 0, 10), 0);
    }
}
```"#;

fn reqs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Every built-in (language, framework, template) triple
pub fn all() -> Vec<(Language, Framework, PromptTemplate)> {
    vec![
        (
            Language::JavaScript,
            Framework::Jest,
            PromptTemplate {
                instruction: "Generate comprehensive Jest unit tests for the following JavaScript function.".into(),
                examples: Some(JEST_EXAMPLE.into()),
                requirements: reqs(&[
                    "Use Jest syntax (describe, test, expect)",
                    "Test happy path scenarios",
                    "Test edge cases and boundary conditions",
                    "Test error scenarios where applicable",
                    "Use descriptive test names",
                    "Include setup/teardown if needed",
                ]),
            },
        ),
        (
            Language::Python,
            Framework::Pytest,
            PromptTemplate {
                instruction: "Generate comprehensive pytest unit tests for the following Python function.".into(),
                examples: Some(PYTEST_EXAMPLE.into()),
                requirements: reqs(&[
                    "Use pytest syntax and conventions",
                    "Test normal functionality",
                    "Test edge cases and error conditions",
                    "Use pytest.raises for exception testing",
                    "Use fixtures when appropriate",
                    "Follow Python naming conventions",
                ]),
            },
        ),
        (
            Language::TypeScript,
            Framework::Jest,
            PromptTemplate {
                instruction: "Generate comprehensive Jest unit tests for the following TypeScript function.".into(),
                examples: None,
                requirements: reqs(&[
                    "Use TypeScript and Jest syntax",
                    "Include proper type annotations",
                    "Test all code paths",
                    "Mock dependencies when needed",
                    "Use describe and test blocks",
                    "Test error conditions",
                ]),
            },
        ),
        (
            Language::Java,
            Framework::Junit,
            PromptTemplate {
                instruction: "Generate comprehensive JUnit 5 tests for the following Java method.".into(),
                examples: None,
                requirements: reqs(&[
                    "Use JUnit 5 annotations (@Test, @BeforeEach, etc.)",
                    "Use Assertions class for assertions",
                    "Test normal and exceptional cases",
                    "Use @DisplayName for readable test names",
                    "Mock dependencies with Mockito if needed",
                    "Follow Java naming conventions",
                ]),
            },
        ),
        (
            Language::JavaScript,
            Framework::Mocha,
            PromptTemplate {
                instruction: "Generate comprehensive Mocha unit tests for the following JavaScript function.".into(),
                examples: None,
                requirements: reqs(&[
                    "Use Mocha syntax (describe, it) with Chai assertions",
                    "Test happy path scenarios",
                    "Test edge cases and boundary conditions",
                    "Test error scenarios where applicable",
                    "Use beforeEach/afterEach for shared setup",
                ]),
            },
        ),
        (
            Language::TypeScript,
            Framework::Vitest,
            PromptTemplate {
                instruction: "Generate comprehensive Vitest unit tests for the following TypeScript function.".into(),
                examples: None,
                requirements: reqs(&[
                    "Import describe, it, expect and vi from 'vitest'",
                    "Include proper type annotations",
                    "Test all code paths",
                    "Use vi.fn() and vi.mock() for dependencies",
                    "Test error conditions",
                ]),
            },
        ),
        (
            Language::CSharp,
            Framework::Nunit,
            PromptTemplate {
                instruction: "Generate comprehensive NUnit tests for the following C# method.".into(),
                examples: None,
                requirements: reqs(&[
                    "Use [TestFixture] and [Test] attributes",
                    "Use Assert.That with constraint syntax",
                    "Use [TestCase] for parameterized inputs",
                    "Test normal and exceptional cases with Assert.Throws",
                    "Follow C# naming conventions",
                ]),
            },
        ),
        (
            Language::Cpp,
            Framework::Gtest,
            PromptTemplate {
                instruction: "Generate comprehensive GoogleTest unit tests for the following C++ function.".into(),
                examples: None,
                requirements: reqs(&[
                    "Include <gtest/gtest.h>",
                    "Use TEST() macros with descriptive suite and test names",
                    "Use EXPECT_* for non-fatal and ASSERT_* for fatal checks",
                    "Test boundary values and invalid inputs",
                    "Use EXPECT_THROW for exception paths",
                ]),
            },
        ),
        (
            Language::Go,
            Framework::GoTest,
            PromptTemplate {
                instruction: "Generate comprehensive Go tests using the testing package for the following Go function.".into(),
                examples: Some(GO_TEST_EXAMPLE.into()),
                requirements: reqs(&[
                    "Use func TestXxx(t *testing.T) signatures",
                    "Prefer table-driven tests",
                    "Use t.Run for subtests",
                    "Test error returns explicitly",
                    "Keep the package clause consistent with the code",
                ]),
            },
        ),
        (
            Language::Rust,
            Framework::RustTest,
            PromptTemplate {
                instruction: "Generate comprehensive Rust unit tests for the following Rust function.".into(),
                examples: Some(RUST_TEST_EXAMPLE.into()),
                requirements: reqs(&[
                    "Place tests in a #[cfg(test)] mod tests block",
                    "Use #[test] functions named test_*",
                    "Use assert!, assert_eq! and assert_ne!",
                    "Use #[should_panic] for panicking paths",
                    "Test Result-returning functions on both Ok and Err",
                ]),
            },
        ),
    ]
}
