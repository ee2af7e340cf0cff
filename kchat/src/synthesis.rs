//! Model-facing text assembled by the turn loop.

use ktooling::{ToolResult, ToolSpec};

/// Builds the system message that reports tool results back to the model.
///
/// ```rust
/// use kchat::results_message;
/// use ktooling::ToolResult;
///
/// let text = results_message("Use these:", &[ToolResult::ok("add", "5.0")]);
/// assert_eq!(text, "Use these:\nTool add, response: 5.0");
/// ```
pub fn results_message(preamble: &str, results: &[ToolResult]) -> String {
    std::iter::once(preamble.to_string())
        .chain(results.iter().map(ToolResult::render))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Probe instructions: the preamble plus one catalogue line per tool.
pub fn probe_instructions(preamble: &str, specs: &[ToolSpec]) -> String {
    let mut text = preamble.to_string();
    for spec in specs {
        text.push_str(&format!(
            "\n - {}: {}. Use '[{}]'",
            spec.name,
            spec.description,
            spec.example_directive()
        ));
    }
    text
}

/// The user text with probe instructions attached, separated by a blank line.
pub fn probe_prompt(user_text: &str, instructions: &str) -> String {
    format!("{user_text}\n\n{instructions}")
}

#[cfg(test)]
mod tests {
    use ktooling::ParamType;

    use super::*;

    #[test]
    fn results_keep_call_order_including_errors() {
        let text = results_message(
            "Use the results of these tools to answer the following user message:",
            &[
                ToolResult::ok("add", "5.0"),
                ToolResult::error("foo", "Error: unknown tool 'foo'"),
            ],
        );

        assert_eq!(
            text,
            "Use the results of these tools to answer the following user message:\n\
             Tool add, response: 5.0\n\
             Tool foo, response: Error: unknown tool 'foo'"
        );
    }

    #[test]
    fn probe_lists_every_tool_with_an_example() {
        let specs = vec![
            ToolSpec::new("add", "Adds two numbers")
                .param("a", ParamType::Float)
                .param("b", ParamType::Float),
            ToolSpec::new("get_current_time", "Reports the current local time"),
        ];

        let instructions = probe_instructions("Tools:", &specs);
        let lines: Vec<&str> = instructions.lines().collect();

        assert_eq!(lines[0], "Tools:");
        assert_eq!(
            lines[1],
            r#" - add: Adds two numbers. Use '[{"name":"add","params":{"a":<number>,"b":<number>}}]'"#
        );
        assert!(lines[2].starts_with(" - get_current_time:"));
        assert_eq!(probe_prompt("hi", "Tools:"), "hi\n\nTools:");
    }
}
