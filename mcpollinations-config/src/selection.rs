//! Allow-list selection from text input.

use mcpollinations::TOOL_NAMES;

/// Parse `"all"` or comma separated 1-based tool numbers into tool names.
///
/// Entries that are not numbers or fall outside the tool list are ignored.
pub fn parse_tool_selection(input: &str) -> Vec<String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return TOOL_NAMES.iter().map(|t| t.to_string()).collect();
    }

    input
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter_map(|index| TOOL_NAMES.get(index))
        .map(|t| t.to_string())
        .collect()
}
