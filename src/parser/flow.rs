//! Flow line extraction for diagram sections.

/// Arrow token connecting two flow steps.
pub const ARROW: &str = "->";

/// Line prefixes that label a diagram rather than describe it.
const LABEL_PREFIXES: [&str; 4] = ["diagram", "flow", "legend", "#"];

/// Find the flow description in a diagram section.
///
/// Lines are stripped of surrounding backticks and whitespace. The first line
/// that contains an arrow with a step before it, and does not start with a
/// label word, wins.
///
/// # Example
///
/// ```
/// use techspec::parser::extract_flow_line;
///
/// let text = "Some text\n-> not a diagram\nStep1 -> Step2 -> Step3\nDiagram: legend";
/// assert_eq!(extract_flow_line(text), Some("Step1 -> Step2 -> Step3"));
/// ```
pub fn extract_flow_line(text: &str) -> Option<&str> {
    text.lines()
        .map(|line| line.trim_matches(|c: char| c == '`' || c.is_whitespace()))
        .find(|line| is_flow_line(line))
}

fn is_flow_line(line: &str) -> bool {
    let Some(arrow) = line.find(ARROW) else {
        return false;
    };
    if line[..arrow].trim().is_empty() {
        return false;
    }
    let lower = line.to_lowercase();
    !LABEL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Split a flow line into its trimmed, non-empty steps.
///
/// ```
/// use techspec::parser::flow_nodes;
///
/// assert_eq!(flow_nodes("A -> B ->  C"), vec!["A", "B", "C"]);
/// ```
pub fn flow_nodes(flow: &str) -> Vec<&str> {
    flow.split(ARROW)
        .map(str::trim)
        .filter(|node| !node.is_empty())
        .collect()
}
