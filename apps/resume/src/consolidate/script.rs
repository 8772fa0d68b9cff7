//! Rewrites the browser script so it reads the embedded YAML instead of fetching it.

use once_cell::sync::Lazy;
use regex::Regex;

static GLOBAL_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A// Store the original YAML text globally\s*\nlet originalYamlText = '';?\s*\n+")
        .expect("valid regex")
});

static FETCH_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)([ \t]*)// Fetch the YAML file\s*\n\s*const response = await fetch\('resume\.yml'\);.*?\n.*?let yamlText = await response\.text\(\);",
    )
    .expect("valid regex")
});

static ORIGINAL_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s+// Store original YAML text\s*\n\s+originalYamlText = yamlText;")
        .expect("valid regex")
});

static LOCAL_SERVER_HELP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)<p>Make sure you're running a local server:</p>\s*\n\s*<p><strong>VSCode:</strong>.*?</p>\s*\n\s*<p><strong>Command line:</strong>.*?</p>\s*\n\s*<p>Then open:.*?</p>",
    )
    .expect("valid regex")
});

/// Escapes text for a JavaScript template literal: backslashes first, then backticks,
/// then `${` placeholders.
pub fn escape_for_js_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Embeds `yaml` into `script` as a `YAML_DATA` constant and removes the fetch logic.
pub fn embed_yaml(script: &str, yaml: &str) -> String {
    let script = GLOBAL_DECLARATION.replace(script, "");
    let script = FETCH_BLOCK.replace_all(&script, "${1}let yamlText = YAML_DATA;");
    let script = ORIGINAL_ASSIGNMENT.replace_all(&script, "");
    let script = LOCAL_SERVER_HELP.replace_all(&script, "");

    format!(
        "// YAML data embedded inline\nconst YAML_DATA = `{}`;\n\n// Store the original YAML text globally\nlet originalYamlText = YAML_DATA;\n\n{script}",
        escape_for_js_template_literal(yaml)
    )
}
