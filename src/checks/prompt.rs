//! Prompt template for the heuristic judgment

/// Few-shot examples: (url, expected status, why)
pub const FEW_SHOT_EXAMPLES: [(&str, &str, &str); 3] = [
    (
        "http://g00gle.com/login",
        "DANGEROUS",
        "it uses the digit '0' to imitate the letter 'o'",
    ),
    (
        "https://secure-login-facebook.com-update.xyz/signin",
        "DANGEROUS",
        "it layers subdomains to pass itself off as a trusted brand",
    ),
    (
        "https://github.com/google/generative-ai-js",
        "SAFE",
        "it is a legitimate URL on a trusted domain",
    ),
];

/// Render the classification prompt for `url`
pub fn build_prompt(url: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Analyze the following URL and decide whether it is likely to be phishing or otherwise malicious.\n",
    );
    prompt.push_str(&format!("URL: {}\n\n", quote(url)));

    prompt.push_str(
        r#"Answer with a single JSON object and nothing else, using exactly this structure:
{
  "status": "SAFE" | "SUSPICIOUS" | "DANGEROUS",
  "reason": "Briefly explain your reasoning. Focus on URL patterns such as odd or deeply nested subdomains, domain names imitating well-known brands, or unusual character substitutions."
}

Example analyses:
"#,
    );

    for (example_url, status, why) in FEW_SHOT_EXAMPLES {
        prompt.push_str(&format!(
            "- If the URL is \"{}\", the status is \"{}\" because {}.\n",
            example_url, status, why
        ));
    }

    prompt.push_str("\nNow analyze the given URL.\n");
    prompt
}

/// Embed user input as a JSON string literal so quotes and newlines in the
/// URL cannot break out of the template
fn quote(url: &str) -> String {
    serde_json::Value::String(url.to_string()).to_string()
}
