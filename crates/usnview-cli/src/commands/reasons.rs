//! Registry commands: reasons, categories, describe.

use serde_json::json;
use usnview_journal::{categories, categories_of, describe_reason, format, known_reasons};

#[allow(clippy::print_literal)]
pub fn run_reasons(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        let reasons: Vec<_> = known_reasons()
            .map(|(code, description)| {
                json!({
                    "code": format!("{:#010x}", code),
                    "description": description,
                    "categories": categories_of(code),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reasons)?);
        return Ok(());
    }

    println!("{:<12} {}", "CODE", "DESCRIPTION");
    println!("{}", "-".repeat(100));
    for (code, description) in known_reasons() {
        println!("{:<12} {}", format!("{:#010x}", code), description);
    }
    Ok(())
}

pub fn run_categories(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        let cats: Vec<_> = categories()
            .iter()
            .map(|c| {
                json!({
                    "name": c.name,
                    "codes": c.codes.iter().map(|code| format!("{:#010x}", code)).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&cats)?);
        return Ok(());
    }

    for category in categories() {
        let codes: Vec<_> = category
            .codes
            .iter()
            .map(|code| format!("{:#010x}", code))
            .collect();
        println!("{:<18} {}", category.name, codes.join(" "));
    }
    Ok(())
}

pub fn run_describe(code: String) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = format::parse_reason_code(code.trim())
        .ok_or_else(|| format!("Invalid reason code {:?}: expected a 32-bit hex value", code))?;

    println!("{:#010x}: {}", parsed, describe_reason(parsed));
    let cats = categories_of(parsed);
    if !cats.is_empty() {
        println!("categories: {}", cats.join(", "));
    }
    Ok(())
}
