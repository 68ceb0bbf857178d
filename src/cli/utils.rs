use serde_json::{json, Value};
use crate::cli::OutputFormat;
use crate::models::{Board, Container, Task};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            // Text errors are printed by the binary on exit
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output a value as JSON, or let the caller render text
pub fn output_value<F>(output_format: &OutputFormat, value: Value, render_text: F) -> anyhow::Result<()>
where
    F: FnOnce(),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => render_text(),
    }
    Ok(())
}

pub fn board_line(board: &Board, selected: bool) -> String {
    let marker = if selected { "*" } else { " " };
    match &board.background {
        Some(bg) if !bg.is_empty() => format!("{} {:>5}  {}  [{}]", marker, board.id, board.title, bg),
        _ => format!("{} {:>5}  {}", marker, board.id, board.title),
    }
}

pub fn container_line(container: &Container, task_count: usize) -> String {
    format!("{:>5}  {} ({} tasks)", container.id, container.title, task_count)
}

pub fn task_line(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    if task.description.is_empty() {
        format!("{:>5}  {} {}", task.id, check, task.title)
    } else {
        format!("{:>5}  {} {} - {}", task.id, check, task.title, task.description)
    }
}
