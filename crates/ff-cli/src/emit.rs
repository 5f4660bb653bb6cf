use std::path::Path;

use crate::error_map::json_string;

pub(crate) fn success_lines(
    title: &str,
    diagram_text: &str,
    written_to: Option<&Path>,
) -> Vec<String> {
    let mut lines = vec![
        "RESULT:OK".to_string(),
        format!("TITLE_JSON:{}", json_string(title)),
    ];
    match written_to {
        Some(path) => lines.push(format!("DIAGRAM_OUT:{}", path.display())),
        None => lines.push(format!("DIAGRAM_JSON:{}", json_string(diagram_text))),
    }
    lines
}

pub(crate) fn emit_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
