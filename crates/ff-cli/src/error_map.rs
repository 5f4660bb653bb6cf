use ff_core::FormFlowError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> FormFlowError {
    FormFlowError::new(code, error.to_string())
}

pub(crate) fn error_lines(error: &FormFlowError) -> Vec<String> {
    vec![
        "RESULT:ERROR".to_string(),
        format!("ERROR_CODE:{}", error.code),
        format!("ERROR_MSG_JSON:{}", json_string(&error.message)),
    ]
}

pub(crate) fn emit_error(error: FormFlowError) -> i32 {
    for line in error_lines(&error) {
        println!("{}", line);
    }
    1
}

pub(crate) fn json_string(value: &str) -> String {
    serde_json::to_string(value).expect("string json")
}

pub(crate) fn map_cli_snapshot_read(error: std::io::Error) -> FormFlowError {
    map_error("CLI_SNAPSHOT_READ", error)
}

pub(crate) fn map_cli_snapshot_path(error: std::io::Error) -> FormFlowError {
    map_error("CLI_SNAPSHOT_PATH", error)
}

pub(crate) fn map_cli_snapshot_scan(error: std::path::StripPrefixError) -> FormFlowError {
    map_error("CLI_SNAPSHOT_SCAN", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> FormFlowError {
    map_error("CLI_OUTPUT_WRITE", error)
}

pub(crate) fn map_cli_config_read(error: std::io::Error) -> FormFlowError {
    map_error("CLI_CONFIG_READ", error)
}

pub(crate) fn map_cli_config_invalid(error: toml::de::Error) -> FormFlowError {
    map_error("CLI_CONFIG_INVALID", error)
}

pub(crate) fn map_cli_result_json(error: serde_json::Error) -> FormFlowError {
    map_error("CLI_RESULT_JSON", error)
}
