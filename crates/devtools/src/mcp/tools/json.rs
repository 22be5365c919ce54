use super::{core_err, parse_args, to_text_result, JsonRpcError};
use serde::Deserialize;

pub async fn handle_json_validate(
    arguments: Option<serde_json::Value>,
    _global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        #[serde(rename = "jsonString", alias = "json_string")]
        json_string: String,
    }

    let args: Args = parse_args(arguments)?;

    to_text_result(&devtools_core::validate_json(&args.json_string))
}

pub async fn handle_json_diff(
    arguments: Option<serde_json::Value>,
    _global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        json1: String,
        json2: String,
    }

    let args: Args = parse_args(arguments)?;
    let diff = devtools_core::diff_json(&args.json1, &args.json2).map_err(core_err)?;

    to_text_result(&diff)
}
