use super::{core_err, parse_args, to_text_result, JsonRpcError};
use devtools_core::password::PasswordOptions;
use serde::Deserialize;

pub async fn handle_password_check(
    arguments: Option<serde_json::Value>,
    _global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        password: String,
    }

    let args: Args = parse_args(arguments)?;
    let analysis = devtools_core::check_password_strength(&args.password).map_err(core_err)?;

    to_text_result(&analysis)
}

pub async fn handle_password_generate(
    arguments: Option<serde_json::Value>,
    _global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    // Missing arguments mean "all defaults".
    let options: PasswordOptions =
        parse_args(Some(arguments.unwrap_or_else(|| serde_json::json!({}))))?;
    log::debug!("password_generate: length={}", options.length);

    let generated = devtools_core::generate_password(&options).map_err(core_err)?;

    to_text_result(&generated)
}
