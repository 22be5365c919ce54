use super::{core_err, parse_args, to_text_result, JsonRpcError};
use devtools_core::color::DEFAULT_PALETTE_COUNT;
use serde::Deserialize;

pub async fn handle_color_convert(
    arguments: Option<serde_json::Value>,
    _global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        color: String,
    }

    let args: Args = parse_args(arguments)?;
    let conversion = devtools_core::convert_color(&args.color).map_err(core_err)?;

    to_text_result(&conversion)
}

pub async fn handle_color_palette(
    arguments: Option<serde_json::Value>,
    _global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct Args {
        #[serde(rename = "baseColor", alias = "base_color")]
        base_color: String,
        count: Option<usize>,
    }

    let args: Args = parse_args(arguments)?;
    let palette = devtools_core::generate_palette(
        &args.base_color,
        args.count.unwrap_or(DEFAULT_PALETTE_COUNT),
    )
    .map_err(core_err)?;

    to_text_result(&palette)
}
