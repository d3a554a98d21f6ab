use std::fs;

use recwire_frame::HEADER_SIZE;
use recwire_records::{hex, lookup};
use serde_json::Value;
use tracing::debug;

use crate::cmd::EncodeArgs;
use crate::exit::{io_error, record_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_encoded, EncodedOutput, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.framed && args.reserved != 0 {
        return Err(CliError::new(
            USAGE,
            "--framed reserves its own header; drop --reserved",
        ));
    }

    let kind = lookup(&args.record).map_err(|err| record_error("encode failed", err))?;
    let value = resolve_json(&args)?;

    let (bytes, reserved) = if args.framed {
        let frame = kind
            .frame_json(&value)
            .map_err(|err| record_error("encode failed", err))?;
        (frame.into_bytes().to_vec(), HEADER_SIZE as u32)
    } else {
        let bytes = kind
            .encode_json(&value, args.reserved)
            .map_err(|err| record_error("encode failed", err))?;
        (bytes, args.reserved)
    };
    debug!(record = kind.name, size = bytes.len(), reserved, "encoded record");

    let out = match &args.out {
        Some(path) => {
            fs::write(path, &bytes).map_err(|err| {
                io_error(&format!("failed writing {}", path.display()), err)
            })?;
            EncodedOutput {
                record: kind.name,
                size: bytes.len(),
                reserved,
                framed: args.framed,
                hex: None,
                out: Some(path.display().to_string()),
            }
        }
        None => EncodedOutput {
            record: kind.name,
            size: bytes.len(),
            reserved,
            framed: args.framed,
            hex: Some(hex::encode(&bytes)),
            out: None,
        },
    };
    print_encoded(&out, format);

    Ok(SUCCESS)
}

fn resolve_json(args: &EncodeArgs) -> CliResult<Value> {
    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|err| {
            io_error(&format!("failed reading {}", path.display()), err)
        })?,
        (None, None) => return Err(CliError::new(USAGE, "one of --json or --file is required")),
    };

    serde_json::from_str(&text)
        .map_err(|err| CliError::new(USAGE, format!("input is not valid JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(json: Option<&str>) -> EncodeArgs {
        EncodeArgs {
            record: "money".into(),
            json: json.map(str::to_string),
            file: None,
            framed: false,
            reserved: 0,
            out: None,
        }
    }

    #[test]
    fn resolve_json_requires_input() {
        let err = resolve_json(&args(None)).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn resolve_json_rejects_malformed_text() {
        let err = resolve_json(&args(Some("{not json"))).unwrap_err();
        assert_eq!(err.code, USAGE);
        assert!(err.message.contains("not valid JSON"));
    }

    #[test]
    fn framed_with_reserved_is_usage() {
        let mut args = args(Some("{}"));
        args.framed = true;
        args.reserved = 8;
        let err = run(args, OutputFormat::Json).unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
