use std::fs;

use bytes::Bytes;
use recwire_frame::Frame;
use recwire_records::{hex, lookup};
use tracing::debug;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, record_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.framed && args.reserved != 0 {
        return Err(CliError::new(
            USAGE,
            "--framed reserves its own header; drop --reserved",
        ));
    }

    let kind = lookup(&args.record).map_err(|err| record_error("decode failed", err))?;
    let buf = resolve_input(&args)?;
    debug!(record = kind.name, size = buf.len(), framed = args.framed, "decoding record");

    let value = if args.framed {
        let frame = Frame::from_wire(Bytes::from(buf))
            .map_err(|err| frame_error("decode failed", err))?;
        kind.unframe_json(&frame)
    } else {
        kind.decode_json(&buf, args.reserved)
    }
    .map_err(|err| record_error("decode failed", err))?;

    print_decoded(kind.name, &value, format);
    Ok(SUCCESS)
}

fn resolve_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    match (&args.hex, &args.file) {
        (Some(text), _) => hex::decode(text).map_err(|err| record_error("bad --hex", err)),
        (None, Some(path)) => fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        (None, None) => Err(CliError::new(USAGE, "one of --hex or --file is required")),
    }
}
