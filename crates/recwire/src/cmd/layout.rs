use recwire_records::lookup;

use crate::cmd::LayoutArgs;
use crate::exit::{record_error, CliResult, SUCCESS};
use crate::output::{print_plan, OutputFormat};

pub fn run(args: LayoutArgs, format: OutputFormat) -> CliResult<i32> {
    let kind = lookup(&args.record).map_err(|err| record_error("layout failed", err))?;
    print_plan(kind, &kind.plan(), format);
    Ok(SUCCESS)
}
