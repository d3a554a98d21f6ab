use recwire_records::{RecordKind, RECORDS};

use crate::cmd::ListArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_kinds, OutputFormat};

pub fn run(args: ListArgs, format: OutputFormat) -> CliResult<i32> {
    let kinds = select(args.domain.as_deref())?;
    print_kinds(&kinds, format);
    Ok(SUCCESS)
}

fn select(domain: Option<&str>) -> CliResult<Vec<RecordKind>> {
    let kinds: Vec<RecordKind> = RECORDS
        .iter()
        .filter(|kind| domain.is_none_or(|domain| kind.domain == domain))
        .copied()
        .collect();

    if kinds.is_empty() {
        if let Some(domain) = domain {
            return Err(CliError::new(USAGE, format!("unknown domain: {domain}")));
        }
    }
    Ok(kinds)
}
