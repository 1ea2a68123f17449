//! CLI surface: request-item classification, field building, request
//! assembly, method dispatch, and print-mask output.
//!
//! [`run`] is the whole invocation minus process concerns: the binary hands
//! it parsed arguments, an executor, and an output sink, and gets back the
//! response status code for the exit status.

pub mod assemble;
pub mod builder;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod request_item;

pub use assemble::RequestDescriptor;
pub use builder::BodyMode;
pub use cli::Args;
pub use error::CliError;
pub use output::PrintMask;
pub use request_item::RequestItem;

use ajpq::RequestExecutor;
use std::io::Write;

/// Builds the request from the arguments, dispatches it once, and renders
/// the selected output sections. All parse failures happen before the
/// executor is called.
pub fn run(
    args: &Args,
    executor: &mut impl RequestExecutor,
    out: &mut impl Write,
) -> Result<u16, CliError> {
    let mode = BodyMode::from_flags(args.form, args.json)?;
    let target = cli::parse_target(&args.url)?;
    let items = request_item::classify(&args.request_items)?;
    let descriptor = assemble::assemble(&args.method, &args.url, target, &items, mode);

    let response = dispatch::dispatch(&descriptor, executor)?;

    let mask = PrintMask::resolve(args.print.as_deref(), args.verbose);
    output::render(&mask, &descriptor, &response, out).map_err(|e| CliError::Output {
        details: e.to_string(),
    })?;

    Ok(response.status_code)
}
