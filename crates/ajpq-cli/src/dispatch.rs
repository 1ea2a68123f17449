//! Maps the descriptor's method name onto the executor operation for it.

use crate::assemble::RequestDescriptor;
use crate::error::CliError;
use ajpq::{AjpMethod, AjpResponse, RequestExecutor};

/// Resolves the method name case-insensitively against the supported set and
/// forwards the relevant descriptor fields. An unrecognized method fails
/// here, before the executor is touched.
pub fn dispatch(
    descriptor: &RequestDescriptor,
    executor: &mut impl RequestExecutor,
) -> Result<AjpResponse, CliError> {
    let method =
        AjpMethod::from_name(&descriptor.method).ok_or_else(|| CliError::UnsupportedMethod {
            method: descriptor.method.clone(),
        })?;

    let target = &descriptor.target;
    let headers = descriptor.headers.clone();
    let attributes = descriptor.attributes.clone();

    let response = match method {
        AjpMethod::Get => executor.get(target, headers, attributes),
        AjpMethod::Head => executor.head(target, headers, attributes),
        AjpMethod::Options => executor.options(target, headers, attributes),
        AjpMethod::Delete => executor.delete(target, headers, attributes),
        AjpMethod::Copy => executor.copy(target, headers, attributes),
        AjpMethod::Post => executor.post(target, headers, attributes, descriptor.body.as_ref()),
        AjpMethod::Put => executor.put(target, headers, attributes, descriptor.body.as_ref()),
    }?;

    Ok(response)
}
