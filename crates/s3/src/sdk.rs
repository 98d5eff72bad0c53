//! SDK error formatting and classification
//!
//! The AWS SDK reports failures as layered `SdkError` values. Everything the
//! caller sees goes through here: the error is flattened to a message and
//! classified into the r2kit taxonomy by the service error code embedded in
//! it. Identity is preserved — no retry, no translation beyond the
//! `NoSuchTagSet` and not-found detection.

use r2kit_core::Error;

/// Format an AWS SDK error into a detailed error message
pub(crate) fn format_sdk_error<E: std::fmt::Display>(error: &aws_sdk_s3::error::SdkError<E>) -> String {
    match error {
        aws_sdk_s3::error::SdkError::ServiceError(service_err) => {
            let err = service_err.err();
            let meta = service_err.raw();
            let mut msg = format!("Service error: {}", err);
            // Try to extract additional error information from headers
            if let Some(code) = meta.headers().get("x-amz-error-code")
                && let Ok(code_str) = std::str::from_utf8(code.as_bytes())
            {
                msg.push_str(&format!(" (code: {})", code_str));
            }
            msg
        }
        aws_sdk_s3::error::SdkError::ConstructionFailure(err) => {
            format!("Request construction failed: {:?}", err)
        }
        aws_sdk_s3::error::SdkError::TimeoutError(_) => "Request timeout".to_string(),
        aws_sdk_s3::error::SdkError::DispatchFailure(err) => {
            format!("Network dispatch error: {:?}", err)
        }
        aws_sdk_s3::error::SdkError::ResponseError(err) => {
            format!("Response error: {:?}", err)
        }
        _ => error.to_string(),
    }
}

/// Classify a flattened SDK error message.
///
/// `target` names what the operation was addressing (bucket, object key) and
/// ends up in the `NotFound`/`NoSuchTagSet` payload.
pub(crate) fn classify_message(op: &str, target: &str, msg: &str) -> Error {
    if msg.contains("NoSuchTagSet") {
        Error::NoSuchTagSet(target.to_string())
    } else if msg.contains("NotFound")
        || msg.contains("NoSuchKey")
        || msg.contains("NoSuchBucket")
    {
        Error::NotFound(target.to_string())
    } else {
        Error::Network(format!("{op}: {msg}"))
    }
}

/// Map an SDK error into the r2kit taxonomy
pub(crate) fn map_sdk_error<E: std::fmt::Display>(
    op: &str,
    target: &str,
    error: &aws_sdk_s3::error::SdkError<E>,
) -> Error {
    classify_message(op, target, &format_sdk_error(error))
}
