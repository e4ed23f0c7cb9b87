use anyhow::Error;
use std::io;

use super::error::OcmsError;

/// Returns `true` if any error in the chain is a broken pipe, including
/// IO failures wrapped in [`OcmsError::Io`].
#[inline]
pub fn is_broken_pipe(err: &Error) -> bool {
    err.chain().any(|cause| {
        let io_err = match cause.downcast_ref::<OcmsError>() {
            Some(OcmsError::Io(inner)) => Some(inner),
            _ => cause.downcast_ref::<io::Error>(),
        };
        io_err
            .map(|e| e.kind() == io::ErrorKind::BrokenPipe)
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wrapped_broken_pipe() {
        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let err = Error::from(OcmsError::Io(inner)).context("writing table");
        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn ignores_other_errors() {
        let err = Error::from(OcmsError::NoFastqcDirectories);
        assert!(!is_broken_pipe(&err));
    }
}
