//! Small helpers for the dispatch code in `lib.rs`.

/// Write a line to a stream and bail out of `run` with the error code if
/// the stream is gone.
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}
