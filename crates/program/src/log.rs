/// Writes a formatted line to the environment's debug channel.
///
/// The first argument is anything that derefs to a `TransactionContext`.
/// Formatting is lazy: a context that discards debug output never renders
/// the arguments.
///
/// ```ignore
/// debug!(ctx, "witness {} len={}", index, len);
/// ```
#[macro_export]
macro_rules! debug {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::syscalls::TransactionContext::debug($ctx, format_args!($($arg)+))
    };
}
