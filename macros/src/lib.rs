mod dispatch;
mod log;
mod loggable;
mod traceable;

use proc_macro::TokenStream;

/// Emits a `loggable!`/`traceable!` value at the `tracing` level it declares.
///
/// `log!(entry)` logs the display message, `log!(entry, debug_info)` attaches
/// `debug_info` as a `Debug` field.
#[proc_macro]
pub fn log(input: TokenStream) -> TokenStream {
    log::log_impl(input)
}

/// Declares an enum of log lines, each bound to a `tracing::Level`.
#[proc_macro]
pub fn loggable(input: TokenStream) -> TokenStream {
    loggable::loggable_impl(input)
}

/// Declares an error enum whose variants carry a `tracing::Level` and get
/// constructor functions named after the variant.
#[proc_macro]
pub fn traceable(input: TokenStream) -> TokenStream {
    traceable::traceable_impl(input)
}
