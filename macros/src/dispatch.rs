use proc_macro2::TokenStream;
use quote::quote;

/// Expands to a `match` on `level` that forwards `fields` to the matching
/// `tracing` macro.
pub fn by_level(level: TokenStream, fields: TokenStream) -> TokenStream {
    quote! {
        match #level {
            tracing::Level::ERROR => tracing::error!(#fields),
            tracing::Level::WARN => tracing::warn!(#fields),
            tracing::Level::INFO => tracing::info!(#fields),
            tracing::Level::DEBUG => tracing::debug!(#fields),
            _ => tracing::trace!(#fields),
        }
    }
}
