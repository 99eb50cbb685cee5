use crate::dispatch;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Expr, Token};

struct LogInput {
    entry: Expr,
    debug_info: Option<Expr>,
}

impl Parse for LogInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let entry = input.parse::<Expr>()?;

        let debug_info = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            Some(input.parse::<Expr>()?)
        } else {
            None
        };

        Ok(LogInput { entry, debug_info })
    }
}

pub fn log_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LogInput);
    let entry = &input.entry;

    let (binding, fields) = match &input.debug_info {
        Some(debug_info) => (
            quote! { let debug_info = #debug_info; },
            quote! { message = %message, debug = ?debug_info },
        ),
        None => (quote! {}, quote! { "{}", message }),
    };

    let dispatch = dispatch::by_level(quote! { level }, fields);

    quote! {
        {
            let entry = &#entry;
            let level = entry.level();
            let message = entry.to_string();
            #binding
            #dispatch
        }
    }
    .into()
}
