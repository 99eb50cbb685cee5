use crate::dispatch;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, parse_macro_input, Attribute, Expr, Ident, LitStr, Token, Type};

struct LoggableInput {
    enum_name: Ident,
    variants: Vec<LoggableVariant>,
}

struct LoggableVariant {
    docs: Vec<Attribute>,
    message: LitStr,
    name: Ident,
    fields: Option<Vec<(Ident, Type)>>,
    level: Expr,
}

impl Parse for LoggableInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let enum_name = input.parse::<Ident>()?;

        let content;
        braced!(content in input);

        let mut variants = Vec::new();

        while !content.is_empty() {
            let attrs = content.call(Attribute::parse_outer)?;
            let message = attrs
                .iter()
                .find(|attr| attr.path().is_ident("error"))
                .ok_or_else(|| content.error("Expected #[error(...)] attribute"))?
                .parse_args::<LitStr>()?;
            let docs = attrs
                .into_iter()
                .filter(|attr| attr.path().is_ident("doc"))
                .collect();

            let name = content.parse::<Ident>()?;

            let fields = if content.peek(syn::token::Brace) {
                let field_content;
                braced!(field_content in content);

                let mut fields = Vec::new();
                while !field_content.is_empty() {
                    let field_name = field_content.parse::<Ident>()?;
                    field_content.parse::<Token![:]>()?;
                    let field_type = field_content.parse::<Type>()?;
                    fields.push((field_name, field_type));

                    if field_content.peek(Token![,]) {
                        field_content.parse::<Token![,]>()?;
                    }
                }
                Some(fields)
            } else {
                None
            };

            content.parse::<Token![=>]>()?;
            let level = content.parse::<Expr>()?;

            if content.peek(Token![,]) {
                content.parse::<Token![,]>()?;
            }

            variants.push(LoggableVariant {
                docs,
                message,
                name,
                fields,
                level,
            });
        }

        Ok(LoggableInput {
            enum_name,
            variants,
        })
    }
}

pub fn loggable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LoggableInput);

    let enum_name = &input.enum_name;
    let variants = &input.variants;

    let enum_variants = variants.iter().map(|variant| {
        let LoggableVariant {
            docs,
            message,
            name,
            fields,
            ..
        } = variant;

        match fields {
            Some(fields) => {
                let definitions = fields.iter().map(|(field, ty)| quote! { #field: #ty });
                quote! {
                    #(#docs)*
                    #[error(#message)]
                    #name { #(#definitions),* }
                }
            }
            None => quote! {
                #(#docs)*
                #[error(#message)]
                #name
            },
        }
    });

    let level_match_arms = variants.iter().map(|variant| {
        let name = &variant.name;
        let level = &variant.level;
        match variant.fields {
            Some(_) => quote! { Self::#name { .. } => #level },
            None => quote! { Self::#name => #level },
        }
    });

    let dispatch = dispatch::by_level(quote! { self.level() }, quote! { "{}", self });

    quote! {
        #[allow(dead_code)]
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[derive(thiserror::Error, serde::Serialize, serde::Deserialize)]
        pub enum #enum_name {
            #(#enum_variants,)*
        }

        impl #enum_name {
            #[allow(dead_code)]
            pub fn level(&self) -> tracing::Level {
                match self {
                    #(#level_match_arms,)*
                }
            }

            #[allow(dead_code)]
            pub fn log(&self) {
                #dispatch
            }
        }
    }
    .into()
}
