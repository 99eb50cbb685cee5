use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    spanned::Spanned,
    Attribute, Error, Expr, Ident, LitStr, Result, Token, Type,
};

struct ErrorVariant {
    attributes: Vec<Attribute>,
    error_msg: LitStr,
    name: Ident,
    fields: Vec<(Ident, Type)>,
    level: Expr,
}

struct TraceableInput {
    enum_name: Ident,
    variants: Vec<ErrorVariant>,
}

impl Parse for TraceableInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let enum_name = input.parse::<Ident>()?;

        let content;
        syn::braced!(content in input);

        let mut variants = Vec::new();

        while !content.is_empty() {
            let attributes = content.call(Attribute::parse_outer)?;

            let error_attr = attributes
                .iter()
                .find(|attr| attr.path().is_ident("error"))
                .ok_or_else(|| Error::new(content.span(), "Missing #[error] attribute"))?;

            let error_msg = match &error_attr.meta {
                syn::Meta::List(list) => syn::parse2::<LitStr>(list.tokens.clone())?,
                _ => {
                    return Err(Error::new(
                        error_attr.span(),
                        "Invalid error attribute format",
                    ));
                }
            };

            let name = content.parse::<Ident>()?;

            let mut fields = Vec::new();
            if content.peek(syn::token::Brace) {
                let fields_content;
                syn::braced!(fields_content in content);

                while !fields_content.is_empty() {
                    let field_name = fields_content.parse::<Ident>()?;
                    fields_content.parse::<Token![:]>()?;
                    let field_type = fields_content.parse::<Type>()?;
                    fields.push((field_name, field_type));

                    if !fields_content.is_empty() {
                        fields_content.parse::<Token![,]>()?;
                    }
                }
            }

            content.parse::<Token![=>]>()?;
            let level = content.parse::<Expr>()?;

            if !content.is_empty() {
                content.parse::<Token![,]>()?;
            }

            variants.push(ErrorVariant {
                attributes,
                error_msg,
                name,
                fields,
                level,
            });
        }

        Ok(TraceableInput {
            enum_name,
            variants,
        })
    }
}

impl ErrorVariant {
    fn has_no_source(&self) -> bool {
        self.attributes
            .iter()
            .any(|attr| attr.path().is_ident("no_source"))
    }

    fn docs(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
    }

    // A unit variant already occupies the value namespace under its own name.
    fn is_unit(&self) -> bool {
        self.has_no_source() && self.fields.is_empty()
    }
}

pub fn traceable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as TraceableInput);

    let enum_name = &input.enum_name;
    let variants = &input.variants;

    let enum_variants = variants.iter().map(|variant| {
        let name = &variant.name;
        let error_msg = &variant.error_msg;
        let docs = variant.docs();

        let field_definitions = variant.fields.iter().map(|(name, ty)| {
            quote! { #name: #ty }
        });

        let source_field = if variant.has_no_source() {
            quote! {}
        } else {
            quote! { err: String, }
        };

        if variant.is_unit() {
            quote! {
                #(#docs)*
                #[error(#error_msg)]
                #name
            }
        } else {
            quote! {
                #(#docs)*
                #[error(#error_msg)]
                #name { #(#field_definitions,)* #source_field }
            }
        }
    });

    let level_match_arms = variants.iter().map(|variant| {
        let name = &variant.name;
        let level = &variant.level;

        if variant.is_unit() {
            quote! { Self::#name => #level }
        } else {
            quote! { Self::#name { .. } => #level }
        }
    });

    let constructors = variants.iter().filter(|variant| !variant.is_unit()).map(|variant| {
        let name = &variant.name;
        let fields = &variant.fields;

        let params = fields.iter().map(|(field_name, field_type)| {
            quote! { #field_name: impl Into<#field_type> }
        });

        let field_assignments = fields.iter().map(|(field_name, _)| {
            quote! { #field_name: #field_name.into() }
        });

        if variant.has_no_source() {
            quote! {
                #[allow(non_snake_case)]
                pub fn #name(#(#params),*) -> Self {
                    Self::#name {
                        #(#field_assignments,)*
                    }
                }
            }
        } else {
            quote! {
                #[allow(non_snake_case)]
                pub fn #name(#(#params,)* source: impl std::fmt::Display) -> Self {
                    Self::#name {
                        #(#field_assignments,)*
                        err: source.to_string()
                    }
                }
            }
        }
    });

    let expanded = quote! {
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

            #(#constructors)*
        }
    };

    TokenStream::from(expanded)
}
