use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input, spanned::Spanned,
};

use crate::utils;

/// One enum variant as seen from the command line.
struct ValueSpelling {
    ident: Ident,
    canonical: String,
    aliases: Vec<String>,
}

impl ValueSpelling {
    fn from_variant(ident: Ident, attrs: &[Attribute]) -> syn::Result<Self> {
        let mut spelling = Self {
            canonical: utils::to_kebab_case(&ident.to_string()),
            aliases: Vec::new(),
            ident,
        };
        for attr in attrs.iter().filter(|a| a.path().is_ident("cli")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    let lit: LitStr = meta.value()?.parse()?;
                    spelling.aliases.push(lit.value());
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected alias = \"...\""))
            })?;
        }
        Ok(spelling)
    }

    fn accepted(&self) -> impl Iterator<Item = LitStr> + '_ {
        std::iter::once(self.canonical.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .map(|v| LitStr::new(v, Span::call_site()))
    }
}

fn option_name(enum_ident: &Ident, attrs: &[Attribute]) -> syn::Result<String> {
    let mut name = utils::to_kebab_case(&enum_ident.to_string());
    for attr in attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("option") {
                let lit: LitStr = meta.value()?.parse()?;
                name = lit.value();
                return Ok(());
            }
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        })?;
    }
    Ok(name)
}

/// Unit-variant enums become `--option <value>` choices: `parse`, `as_str`,
/// `Display` and a `CLI_VALUES` string such as `"compact|pretty"`.
pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let enum_ident = input.ident;
    let Data::Enum(data_enum) = input.data else {
        return Err(syn::Error::new(
            enum_ident.span(),
            "CliValue can only be derived for enums",
        ));
    };
    let option = option_name(&enum_ident, &input.attrs)?;
    let option_lit = LitStr::new(&option, Span::call_site());

    let mut spellings = Vec::with_capacity(data_enum.variants.len());
    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "CliValue only supports enums with unit variants",
            ));
        }
        spellings.push(ValueSpelling::from_variant(variant.ident, &variant.attrs)?);
    }

    let values = spellings
        .iter()
        .map(|s| s.canonical.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let values_lit = LitStr::new(&values, Span::call_site());

    let parse_arms = spellings.iter().map(|s| {
        let ident = &s.ident;
        let accepted = s.accepted();
        quote! { #(#accepted)|* => Ok(Self::#ident), }
    });
    let str_arms = spellings.iter().map(|s| {
        let ident = &s.ident;
        let canonical = LitStr::new(&s.canonical, Span::call_site());
        quote! { Self::#ident => #canonical, }
    });

    Ok(quote! {
        impl #enum_ident {
            pub const CLI_VALUES: &'static str = #values_lit;

            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        Self::CLI_VALUES
                    ))),
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    #(#str_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}
