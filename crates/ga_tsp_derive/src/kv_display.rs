use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// How a field value is rendered on its `key = value` line.
enum KvMode {
    Display,
    Len,
    Opt,
}

impl KvMode {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "len" => Ok(Self::Len),
            "opt" => Ok(Self::Opt),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unsupported kv fmt mode: {other}"),
            )),
        }
    }

    fn from_field(field: &Field) -> syn::Result<Self> {
        let mut mode = Self::Display;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("kv")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("fmt") {
                    mode = Self::parse(&meta.value()?.parse()?)?;
                    return Ok(());
                }
                Err(meta.error("unsupported kv attribute; expected fmt = \"...\""))
            })?;
        }
        Ok(mode)
    }
}

/// `Display` as one aligned `key = value` line per field, each line
/// tab-indented and preceded by a newline.
pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_ident = &input.ident;
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "KvDisplay can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new(
            input.span(),
            "KvDisplay requires named fields",
        ));
    };

    let mut keys = Vec::new();
    let mut vals = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        vals.push(match KvMode::from_field(field)? {
            KvMode::Display => quote! { &self.#ident },
            KvMode::Len => quote! { &self.#ident.len() },
            KvMode::Opt => quote! {
                &self.#ident
                    .as_ref()
                    .map_or_else(|| String::from("none"), |v| v.to_string())
            },
        });
        keys.push(ident.to_string());
    }

    let width = keys.iter().map(String::len).max().unwrap_or(0);
    let lines: Vec<String> = keys
        .iter()
        .map(|key| format!("\n\t{key:<width$} = {{}}"))
        .collect();
    let format_lit = LitStr::new(&lines.concat(), Span::call_site());

    Ok(quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #format_lit, #(#vals),*)
            }
        }
    })
}
