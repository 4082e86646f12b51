//! Config derive macro - generates FIELDS and template().

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Parsed field information.
struct FieldInfo {
    name: syn::Ident,
    toml_name: String,
    doc: Option<String>,
    inline_doc: bool,
    hidden: bool,
    default: Option<String>,
    skip: bool,
    ty: String,
}

pub fn derive(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let fields_struct_name = syn::Ident::new(&format!("{name}Fields"), name.span());

    let section = get_string_attr(&input.attrs, "section")
        .unwrap_or_else(|| infer_section(&name.to_string()));
    let section_doc = extract_doc_comment(&input.attrs).unwrap_or_default();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return quote! { compile_error!("Config only works on structs with named fields"); };
            }
        },
        _ => return quote! { compile_error!("Config only works on structs"); },
    };

    let infos: Vec<FieldInfo> = fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let attrs = &field.attrs;
            Some(FieldInfo {
                name: ident.clone(),
                toml_name: get_string_attr(attrs, "name").unwrap_or_else(|| ident.to_string()),
                doc: extract_doc_comment(attrs),
                inline_doc: has_attr(attrs, "inline_doc"),
                hidden: has_attr(attrs, "hidden"),
                default: get_string_attr(attrs, "default"),
                skip: has_attr(attrs, "skip"),
                ty: type_to_string(&field.ty),
            })
        })
        .filter(|f| !f.skip)
        .collect();

    let field_defs = infos.iter().map(|f| {
        let name = &f.name;
        quote! { pub #name: crate::config::FieldPath, }
    });

    let field_inits = infos.iter().map(|f| {
        let name = &f.name;
        let full_path = if section.is_empty() {
            f.toml_name.clone()
        } else {
            format!("{}.{}", section, f.toml_name)
        };
        quote! { #name: crate::config::FieldPath::new(#full_path), }
    });

    let template_str = infos
        .iter()
        .filter(|f| !f.hidden)
        .map(field_template)
        .collect::<Vec<_>>()
        .join("\n");

    quote! {
        /// Generated field path accessors.
        #[allow(non_camel_case_types, dead_code)]
        pub struct #fields_struct_name {
            #(#field_defs)*
        }

        #[allow(dead_code)]
        impl #name {
            /// Field paths for diagnostic messages.
            pub const FIELDS: #fields_struct_name = #fields_struct_name {
                #(#field_inits)*
            };

            /// Section name for TOML output.
            pub const TEMPLATE_SECTION: &'static str = #section;

            /// Section documentation.
            pub const TEMPLATE_DOC: &'static str = #section_doc;

            /// TOML template for this config section.
            pub fn template() -> &'static str {
                #template_str
            }

            /// TOML template with doc comment and `[section]` header.
            pub fn template_with_header() -> String {
                let mut out = String::new();
                for line in Self::TEMPLATE_DOC.lines() {
                    out.push_str("# ");
                    out.push_str(line.trim());
                    out.push('\n');
                }
                if !Self::TEMPLATE_SECTION.is_empty() {
                    out.push('[');
                    out.push_str(Self::TEMPLATE_SECTION);
                    out.push_str("]\n");
                }
                out.push_str(Self::template());
                out.push('\n');
                out
            }
        }
    }
}

/// Render one `key = value` line, with its doc either above or trailing.
fn field_template(info: &FieldInfo) -> String {
    let mut lines = Vec::new();
    let single_line = info.doc.as_ref().is_some_and(|d| !d.contains('\n'));
    let inline = info.inline_doc && single_line;

    if !inline && let Some(doc) = &info.doc {
        for line in doc.lines() {
            lines.push(format!("# {}", line.trim()));
        }
    }

    let optional = info.ty.starts_with("Option<");
    let value = match &info.default {
        Some(v) => format_default(v, &info.ty),
        None => infer_default(&info.ty),
    };

    // Optional fields without a default stay commented out
    let line = if optional && info.default.is_none() {
        format!("# {} = \"\"", info.toml_name)
    } else {
        format!("{} = {}", info.toml_name, value)
    };

    match (&info.doc, inline) {
        (Some(doc), true) => lines.push(format!("{line}  # {}", doc.trim())),
        _ => lines.push(line),
    }
    lines.join("\n")
}

fn get_string_attr(attrs: &[Attribute], key: &str) -> Option<String> {
    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        let mut value = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: syn::LitStr = meta.value()?.parse()?;
                value = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                let _ = meta.value()?.parse::<Lit>();
            }
            Ok(())
        });
        if value.is_some() {
            return value;
        }
    }
    None
}

fn has_attr(attrs: &[Attribute], key: &str) -> bool {
    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                found = true;
            }
            if meta.input.peek(syn::Token![=]) {
                let _ = meta.value()?.parse::<Lit>();
            }
            Ok(())
        });
        if found {
            return true;
        }
    }
    false
}

fn extract_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n").trim().to_string())
    }
}

fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

fn infer_section(name: &str) -> String {
    let name = name
        .strip_suffix("SectionConfig")
        .or_else(|| name.strip_suffix("Config"))
        .unwrap_or(name);
    let mut out = String::new();
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Quote string-like defaults; numbers, booleans and arrays go through as-is.
fn format_default(value: &str, ty: &str) -> String {
    let bare = matches!(
        ty,
        "bool" | "u8" | "u16" | "u32" | "u64" | "usize" | "i32" | "i64" | "f32" | "f64"
    ) || ty.starts_with("Vec<")
        || ty.starts_with("Option<u")
        || ty.starts_with("Option<f");
    if bare {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

fn infer_default(ty: &str) -> String {
    match ty {
        "bool" => "false".to_string(),
        "u8" | "u16" | "u32" | "u64" | "usize" | "i32" | "i64" => "0".to_string(),
        "f32" | "f64" => "0.0".to_string(),
        _ if ty.starts_with("Vec<") => "[]".to_string(),
        _ => "\"\"".to_string(),
    }
}
