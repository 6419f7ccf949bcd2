use proc_macro2::Span;
use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Fields,
    ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token,
};

#[derive(Default)]
pub struct CompletionSchemaArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
}

pub fn parse_completion_schema_args(
    attr: proc_macro::TokenStream,
) -> syn::Result<CompletionSchemaArgs> {
    let mut result = CompletionSchemaArgs::default();
    if attr.is_empty() {
        return Ok(result);
    }

    let parser = Punctuated::<MetaNameValue, Token![,]>::parse_terminated;
    for nested in parser.parse(attr)? {
        let ident = nested
            .path
            .get_ident()
            .ok_or_else(|| syn::Error::new_spanned(&nested.path, "expected identifier"))?;

        let Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) = &nested.value
        else {
            return Err(syn::Error::new_spanned(
                &nested.value,
                "expected string literal value",
            ));
        };

        let slot = match ident.to_string().as_str() {
            "name" => &mut result.name,
            "description" => &mut result.description,
            other => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unsupported argument `{other}`"),
                ));
            }
        };

        if slot.is_some() {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate `{ident}` argument"),
            ));
        }
        *slot = Some(lit_str.clone());
    }

    Ok(result)
}

pub fn ensure_named_struct(item: &ItemStruct) -> syn::Result<()> {
    match &item.fields {
        Fields::Named(_) => Ok(()),
        _ => Err(syn::Error::new(
            item.struct_token.span(),
            "`#[completion_schema]` only supports structs with named fields",
        )),
    }
}

/// Doc comments arrive as `#[doc = "..."]` name-value attributes.
pub fn collect_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let docs = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(MetaNameValue {
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(lit), ..
                    }),
                ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>();

    if docs.is_empty() {
        None
    } else {
        Some(docs.join("\n"))
    }
}

pub fn collect_field_docs(item: &ItemStruct) -> Vec<(String, String)> {
    let Fields::Named(fields) = &item.fields else {
        return Vec::new();
    };

    fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let doc = collect_doc_comments(&field.attrs)?;
            Some((ident.to_string(), doc))
        })
        .collect()
}

pub fn infer_schema_name(item: &ItemStruct, explicit: Option<&LitStr>) -> LitStr {
    match explicit {
        Some(explicit) => explicit.clone(),
        None => LitStr::new(&item.ident.to_string(), Span::call_site()),
    }
}

pub fn infer_description(explicit: Option<&LitStr>, doc: Option<String>) -> Option<LitStr> {
    explicit
        .cloned()
        .or_else(|| doc.map(|text| LitStr::new(&text, Span::call_site())))
}
