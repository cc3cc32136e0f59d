//! Procedural macros for Rowstamp.
//!
//! `rowstamp-macros` is the compile-time codegen layer. It turns entity
//! structs into audit-capable records by generating the `AuditRecord`
//! dispatch from the struct's own field names, replacing the runtime
//! reflection walk the platform previously relied on.
//!
//! The derive recognizes fields whose snake_case names map onto the audit
//! vocabulary (`create_by`, `create_time`, `update_by`, `update_time`,
//! `version`, `deleted`, `tenant_id`). Everything else on the struct is
//! ignored, so any entity with matching field names participates
//! automatically and no call site changes.

use proc_macro::TokenStream;
use quote::quote;

/// Field-name to `AuditField` variant mapping, in vocabulary order.
const RECOGNIZED: [(&str, &str); 7] = [
    ("create_by", "CreateBy"),
    ("create_time", "CreateTime"),
    ("update_by", "UpdateBy"),
    ("update_time", "UpdateTime"),
    ("version", "Version"),
    ("deleted", "Deleted"),
    ("tenant_id", "TenantId"),
];

/// Derive macro for the `AuditRecord` trait.
///
/// Generates:
/// - `audit_fields()` listing the declared vocabulary subset in order
/// - `audit_value()` reading fields through `AuditValue::to_audit_value`
/// - `set_audit_value()` writing fields through `AuditValue::from_audit_value`
///
/// Field types must implement `rowstamp_core::AuditValue` (`String`, `bool`,
/// `i32`, `i64`, and `Option` of each are provided).
///
/// # Example
///
/// ```ignore
/// use rowstamp_core::AuditRecord;
///
/// #[derive(AuditRecord)]
/// struct SysUser {
///     id: Option<i64>,
///     username: String,
///     create_by: Option<String>,
///     create_time: Option<i64>,
///     update_by: Option<String>,
///     update_time: Option<i64>,
///     version: i32,
///     deleted: i32,
///     tenant_id: Option<String>,
/// }
/// ```
#[proc_macro_derive(AuditRecord)]
pub fn derive_audit_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    generate_audit_record_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}


fn generate_audit_record_impl(
    input: &syn::DeriveInput,
) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "#[derive(AuditRecord)] only supports structs with named fields",
            ));
        }
    };

    // Walk the vocabulary, not the struct, so the declared subset comes out
    // in vocabulary order regardless of field order in the source.
    let mut declared: Vec<(syn::Ident, syn::Ident)> = Vec::new();
    for (field_name, variant_name) in RECOGNIZED {
        let matched = fields.iter().find(|f| {
            f.ident
                .as_ref()
                .is_some_and(|ident| ident == field_name)
        });
        if let Some(field) = matched {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            let variant = syn::Ident::new(variant_name, proc_macro2::Span::call_site());
            declared.push((ident, variant));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants: Vec<&syn::Ident> = declared.iter().map(|(_, v)| v).collect();
    let idents: Vec<&syn::Ident> = declared.iter().map(|(i, _)| i).collect();
    let exhaustive = declared.len() == RECOGNIZED.len();

    let audit_value_body = if declared.is_empty() {
        quote! {
            let _ = field;
            None
        }
    } else {
        let fallback = if exhaustive {
            quote! {}
        } else {
            quote! { _ => None, }
        };
        quote! {
            match field {
                #(rowstamp_core::AuditField::#variants => {
                    Some(rowstamp_core::AuditValue::to_audit_value(&self.#idents))
                })*
                #fallback
            }
        }
    };

    let set_audit_value_body = if declared.is_empty() {
        quote! {
            let _ = value;
            Err(rowstamp_core::Error::undeclared_field(field.column_name()))
        }
    } else {
        let fallback = if exhaustive {
            quote! {}
        } else {
            quote! {
                other => Err(rowstamp_core::Error::undeclared_field(other.column_name())),
            }
        };
        quote! {
            match field {
                #(rowstamp_core::AuditField::#variants => {
                    self.#idents = rowstamp_core::AuditValue::from_audit_value(value)
                        .map_err(|e| {
                            e.with_field(rowstamp_core::AuditField::#variants.column_name())
                        })?;
                    Ok(())
                })*
                #fallback
            }
        }
    };

    Ok(quote! {
        impl #impl_generics rowstamp_core::AuditRecord for #name #ty_generics #where_clause {
            fn audit_fields(&self) -> &'static [rowstamp_core::AuditField] {
                const FIELDS: &[rowstamp_core::AuditField] = &[
                    #(rowstamp_core::AuditField::#variants,)*
                ];
                FIELDS
            }

            fn audit_value(
                &self,
                field: rowstamp_core::AuditField,
            ) -> Option<rowstamp_core::Value> {
                #audit_value_body
            }

            fn set_audit_value(
                &mut self,
                field: rowstamp_core::AuditField,
                value: rowstamp_core::Value,
            ) -> rowstamp_core::Result<()> {
                #set_audit_value_body
            }
        }
    })
}
