//! Derive macros for the flocksteer steering core.
//!
//! This crate provides two derive macros:
//!
//! - [`FlockMember`] - Exposes a host struct as a neighbor to other agents
//! - [`Obstruction`] - Exposes a host struct as a static obstacle
//!
//! # Usage
//!
//! These macros are re-exported from the main `flocksteer` crate. You don't
//! need to add this crate directly:
//!
//! ```ignore
//! use flocksteer::prelude::*;
//!
//! #[derive(FlockMember)]
//! struct Bird {
//!     id: AgentId,
//!     position: Vec3,
//!     velocity: Vec3,
//!     hunger: f32,
//! }
//!
//! #[derive(Obstruction)]
//! struct Pillar {
//!     #[position]
//!     base: Vec3,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Field, Fields, Ident};

/// Derive macro for neighbor structs.
///
/// Implements `flocksteer::FlockMember` by reading three fields.
///
/// # Required Fields
///
/// | Field | Type | Override attribute |
/// |-------|------|--------------------|
/// | `id` | `AgentId` | `#[agent_id]` |
/// | `position` | `Vec3` | `#[position]` |
/// | `velocity` | `Vec3` | `#[velocity]` |
///
/// A field carrying the attribute wins over a field with the default name.
/// Any other fields are ignored.
///
/// # Example
///
/// ```ignore
/// #[derive(FlockMember)]
/// struct Drone {
///     #[agent_id]
///     handle: AgentId,
///     position: Vec3,
///     #[velocity]
///     last_delta: Vec3,
/// }
/// ```
///
/// # Errors
///
/// Fails to compile if applied to anything but a struct with named fields,
/// or if a required field cannot be found.
#[proc_macro_derive(FlockMember, attributes(agent_id, position, velocity))]
pub fn derive_flock_member(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_flock_member(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Derive macro for obstacle structs.
///
/// Implements `flocksteer::Obstruction` from a `position: Vec3` field, or
/// the field marked `#[position]`.
#[proc_macro_derive(Obstruction, attributes(position))]
pub fn derive_obstruction(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_obstruction(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand_flock_member(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let fields = named_fields(input, "FlockMember")?;

    let id = find_field(input, fields, "agent_id", "id")?;
    let position = find_field(input, fields, "position", "position")?;
    let velocity = find_field(input, fields, "velocity", "velocity")?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::flocksteer::FlockMember for #name #ty_generics #where_clause {
            #[inline]
            fn id(&self) -> ::flocksteer::AgentId {
                self.#id
            }

            #[inline]
            fn position(&self) -> ::flocksteer::Vec3 {
                self.#position
            }

            #[inline]
            fn flocking_velocity(&self) -> ::flocksteer::Vec3 {
                self.#velocity
            }
        }
    })
}

fn expand_obstruction(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let fields = named_fields(input, "Obstruction")?;

    let position = find_field(input, fields, "position", "position")?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::flocksteer::Obstruction for #name #ty_generics #where_clause {
            #[inline]
            fn position(&self) -> ::flocksteer::Vec3 {
                self.#position
            }
        }
    })
}

fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a syn::punctuated::Punctuated<Field, syn::token::Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(Error::new_spanned(
                &input.ident,
                format!("{derive} derive only supports structs with named fields"),
            )),
        },
        _ => Err(Error::new_spanned(
            &input.ident,
            format!("{derive} derive only supports structs"),
        )),
    }
}

/// Field marked with `#[attr]`, else the field called `default_name`.
fn find_field<'a>(
    input: &DeriveInput,
    fields: &'a syn::punctuated::Punctuated<Field, syn::token::Comma>,
    attr: &str,
    default_name: &str,
) -> syn::Result<&'a Ident> {
    let mut marked = fields
        .iter()
        .filter(|f| f.attrs.iter().any(|a| a.path().is_ident(attr)));

    if let Some(field) = marked.next() {
        if let Some(extra) = marked.next() {
            return Err(Error::new_spanned(
                extra,
                format!("only one field may be marked #[{attr}]"),
            ));
        }
        return field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"));
    }

    fields
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .find(|ident| *ident == default_name)
        .ok_or_else(|| {
            Error::new_spanned(
                &input.ident,
                format!("missing `{default_name}` field (or a field marked #[{attr}])"),
            )
        })
}
