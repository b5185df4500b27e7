use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, Result, Token, Type,
    parse::{Parse, ParseStream},
    parse_quote,
    spanned::Spanned,
};

pub(crate) fn expand_message(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`Message` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`Message` may only be derived on structs with named fields.",
        ))?
    };

    if !input.generics.params.is_empty() {
        Err(Error::new_spanned(
            &input.generics,
            "`Message` may not be derived on generic structs.",
        ))?
    }

    let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("message")) else {
        Err(Error::new(
            input.span(),
            "`Message` requires a `#[message(class = .., id = ..)]` attribute.",
        ))?
    };

    let MessageAttribute { class, id } = attr.meta.require_list()?.parse_args()?;

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    let name = &input.ident;
    let wire = format_ident!("{}Wire", name);

    let names = fields.iter().map(|f| &f.name).collect::<Vec<_>>();
    let wire_types = fields.iter().map(|f| &f.wire_type);

    // The wire view is private to the expansion; only the record is public.
    let expanded = quote! {
        const _: () = {
            #[repr(C)]
            #[derive(zerocopy::FromBytes)]
            struct #wire {
                #(#names: #wire_types,)*
            }

            impl Message for #name {
                const CLASS: u8 = #class;
                const ID: u8 = #id;
                const SIZE: usize = ::core::mem::size_of::<#wire>();

                fn decode(payload: &[u8]) -> ::core::option::Option<Self> {
                    let r: [u8; ::core::mem::size_of::<#wire>()] =
                        ::core::convert::TryFrom::try_from(payload).ok()?;
                    let wire: #wire = zerocopy::transmute!(r);

                    ::core::option::Option::Some(Self {
                        #(#names: wire.#names.into(),)*
                    })
                }
            }
        };
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    wire_type: Type,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let name = field.ident.clone().unwrap();
        let wire_type = wire_type(&field.ty)?;

        Ok(Self { name, wire_type })
    }
}

/// Map a record field type to its little-endian, unaligned wire counterpart.
fn wire_type(ty: &Type) -> Result<Type> {
    let unsupported = || {
        Error::new_spanned(
            ty,
            "Message fields must be fixed-width integers or byte arrays.",
        )
    };

    match ty {
        Type::Path(path) => {
            let Some(ident) = path.path.get_ident() else {
                Err(unsupported())?
            };

            let wire: Type = match ident.to_string().as_str() {
                "u8" => parse_quote!(u8),
                "i8" => parse_quote!(i8),
                "u16" => parse_quote!(zerocopy::little_endian::U16),
                "i16" => parse_quote!(zerocopy::little_endian::I16),
                "u32" => parse_quote!(zerocopy::little_endian::U32),
                "i32" => parse_quote!(zerocopy::little_endian::I32),
                "u64" => parse_quote!(zerocopy::little_endian::U64),
                "i64" => parse_quote!(zerocopy::little_endian::I64),
                _ => Err(unsupported())?,
            };

            Ok(wire)
        }
        Type::Array(array) => match &*array.elem {
            Type::Path(elem) if elem.path.is_ident("u8") => Ok(ty.clone()),
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

#[derive(Debug)]
struct MessageAttribute {
    class: LitInt,
    id: LitInt,
}

impl Parse for MessageAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut class = None;
        let mut id = None;

        while !input.is_empty() {
            let key = input.parse::<Ident>()?;
            input.parse::<Token![=]>()?;
            let value = input.parse::<LitInt>()?;

            let slot = if key == "class" {
                &mut class
            } else if key == "id" {
                &mut id
            } else {
                Err(Error::new_spanned(
                    &key,
                    "Expected `class` or `id`.",
                ))?
            };

            if slot.replace(value).is_some() {
                Err(Error::new_spanned(key, "Duplicate key."))?;
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        let (Some(class), Some(id)) = (class, id) else {
            Err(input.error("Both `class` and `id` must be supplied."))?
        };

        Ok(Self { class, id })
    }
}
