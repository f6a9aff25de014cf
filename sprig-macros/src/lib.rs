use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, LitInt, LitStr};

/// Derives `sprig::Receiver` for a struct with named fields.
///
/// # Usage
///
/// ```ignore
/// #[derive(Default, Receiver)]
/// struct TimeArgs {
///     #[sprig(position = 0, help = "Time to convert", required)]
///     value: String,
///
///     #[sprig(flag = "-f", help = "Timestamp unit <s|ms>", default = "s")]
///     format: String,
/// }
/// ```
///
/// This will generate:
///
/// ```ignore
/// impl sprig::Receiver for TimeArgs {
///     fn descriptor() -> sprig::Descriptor {
///         sprig::Descriptor::new()
///             .argument(sprig::ArgumentSlot::new(0, "value", "Time to convert")
///                 .required(true)
///                 .kind(<String as sprig::FromValue>::kind()))
///             .option(sprig::OptionSlot::new("-f", "format", "Timestamp unit <s|ms>")
///                 .kind(<String as sprig::FromValue>::kind())
///                 .default_value("s"))
///     }
///
///     fn assign(&mut self, field: &str, value: sprig::Value) -> Result<(), sprig::DispatchError> {
///         match field {
///             "value" => self.value = sprig::convert(field, value)?,
///             "format" => self.format = sprig::convert(field, value)?,
///             other => return Err(sprig::DispatchError::UnknownField(other.to_string())),
///         }
///         Ok(())
///     }
/// }
/// ```
///
/// Fields without a `#[sprig(...)]` attribute are left at their default.
#[proc_macro_derive(Receiver, attributes(sprig))]
pub fn derive_receiver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::sprig::Receiver for #name #ty_generics #where_clause {
                        fn descriptor() -> ::sprig::Descriptor {
                            ::sprig::Descriptor::new()
                        }

                        fn assign(
                            &mut self,
                            field: &str,
                            _value: ::sprig::Value,
                        ) -> ::core::result::Result<(), ::sprig::DispatchError> {
                            ::core::result::Result::Err(
                                ::sprig::DispatchError::UnknownField(field.to_string()),
                            )
                        }
                    }
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Receiver can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Receiver can only be derived for structs",
            ))
        }
    };

    let mut slots = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let Some(slot) = parse_slot(field)? else {
            continue;
        };

        let ident = field.ident.as_ref().expect("named field");
        let ty = &field.ty;
        let field_name = ident.unraw().to_string();

        slots.push(match slot {
            Slot::Argument {
                position,
                help,
                required,
            } => quote! {
                .argument(
                    ::sprig::ArgumentSlot::new(#position, #field_name, #help)
                        .required(#required)
                        .kind(<#ty as ::sprig::FromValue>::kind())
                )
            },
            Slot::Option { flag, help, default } => {
                let default = default.map(|value| quote! { .default_value(#value) });
                quote! {
                    .option(
                        ::sprig::OptionSlot::new(#flag, #field_name, #help)
                            .kind(<#ty as ::sprig::FromValue>::kind())
                            #default
                    )
                }
            }
        });

        arms.push(quote! {
            #field_name => self.#ident = ::sprig::convert::<#ty>(field, value)?,
        });
    }

    Ok(quote! {
        impl #impl_generics ::sprig::Receiver for #name #ty_generics #where_clause {
            fn descriptor() -> ::sprig::Descriptor {
                ::sprig::Descriptor::new()
                    #(#slots)*
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                field: &str,
                value: ::sprig::Value,
            ) -> ::core::result::Result<(), ::sprig::DispatchError> {
                match field {
                    #(#arms)*
                    other => {
                        return ::core::result::Result::Err(
                            ::sprig::DispatchError::UnknownField(other.to_string()),
                        )
                    }
                }
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Declared binding of one field.
enum Slot {
    Argument {
        position: usize,
        help: String,
        required: bool,
    },
    Option {
        flag: String,
        help: String,
        default: Option<String>,
    },
}

/// Read `#[sprig(...)]` from a field.
///
/// Accepted keys: `position = N`, `flag = "-x"`, `help = "..."`,
/// `required`, `default = "..."`.
fn parse_slot(field: &Field) -> syn::Result<Option<Slot>> {
    let mut seen = false;
    let mut position: Option<usize> = None;
    let mut flag: Option<String> = None;
    let mut help = String::new();
    let mut required = false;
    let mut default: Option<String> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("sprig") {
            continue;
        }
        seen = true;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("position") {
                let lit: LitInt = meta.value()?.parse()?;
                position = Some(lit.base10_parse()?);
            } else if meta.path.is_ident("flag") {
                let lit: LitStr = meta.value()?.parse()?;
                flag = Some(lit.value());
            } else if meta.path.is_ident("help") {
                let lit: LitStr = meta.value()?.parse()?;
                help = lit.value();
            } else if meta.path.is_ident("required") {
                required = true;
            } else if meta.path.is_ident("default") {
                let lit: LitStr = meta.value()?.parse()?;
                default = Some(lit.value());
            } else {
                return Err(meta.error(
                    "unknown sprig attribute, expected one of: position, flag, help, required, default",
                ));
            }
            Ok(())
        })?;
    }

    match (position, flag) {
        (Some(_), Some(_)) => Err(syn::Error::new_spanned(
            field,
            "a field is either a positional argument or an option, not both",
        )),
        (None, None) if seen => Err(syn::Error::new_spanned(
            field,
            "expected `position = N` or `flag = \"-x\"`",
        )),
        (None, None) => Ok(None),
        (Some(position), None) => {
            if default.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "`default` applies to options only",
                ));
            }
            Ok(Some(Slot::Argument {
                position,
                help,
                required,
            }))
        }
        (None, Some(flag)) => {
            if required {
                return Err(syn::Error::new_spanned(
                    field,
                    "options cannot be required, declare a `default` instead",
                ));
            }
            Ok(Some(Slot::Option { flag, help, default }))
        }
    }
}
