use crate::{
    attrs::{EntityAttrs, FieldAttrs, FieldRole},
    util::RelationShape,
};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeSet;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitStr, Type};

///
/// DictField
/// One named struct field with its parsed options.
///

struct DictField {
    ident: Ident,
    ty: Type,
    attrs: FieldAttrs,
}

// derive_dictable
pub fn derive_dictable(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: TokenStream) -> Result<TokenStream, Error> {
    let input: DeriveInput = syn::parse2(input)?;
    let message = "Dictable can only be derived for structs with named fields";

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => return Err(Error::new_spanned(other, message)),
        },
        _ => return Err(Error::new_spanned(&input.ident, message)),
    };

    let entity = EntityAttrs::parse(&input.attrs)?;
    let fields = named
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| Error::new_spanned(field, message))?;
            let attrs = FieldAttrs::parse(field, &ident)?;

            Ok(DictField {
                ident,
                ty: field.ty.clone(),
                attrs,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    validate_synonyms(&entity, &fields)?;

    let schema = schema_impl(&input, &entity, &fields);
    let access = entity_impl(&input, &entity, &fields);
    let dictable = dictable_impl(&input, &entity);

    Ok(quote! {
        #schema
        #access
        #dictable
    })
}

// Synonym names must be fresh and must point at an accessible field.
fn validate_synonyms(entity: &EntityAttrs, fields: &[DictField]) -> Result<(), Error> {
    let mut taken: BTreeSet<String> = fields
        .iter()
        .filter(|field| field.attrs.role != FieldRole::Skip)
        .map(|field| field.attrs.name.clone())
        .collect();

    for synonym in &entity.synonyms {
        let target = synonym.target.value();
        let resolves = fields
            .iter()
            .any(|field| field.attrs.is_accessible() && field.attrs.name == target);
        if !resolves {
            return Err(Error::new_spanned(
                &synonym.target,
                format!("synonym target `{target}` is not a column or property field"),
            ));
        }

        if !taken.insert(synonym.name.value()) {
            return Err(Error::new_spanned(
                &synonym.name,
                "synonym name collides with an existing field",
            ));
        }
    }

    Ok(())
}

///
/// EntitySchema
///

fn schema_impl(input: &DeriveInput, entity: &EntityAttrs, fields: &[DictField]) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let type_name = ident.to_string();
    let entity_name = entity
        .entity_name
        .clone()
        .unwrap_or_else(|| LitStr::new(&type_name, ident.span()));

    let field_models = fields.iter().filter_map(field_model);
    let synonym_models = entity.synonyms.iter().map(|synonym| {
        let name = &synonym.name;
        let target = &synonym.target;

        quote! {
            ::dictalchemy::model::field::FieldModel {
                name: #name,
                kind: ::dictalchemy::model::field::FieldKind::Synonym { target: #target },
            }
        }
    });

    quote! {
        impl #impl_generics ::dictalchemy::traits::EntitySchema for #ident #ty_generics #where_clause {
            const MODEL: &'static ::dictalchemy::model::entity::EntityModel =
                &::dictalchemy::model::entity::EntityModel {
                    path: concat!(module_path!(), "::", #type_name),
                    entity_name: #entity_name,
                    fields: &[
                        #(#field_models,)*
                        #(#synonym_models,)*
                    ],
                };
        }
    }
}

fn field_model(field: &DictField) -> Option<TokenStream> {
    let name = &field.attrs.name;

    match field.attrs.role {
        FieldRole::Column => {
            let column = field.attrs.column_name();
            let primary_key = field.attrs.primary_key;

            Some(quote! {
                ::dictalchemy::model::field::FieldModel {
                    name: #name,
                    kind: ::dictalchemy::model::field::FieldKind::Column {
                        columns: &[::dictalchemy::model::field::ColumnModel {
                            name: #column,
                            primary_key: #primary_key,
                        }],
                    },
                }
            })
        }
        FieldRole::Relation => {
            let cardinality = if RelationShape::classify(&field.ty).is_many() {
                quote!(::dictalchemy::model::field::Cardinality::Many)
            } else {
                quote!(::dictalchemy::model::field::Cardinality::One)
            };

            Some(quote! {
                ::dictalchemy::model::field::FieldModel {
                    name: #name,
                    kind: ::dictalchemy::model::field::FieldKind::Relationship {
                        cardinality: #cardinality,
                    },
                }
            })
        }
        FieldRole::Property | FieldRole::Skip => None,
    }
}

///
/// Entity
///

fn entity_impl(input: &DeriveInput, entity: &EntityAttrs, fields: &[DictField]) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // every name that reads/writes a given field, synonyms included
    let accessors = fields
        .iter()
        .filter(|field| field.attrs.is_accessible())
        .map(|field| {
            let mut names = vec![field.attrs.name.clone()];
            names.extend(
                entity
                    .synonyms
                    .iter()
                    .filter(|synonym| synonym.target.value() == field.attrs.name)
                    .map(|synonym| synonym.name.value()),
            );

            (&field.ident, names)
        })
        .collect::<Vec<_>>();

    let get_arms = accessors.iter().map(|(field_ident, names)| {
        quote! {
            #(#names)|* => Some(::dictalchemy::traits::FieldValue::to_value(&self.#field_ident)),
        }
    });
    let set_arms = accessors.iter().map(|(field_ident, names)| {
        quote! {
            #(#names)|* => ::dictalchemy::traits::assign(&mut self.#field_ident, value),
        }
    });

    let relations = fields
        .iter()
        .filter(|field| field.attrs.role == FieldRole::Relation)
        .collect::<Vec<_>>();
    let related_arms = relations.iter().map(|field| {
        let name = &field.attrs.name;
        let expr = related_expr(&field.ident, RelationShape::classify(&field.ty));

        quote! { #name => Some(#expr), }
    });
    let related_mut_arms = relations.iter().map(|field| {
        let name = &field.attrs.name;
        let expr = related_mut_expr(&field.ident, RelationShape::classify(&field.ty));

        quote! { #name => Some(#expr), }
    });

    quote! {
        impl #impl_generics ::dictalchemy::traits::Entity for #ident #ty_generics #where_clause {
            fn model(&self) -> &'static ::dictalchemy::model::entity::EntityModel {
                <Self as ::dictalchemy::traits::EntitySchema>::MODEL
            }

            fn get_attr(&self, name: &str) -> Option<::dictalchemy::value::Value> {
                match name {
                    #(#get_arms)*
                    _ => None,
                }
            }

            fn set_attr(
                &mut self,
                name: &str,
                value: &::dictalchemy::value::Value,
            ) -> Result<(), ::dictalchemy::error::AttrError> {
                match name {
                    #(#set_arms)*
                    _ => Err(::dictalchemy::error::AttrError::Unknown),
                }
            }

            fn related(&self, name: &str) -> Option<::dictalchemy::traits::Related<'_>> {
                match name {
                    #(#related_arms)*
                    _ => None,
                }
            }

            fn related_mut(&mut self, name: &str) -> Option<::dictalchemy::traits::RelatedMut<'_>> {
                match name {
                    #(#related_mut_arms)*
                    _ => None,
                }
            }
        }
    }
}

fn related_expr(field: &Ident, shape: RelationShape) -> TokenStream {
    let related = quote!(::dictalchemy::traits::Related);
    let item = quote!(::dictalchemy::traits::RelatedItem);

    match shape {
        RelationShape::One { boxed: false } => quote!(#related::One(&self.#field)),
        RelationShape::One { boxed: true } => quote!(#related::One(&*self.#field)),
        RelationShape::Opt { boxed: false } => quote! {
            self.#field.as_ref().map_or(#related::Null, |v| #related::One(v))
        },
        RelationShape::Opt { boxed: true } => quote! {
            self.#field.as_deref().map_or(#related::Null, |v| #related::One(v))
        },
        RelationShape::Many { boxed: false } => quote! {
            #related::Many(self.#field.iter().map(|v| #item::Entity(v)).collect())
        },
        RelationShape::Many { boxed: true } => quote! {
            #related::Many(self.#field.iter().map(|v| #item::Entity(&**v)).collect())
        },
        RelationShape::Keyed { boxed: false } => quote! {
            #related::Keyed(
                self.#field
                    .iter()
                    .map(|(k, v)| (::std::string::ToString::to_string(k), #item::Entity(v)))
                    .collect(),
            )
        },
        RelationShape::Keyed { boxed: true } => quote! {
            #related::Keyed(
                self.#field
                    .iter()
                    .map(|(k, v)| (::std::string::ToString::to_string(k), #item::Entity(&**v)))
                    .collect(),
            )
        },
    }
}

// collections are never updated in place
fn related_mut_expr(field: &Ident, shape: RelationShape) -> TokenStream {
    let related = quote!(::dictalchemy::traits::RelatedMut);

    match shape {
        RelationShape::One { boxed: false } => quote!(#related::One(&mut self.#field)),
        RelationShape::One { boxed: true } => quote!(#related::One(&mut *self.#field)),
        RelationShape::Opt { boxed: false } => quote! {
            self.#field.as_mut().map_or(#related::Null, |v| #related::One(v))
        },
        RelationShape::Opt { boxed: true } => quote! {
            self.#field.as_deref_mut().map_or(#related::Null, |v| #related::One(v))
        },
        RelationShape::Many { .. } | RelationShape::Keyed { .. } => quote!(#related::Many),
    }
}

///
/// Dictable
///

fn dictable_impl(input: &DeriveInput, entity: &EntityAttrs) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let declared = entity.declares_config().then(|| declared_config(entity));
    let via = (!entity.serializers.is_empty()).then(|| asdict_via(entity));

    quote! {
        impl #impl_generics ::dictalchemy::traits::Dictable for #ident #ty_generics #where_clause {
            #declared
            #via
        }
    }
}

fn declared_config(entity: &EntityAttrs) -> TokenStream {
    let mut builders = Vec::new();
    if let Some(names) = &entity.exclude {
        builders.push(quote!(.with_exclude::<_, &str>([#(#names),*])));
    }
    if let Some(flag) = &entity.exclude_underscore {
        builders.push(quote!(.with_exclude_underscore(#flag)));
    }
    if let Some(flag) = &entity.fromdict_allow_pk {
        builders.push(quote!(.with_fromdict_allow_pk(#flag)));
    }
    if let Some(names) = &entity.asdict_include {
        builders.push(quote!(.with_asdict_include::<_, &str>([#(#names),*])));
    }
    if let Some(names) = &entity.fromdict_include {
        builders.push(quote!(.with_fromdict_include::<_, &str>([#(#names),*])));
    }

    quote! {
        fn declared_config(&self) -> ::dictalchemy::config::DictConfig {
            ::dictalchemy::config::DictConfig::new() #(#builders)*
        }
    }
}

// named serializers first, then the built-in `asdict`
fn asdict_via(entity: &EntityAttrs) -> TokenStream {
    let arms = entity.serializers.iter().map(|serializer| {
        let name = &serializer.name;
        let with = &serializer.with;

        quote! { #name => ::std::option::Option::Some(#with(self, options)), }
    });

    quote! {
        fn asdict_via(
            &self,
            method: &str,
            options: &::dictalchemy::options::AsDictOptions,
        ) -> ::std::option::Option<
            ::std::result::Result<::dictalchemy::value::DictMap, ::dictalchemy::error::DictError>,
        > {
            match method {
                #(#arms)*
                ::dictalchemy::config::DEFAULT_METHOD => ::std::option::Option::Some(
                    ::dictalchemy::traits::Dictable::asdict_with(self, options),
                ),
                _ => ::std::option::Option::None,
            }
        }
    }
}
