use syn::{
    Attribute, Error, Field, Ident, LitBool, LitStr, Path, Token, bracketed, ext::IdentExt,
    meta::ParseNestedMeta, punctuated::Punctuated,
};

const ATTR: &str = "dict";

///
/// EntityAttrs
/// Struct-level `#[dict(...)]` options.
///

#[derive(Default)]
pub struct EntityAttrs {
    pub entity_name: Option<LitStr>,
    pub exclude: Option<Vec<LitStr>>,
    pub exclude_underscore: Option<LitBool>,
    pub fromdict_allow_pk: Option<LitBool>,
    pub asdict_include: Option<Vec<LitStr>>,
    pub fromdict_include: Option<Vec<LitStr>>,
    pub synonyms: Vec<Synonym>,
    pub serializers: Vec<Serializer>,
}

impl EntityAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self, Error> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("entity_name") {
                    out.entity_name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("exclude") {
                    out.exclude = Some(parse_names(&meta)?);
                } else if meta.path.is_ident("exclude_underscore") {
                    out.exclude_underscore = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("fromdict_allow_pk") {
                    out.fromdict_allow_pk = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("asdict_include") {
                    out.asdict_include = Some(parse_names(&meta)?);
                } else if meta.path.is_ident("fromdict_include") {
                    out.fromdict_include = Some(parse_names(&meta)?);
                } else if meta.path.is_ident("synonym") {
                    out.synonyms.push(Synonym::parse(&meta)?);
                } else if meta.path.is_ident("serializer") {
                    out.serializers.push(Serializer::parse(&meta)?);
                } else {
                    return Err(meta.error("unknown dict attribute on struct"));
                }

                Ok(())
            })?;
        }

        Ok(out)
    }

    /// True when any class-level default is overridden.
    pub const fn declares_config(&self) -> bool {
        self.exclude.is_some()
            || self.exclude_underscore.is_some()
            || self.fromdict_allow_pk.is_some()
            || self.asdict_include.is_some()
            || self.fromdict_include.is_some()
    }
}

///
/// Synonym
///

pub struct Synonym {
    pub name: LitStr,
    pub target: LitStr,
}

impl Synonym {
    fn parse(meta: &ParseNestedMeta) -> Result<Self, Error> {
        let mut name = None;
        let mut target = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("target") {
                target = Some(inner.value()?.parse()?);
            } else {
                return Err(inner.error("expected `name` or `target`"));
            }

            Ok(())
        })?;

        match (name, target) {
            (Some(name), Some(target)) => Ok(Self { name, target }),
            _ => Err(meta.error("synonym requires both `name` and `target`")),
        }
    }
}

///
/// Serializer
/// Named serializer: `serializer(name = "..", with = "path::to::fn")`.
///

pub struct Serializer {
    pub name: LitStr,
    pub with: Path,
}

impl Serializer {
    fn parse(meta: &ParseNestedMeta) -> Result<Self, Error> {
        let mut name: Option<LitStr> = None;
        let mut with: Option<Path> = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("with") {
                let lit: LitStr = inner.value()?.parse()?;
                with = Some(lit.parse()?);
            } else {
                return Err(inner.error("expected `name` or `with`"));
            }

            Ok(())
        })?;

        match (name, with) {
            (Some(name), Some(with)) => Ok(Self { name, with }),
            _ => Err(meta.error("serializer requires both `name` and `with`")),
        }
    }
}

///
/// FieldRole
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldRole {
    Column,
    Relation,
    Property,
    Skip,
}

///
/// FieldAttrs
/// Field-level `#[dict(...)]` options.
///

pub struct FieldAttrs {
    pub name: String,
    pub role: FieldRole,
    pub column: Option<LitStr>,
    pub primary_key: bool,
}

impl FieldAttrs {
    pub fn parse(field: &Field, ident: &Ident) -> Result<Self, Error> {
        let mut role: Option<(FieldRole, Ident)> = None;
        let mut column: Option<LitStr> = None;
        let mut primary_key = false;

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(ATTR)) {
            attr.parse_nested_meta(|meta| {
                let Some(key) = meta.path.get_ident().cloned() else {
                    return Err(meta.error("unknown dict attribute on field"));
                };

                match key.to_string().as_str() {
                    "primary_key" => primary_key = true,
                    "column" => column = Some(meta.value()?.parse()?),
                    "relation" => set_role(&mut role, FieldRole::Relation, key)?,
                    "property" => set_role(&mut role, FieldRole::Property, key)?,
                    "skip" => set_role(&mut role, FieldRole::Skip, key)?,
                    _ => return Err(meta.error("unknown dict attribute on field")),
                }

                Ok(())
            })?;
        }

        let role = match role {
            None => FieldRole::Column,
            Some((role, key)) => {
                if primary_key || column.is_some() {
                    return Err(Error::new_spanned(
                        key,
                        "`primary_key` and `column` only apply to column fields",
                    ));
                }
                role
            }
        };

        Ok(Self {
            name: ident.unraw().to_string(),
            role,
            column,
            primary_key,
        })
    }

    /// Storage column name; defaults to the attribute name.
    pub fn column_name(&self) -> String {
        self.column
            .as_ref()
            .map_or_else(|| self.name.clone(), LitStr::value)
    }

    /// Readable and writable through `get_attr` / `set_attr`.
    pub fn is_accessible(&self) -> bool {
        matches!(self.role, FieldRole::Column | FieldRole::Property)
    }
}

fn set_role(slot: &mut Option<(FieldRole, Ident)>, role: FieldRole, key: Ident) -> Result<(), Error> {
    if let Some((_, previous)) = slot {
        return Err(Error::new_spanned(
            key,
            format!("field already marked `{previous}`"),
        ));
    }
    *slot = Some((role, key));

    Ok(())
}

// ["a", "b"]
fn parse_names(meta: &ParseNestedMeta) -> Result<Vec<LitStr>, Error> {
    let value = meta.value()?;
    let content;
    bracketed!(content in value);
    let names = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;

    Ok(names.into_iter().collect())
}
