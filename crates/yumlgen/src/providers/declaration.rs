//! Declaration source provider
//!
//! Parses a small class-declaration language into type descriptors:
//!
//! ```text
//! interface IShiny
//! class Animal
//! class Bird extends Animal
//! class Key implements IShiny, INotch {
//!     +shine: IShiny
//!     -secret: Secret
//!     notches: List<INotch>
//!     teeth: Tooth[]
//! }
//! ```
//!
//! Members without a visibility prefix are public. `T[]` is always an
//! iterable container; `Name<...>` is iterable when `Name` is one of the
//! provider's iterable container names.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::Result;
use chumsky::prelude::*;
use chumsky::text::{ident, keyword};
use tracing::{debug, span, Level};

use crate::core::chumsky_utils::{
    inline_whitespace, line_column, optional_whitespace, optional_whitespace_or_comment,
    whitespace_required, Extra,
};
use crate::core::{
    DiagramError, MemberDescriptor, MetadataProvider, TypeDescriptor, TypeKind, TypeShape,
    Visibility,
};

/// Container names treated as iterable unless configured otherwise
pub const DEFAULT_ITERABLE_CONTAINERS: &[&str] = &[
    "List",
    "IList",
    "ICollection",
    "IEnumerable",
    "Vec",
    "VecDeque",
    "HashSet",
    "BTreeSet",
    "Set",
    "Collection",
    "Array",
    "Sequence",
    "Iterable",
];

/// A type reference as written: `Name<Args...>[]...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub arguments: Vec<TypeRef>,
    pub array_rank: usize,
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            let arguments: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", arguments.join(", "))?;
        }
        for _ in 0..self.array_rank {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ParsedMember {
    visibility: Option<Visibility>,
    name: String,
    type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
struct ParsedDeclaration {
    kind: TypeKind,
    name: String,
    base: Option<String>,
    interfaces: Vec<String>,
    members: Vec<ParsedMember>,
}

/// Provider reading the declaration language from a string
#[derive(Debug, Clone)]
pub struct DeclarationProvider {
    source: String,
    iterable_containers: HashSet<String>,
}

impl DeclarationProvider {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            iterable_containers: DEFAULT_ITERABLE_CONTAINERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Read the source from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(source))
    }

    /// Treat `name<...>` as an iterable collection
    pub fn with_iterable_container(mut self, name: impl Into<String>) -> Self {
        self.iterable_containers.insert(name.into());
        self
    }

    pub fn is_iterable_container(&self, name: &str) -> bool {
        self.iterable_containers.contains(name)
    }

    /// Parse the source into descriptors, in declaration order
    pub fn parse(&self) -> Result<Vec<TypeDescriptor>, DiagramError> {
        let parse_span = span!(Level::DEBUG, "parse_declarations", input_len = self.source.len());
        let _enter = parse_span.enter();

        let declarations = file_parser()
            .parse(self.source.as_str())
            .into_result()
            .map_err(|errors| parse_error(&self.source, &errors))?;

        debug!(declarations = declarations.len(), "Parsed declarations");
        Ok(declarations
            .into_iter()
            .map(|declaration| self.descriptor(declaration))
            .collect())
    }

    fn descriptor(&self, declaration: ParsedDeclaration) -> TypeDescriptor {
        TypeDescriptor {
            name: declaration.name,
            kind: declaration.kind,
            base: declaration.base,
            interfaces: declaration.interfaces,
            members: declaration
                .members
                .into_iter()
                .map(|member| MemberDescriptor {
                    name: member.name,
                    visibility: member.visibility.unwrap_or_default(),
                    shape: self.shape(&member.type_ref),
                })
                .collect(),
        }
    }

    /// Map a written type reference onto a member shape
    pub fn shape(&self, type_ref: &TypeRef) -> TypeShape {
        if type_ref.array_rank > 0 {
            let element = TypeRef {
                array_rank: type_ref.array_rank - 1,
                ..type_ref.clone()
            };
            return TypeShape::array(element.to_string());
        }
        if type_ref.arguments.is_empty() {
            return TypeShape::single(type_ref.name.clone());
        }

        let arguments: Vec<String> = type_ref.arguments.iter().map(ToString::to_string).collect();
        if self.is_iterable_container(&type_ref.name) {
            TypeShape::Container {
                container: type_ref.name.clone(),
                element: arguments.first().cloned(),
                type_arguments: arguments,
                iterable: true,
            }
        } else {
            TypeShape::wrapper(type_ref.name.clone(), arguments)
        }
    }
}

impl MetadataProvider for DeclarationProvider {
    fn types(&self) -> Result<Vec<TypeDescriptor>> {
        Ok(self.parse()?)
    }

    fn name(&self) -> &'static str {
        "declaration"
    }
}

/// Parse a single type reference such as `Map<String, List<Wing>>[]`
pub fn parse_type_ref(input: &str) -> Result<TypeRef, DiagramError> {
    type_ref_parser()
        .then_ignore(end())
        .parse(input)
        .into_result()
        .map_err(|errors| parse_error(input, &errors))
}

// Only the first error is reported.
fn parse_error(input: &str, errors: &[Rich<'_, char>]) -> DiagramError {
    let (message, offset) = errors
        .first()
        .map(|e| (e.to_string(), e.span().start()))
        .unwrap_or_else(|| ("unexpected end of input".to_string(), input.len()));
    let (line, column) = line_column(input, offset);
    DiagramError::parse_error(message, line, column)
}

fn file_parser<'src>() -> impl Parser<'src, &'src str, Vec<ParsedDeclaration>, Extra<'src>> {
    optional_whitespace_or_comment()
        .ignore_then(
            declaration_parser()
                .then_ignore(optional_whitespace_or_comment())
                .repeated()
                .collect(),
        )
        .then_ignore(end())
}

fn type_name<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    ident()
        .separated_by(just('.'))
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}

fn type_ref_parser<'src>() -> impl Parser<'src, &'src str, TypeRef, Extra<'src>> + Clone {
    recursive(|type_ref| {
        let arguments = type_ref
            .padded_by(inline_whitespace())
            .separated_by(just(','))
            .at_least(1)
            .collect::<Vec<TypeRef>>()
            .delimited_by(just('<'), just('>'));

        type_name()
            .then(arguments.or_not())
            .then(just("[]").repeated().count())
            .map(|((name, arguments), array_rank)| TypeRef {
                name,
                arguments: arguments.unwrap_or_default(),
                array_rank,
            })
    })
}

fn member_parser<'src>() -> impl Parser<'src, &'src str, ParsedMember, Extra<'src>> + Clone {
    let visibility = one_of("+-#~").map(Visibility::from_char).or_not();

    visibility
        .then_ignore(inline_whitespace())
        .then(ident().map(|s: &str| s.to_string()))
        .then_ignore(just(':').padded_by(inline_whitespace()))
        .then(type_ref_parser())
        .then_ignore(inline_whitespace().then(just(';')).or_not())
        .map(|((visibility, name), type_ref)| ParsedMember {
            visibility: visibility.flatten(),
            name,
            type_ref,
        })
}

fn declaration_parser<'src>() -> impl Parser<'src, &'src str, ParsedDeclaration, Extra<'src>> + Clone
{
    let kind = keyword("class")
        .to(TypeKind::Class)
        .or(keyword("interface").to(TypeKind::Interface));

    let extends = whitespace_required()
        .ignore_then(keyword("extends"))
        .ignore_then(whitespace_required())
        .ignore_then(type_name())
        .or_not();

    let implements = whitespace_required()
        .ignore_then(keyword("implements"))
        .ignore_then(whitespace_required())
        .ignore_then(
            type_name()
                .separated_by(just(',').padded_by(optional_whitespace()))
                .at_least(1)
                .collect::<Vec<String>>(),
        )
        .or_not();

    let body = optional_whitespace()
        .ignore_then(just('{'))
        .ignore_then(optional_whitespace_or_comment())
        .ignore_then(
            member_parser()
                .then_ignore(optional_whitespace_or_comment())
                .repeated()
                .collect::<Vec<ParsedMember>>(),
        )
        .then_ignore(just('}'))
        .or_not();

    kind.then_ignore(whitespace_required())
        .then(type_name())
        .then(extends)
        .then(implements)
        .then(body)
        .map(|((((kind, name), base), interfaces), members)| ParsedDeclaration {
            kind,
            name,
            base,
            interfaces: interfaces.unwrap_or_default(),
            members: members.unwrap_or_default(),
        })
}
