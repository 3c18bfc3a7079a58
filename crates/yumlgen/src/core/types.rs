//! Core type definitions for diagram generation
//!
//! Type and member descriptors are the immutable input to the graph engine.
//! They reference other types by name only; whether a reference turns into an
//! edge is decided later against the catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a type is a class or an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
        }
    }
}

/// Visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    NonPublic,
}

impl Visibility {
    /// Map a UML visibility prefix to a visibility
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' | '#' | '~' => Some(Visibility::NonPublic),
            _ => None,
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// The declared type of a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeShape {
    /// A plain reference: `Claw claw`
    Single { name: String },
    /// A generic wrapper or collection: `IList<Wing>`, `Wing[]`, `Pair<A, B>`
    Container {
        /// Name of the wrapper type itself
        container: String,
        /// Element type for iterable containers, when resolvable
        #[serde(default)]
        element: Option<String>,
        /// Type arguments in declaration order
        #[serde(default)]
        type_arguments: Vec<String>,
        /// Whether the wrapper enumerates its elements
        #[serde(default)]
        iterable: bool,
    },
}

impl TypeShape {
    pub fn single(name: impl Into<String>) -> Self {
        TypeShape::Single { name: name.into() }
    }

    /// Iterable generic collection; the element is the first type argument
    pub fn collection(container: impl Into<String>, element: impl Into<String>) -> Self {
        let element = element.into();
        TypeShape::Container {
            container: container.into(),
            element: Some(element.clone()),
            type_arguments: vec![element],
            iterable: true,
        }
    }

    /// Array of `element`; arrays carry no type arguments
    pub fn array(element: impl Into<String>) -> Self {
        let element = element.into();
        TypeShape::Container {
            container: format!("{}[]", element),
            element: Some(element),
            type_arguments: Vec::new(),
            iterable: true,
        }
    }

    /// Non-iterating generic wrapper such as `Lazy<T>` or `Pair<A, B>`
    pub fn wrapper<I, S>(container: impl Into<String>, type_arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeShape::Container {
            container: container.into(),
            element: None,
            type_arguments: type_arguments.into_iter().map(Into::into).collect(),
            iterable: false,
        }
    }

    /// Name of the outermost declared type
    pub fn type_name(&self) -> &str {
        match self {
            TypeShape::Single { name } => name,
            TypeShape::Container { container, .. } => container,
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Single { name } => write!(f, "{}", name),
            TypeShape::Container {
                container,
                type_arguments,
                ..
            } if !type_arguments.is_empty() => {
                write!(f, "{}<{}>", container, type_arguments.join(", "))
            }
            TypeShape::Container { container, .. } => write!(f, "{}", container),
        }
    }
}

/// A field or property declared directly on a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(rename = "type")]
    pub shape: TypeShape,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            shape,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Everything the generator needs to know about one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(name)
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

/// How interface implementation is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum InterfaceMode {
    /// Interfaces appear as `<<I>>;` tags inside the class node: `[<<I>>;C]`
    #[default]
    Inline,
    /// Interfaces get their own node and a dashed edge: `[<<I>>]^-.-[C]`
    Explicit,
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceMode::Inline => write!(f, "inline"),
            InterfaceMode::Explicit => write!(f, "explicit"),
        }
    }
}

impl FromStr for InterfaceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(InterfaceMode::Inline),
            "explicit" => Ok(InterfaceMode::Explicit),
            _ => Err(format!("Unknown interface mode: {}", s)),
        }
    }
}

/// Options for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GeneratorConfig {
    pub interface_mode: InterfaceMode,
    /// Scan private/protected/internal members too
    pub include_non_public_members: bool,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interface_mode(mut self, mode: InterfaceMode) -> Self {
        self.interface_mode = mode;
        self
    }

    pub fn with_non_public_members(mut self, include: bool) -> Self {
        self.include_non_public_members = include;
        self
    }

    pub fn is_explicit(&self) -> bool {
        self.interface_mode == InterfaceMode::Explicit
    }

    /// Whether a member with this visibility is scanned
    pub fn scans(&self, visibility: Visibility) -> bool {
        visibility.is_public() || self.include_non_public_members
    }
}
