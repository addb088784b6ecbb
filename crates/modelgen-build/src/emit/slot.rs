use derive_more::Display;
use serde::Serialize;
use std::{fmt, sync::LazyLock};

///
/// Surface
///
/// One output surface of a generated class. Declared in emission order.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Surface {
    #[display("declaration")]
    Declaration,

    #[display("impl-declaration")]
    ImplDeclaration,

    #[display("impl-definition")]
    ImplDefinition,

    #[display("definition")]
    Definition,

    #[display("test")]
    Test,
}

impl Surface {
    /// Surfaces that carry class sections.
    pub const CLASS: [Self; 4] = [
        Self::Declaration,
        Self::ImplDeclaration,
        Self::ImplDefinition,
        Self::Definition,
    ];
}

///
/// Section
///
/// Part of a surface. Declared in emission order.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Section {
    #[display("includes")]
    Includes,

    #[display("forward-declarations")]
    ForwardDeclarations,

    #[display("preamble")]
    Preamble,

    #[display("type-aliases")]
    TypeAliases,

    #[display("constructors")]
    Constructors,

    #[display("public-methods")]
    PublicMethods,

    #[display("protected")]
    Protected,

    #[display("private")]
    Private,

    #[display("post-class")]
    PostClass,

    #[display("test-scaffold")]
    TestScaffold,
}

impl Section {
    /// Sections every class surface carries.
    pub const CLASS: [Self; 9] = [
        Self::Includes,
        Self::ForwardDeclarations,
        Self::Preamble,
        Self::TypeAliases,
        Self::Constructors,
        Self::PublicMethods,
        Self::Protected,
        Self::Private,
        Self::PostClass,
    ];
}

///
/// FragmentSlot
///
/// Ordering follows emission order, so a `BTreeMap` keyed by slot iterates
/// the way the emitter writes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FragmentSlot {
    pub surface: Surface,
    pub section: Section,
}

impl FragmentSlot {
    #[must_use]
    pub const fn new(surface: Surface, section: Section) -> Self {
        Self { surface, section }
    }

    pub const TEST_SCAFFOLD: Self = Self::new(Surface::Test, Section::TestScaffold);
}

impl fmt::Display for FragmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::TEST_SCAFFOLD {
            write!(f, "{}", self.section)
        } else {
            write!(f, "{}-{}", self.surface, self.section)
        }
    }
}

///
/// FRAGMENT_ORDER
///
/// The single emission order shared by every role.
///

pub static FRAGMENT_ORDER: LazyLock<Vec<FragmentSlot>> = LazyLock::new(|| {
    Surface::CLASS
        .iter()
        .flat_map(|&surface| {
            Section::CLASS
                .iter()
                .map(move |&section| FragmentSlot::new(surface, section))
        })
        .chain(std::iter::once(FragmentSlot::TEST_SCAFFOLD))
        .collect()
});
