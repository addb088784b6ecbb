use crate::{
    emit::slot::{Section, Surface},
    unit::UnitHeader,
};

///
/// Frame
///
/// Structural text around the fragments of one surface: include guards,
/// namespaces, the class head and access specifiers. Depends only on the
/// unit header, never on the role.
///

pub struct Frame<'a> {
    header: &'a UnitHeader,
}

impl<'a> Frame<'a> {
    #[must_use]
    pub const fn new(header: &'a UnitHeader) -> Self {
        Self { header }
    }

    /// Text written immediately before a section's fragment.
    #[must_use]
    pub fn lead(&self, surface: Surface, section: Section) -> String {
        let UnitHeader {
            class_name: class,
            base_name: base,
            namespace: ns,
            api_macro: api,
        } = self.header;
        let api_header = self.header.api_header();
        let guard = self.header.guard();

        match (surface, section) {
            // X.hpp
            (Surface::Declaration, Section::Includes) => format!(
                "#ifndef {guard}_HPP\n#define {guard}_HPP\n\n#include \"{api_header}\"\n#include \"{base}.hpp\"\n"
            ),
            (Surface::Declaration, Section::ForwardDeclarations) => {
                format!("\nnamespace openstudio {{\nnamespace {ns} {{\n\n")
            }
            (Surface::Declaration, Section::Preamble) => {
                format!("namespace detail {{\n\n  class {class}_Impl;\n\n}} // namespace detail\n\n")
            }
            (Surface::Declaration, Section::TypeAliases) => {
                format!("class {api} {class} : public {base} {{\n public:\n")
            }
            (Surface::Declaration, Section::Constructors) => {
                "  /** @name Constructors and Destructors */\n  //@{\n\n".to_string()
            }
            (Surface::Declaration, Section::PublicMethods) => {
                format!("  virtual ~{class}() {{}}\n\n  //@}}\n\n")
            }
            (Surface::Declaration, Section::Protected) => " protected:\n".to_string(),
            (Surface::Declaration, Section::Private) => " private:\n".to_string(),
            (Surface::Declaration, Section::PostClass) => "};\n\n".to_string(),

            // X_Impl.hpp
            (Surface::ImplDeclaration, Section::Includes) => format!(
                "#ifndef {guard}_IMPL_HPP\n#define {guard}_IMPL_HPP\n\n#include \"{api_header}\"\n#include \"{base}_Impl.hpp\"\n"
            ),
            (Surface::ImplDeclaration, Section::ForwardDeclarations) => {
                format!("\nnamespace openstudio {{\nnamespace {ns} {{\n\n")
            }
            (Surface::ImplDeclaration, Section::Preamble) => "namespace detail {\n\n".to_string(),
            (Surface::ImplDeclaration, Section::TypeAliases) => {
                format!("  class {api} {class}_Impl : public {base}_Impl {{\n   public:\n")
            }
            (Surface::ImplDeclaration, Section::Constructors) => {
                "    /** @name Constructors and Destructors */\n    //@{\n\n".to_string()
            }
            (Surface::ImplDeclaration, Section::PublicMethods) => {
                format!("    virtual ~{class}_Impl() {{}}\n\n    //@}}\n\n")
            }
            (Surface::ImplDeclaration, Section::Protected) => "   protected:\n".to_string(),
            (Surface::ImplDeclaration, Section::Private) => "   private:\n".to_string(),
            (Surface::ImplDeclaration, Section::PostClass) => "  };\n\n".to_string(),

            // X.cpp, implementation half
            (Surface::ImplDefinition, Section::Includes) => {
                format!("#include \"{class}.hpp\"\n#include \"{class}_Impl.hpp\"\n\n")
            }
            (Surface::ImplDefinition, Section::ForwardDeclarations) => {
                format!("\nnamespace openstudio {{\nnamespace {ns} {{\n\n")
            }
            (Surface::ImplDefinition, Section::Preamble) => "namespace detail {\n\n".to_string(),

            _ => String::new(),
        }
    }

    /// Text written after the last section of a surface.
    #[must_use]
    pub fn close(&self, surface: Surface) -> String {
        let ns = &self.header.namespace;
        let guard = self.header.guard();

        match surface {
            Surface::Declaration => {
                format!("}} // namespace {ns}\n}} // namespace openstudio\n\n#endif // {guard}_HPP\n")
            }
            Surface::ImplDeclaration => format!(
                "}} // namespace detail\n\n}} // namespace {ns}\n}} // namespace openstudio\n\n#endif // {guard}_IMPL_HPP\n"
            ),
            Surface::ImplDefinition => "} // namespace detail\n\n".to_string(),
            Surface::Definition => {
                format!("}} // namespace {ns}\n}} // namespace openstudio\n")
            }
            Surface::Test => String::new(),
        }
    }
}
