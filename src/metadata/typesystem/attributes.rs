use bitflags::bitflags;

bitflags! {
    /// `TypeAttributes` of a `TypeDef` row, ECMA-335 II.23.1.15
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeAttributes: u32 {
        /// Mask for the visibility bits
        const VISIBILITY_MASK = 0x0000_0007;
        /// Visible outside the assembly
        const PUBLIC = 0x0000_0001;
        /// Nested, public
        const NESTED_PUBLIC = 0x0000_0002;
        /// Nested, private
        const NESTED_PRIVATE = 0x0000_0003;
        /// Mask for the layout bits
        const LAYOUT_MASK = 0x0000_0018;
        /// Fields are laid out sequentially
        const SEQUENTIAL_LAYOUT = 0x0000_0008;
        /// Layout is supplied explicitly
        const EXPLICIT_LAYOUT = 0x0000_0010;
        /// The type is an interface
        const INTERFACE = 0x0000_0020;
        /// The type is abstract
        const ABSTRACT = 0x0000_0080;
        /// The type can not be derived from
        const SEALED = 0x0000_0100;
        /// The name is special
        const SPECIAL_NAME = 0x0000_0400;
        /// Imported type
        const IMPORT = 0x0000_1000;
        /// Serializable type
        const SERIALIZABLE = 0x0000_2000;
        /// Static initialization may run before the first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
        /// The runtime checks the name encoding
        const RT_SPECIAL_NAME = 0x0000_0800;
    }
}

impl TypeAttributes {
    /// True if the type is nested inside another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        (self.bits() & Self::VISIBILITY_MASK.bits()) > 1
    }
}
