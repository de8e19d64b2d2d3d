use bitflags::bitflags;

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
    /// `MethodAttributes` of a `MethodDef` row, ECMA-335 II.23.1.10
    pub struct MethodModifiers: u32 {
        /// Mask for the member access bits
        const MEMBER_ACCESS_MASK = 0x0007;
        /// Accessible by the declaring type only
        const PRIVATE = 0x0001;
        /// Accessible everywhere
        const PUBLIC = 0x0006;
        /// Defined on the type, not per instance
        const STATIC = 0x0010;
        /// Can not be overridden
        const FINAL = 0x0020;
        /// Virtual method
        const VIRTUAL = 0x0040;
        /// Hidden by name and signature
        const HIDE_BY_SIG = 0x0080;
        /// Method gets a new vtable slot
        const NEW_SLOT = 0x0100;
        /// No implementation is provided
        const ABSTRACT = 0x0400;
        /// The name is special
        const SPECIAL_NAME = 0x0800;
        /// The runtime checks the name encoding, set on constructors
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

bitflags! {
    #[derive(PartialEq, Eq, Debug, Clone, Copy)]
    /// Flags of a method body header, ECMA-335 II.25.4.4
    pub struct MethodBodyFlags: u16 {
        /// Tiny header, the code size is stored in the upper 6 bits
        const TINY_FORMAT = 0x2;
        /// Fat header of at least 12 bytes
        const FAT_FORMAT = 0x3;
        /// Extra data sections follow the code
        const MORE_SECTS = 0x8;
        /// Locals are zero-initialized
        const INIT_LOCALS = 0x10;
    }
}
