//! Crafted PE images for reader and end-to-end tests.
//!
//! [`ImageBuilder`] writes a minimal PE32 DLL with a single `.text` section holding the CLR
//! header, the method bodies and the metadata. All heaps and tables are small, so every index is
//! two bytes wide.
//!
//! Types are declared in order; [`ImageBuilder::field`] and [`ImageBuilder::method`] attach to the
//! most recently declared type, which keeps the `FieldList` / `MethodList` runs contiguous and
//! makes every returned token final.

use std::collections::HashMap;

use crate::metadata::{tables::TableId, token::Token};

const TEXT_RVA: u32 = 0x2000;
const FILE_ALIGNMENT: usize = 0x200;
const SECTION_ALIGNMENT: usize = 0x2000;
const COR20_SIZE: usize = 72;

/// `TypeAttributes` of a public class
pub(crate) const CLASS: u32 = 0x0010_0001;
/// `TypeAttributes` of a public interface
pub(crate) const INTERFACE: u32 = 0x0000_00A1;
/// `TypeAttributes` of a sealed public value type
pub(crate) const SEALED: u32 = 0x0010_0101;
/// `TypeAttributes` of a nested public class
pub(crate) const NESTED: u32 = 0x0010_0002;

/// `MethodAttributes` of a public instance constructor
pub(crate) const CTOR: u16 = 0x1886;
/// `MethodAttributes` of a public instance method
pub(crate) const METHOD: u16 = 0x0086;
/// `MethodAttributes` of a public static method
pub(crate) const STATIC: u16 = 0x0096;
/// `MethodAttributes` of an abstract interface method
pub(crate) const ABSTRACT: u16 = 0x05C6;

/// `FieldAttributes` of a private instance field
pub(crate) const FIELD: u16 = 0x0001;

fn align(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

/// Compressed unsigned integer, ECMA-335 II.23.2
pub(crate) fn compress(value: u32) -> Vec<u8> {
    match value {
        0..=0x7F => vec![value as u8],
        0x80..=0x3FFF => vec![0x80 | (value >> 8) as u8, value as u8],
        _ => vec![
            0xC0 | (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ],
    }
}

/// Signature blob encoders
pub(crate) mod sig {
    use super::compress;
    use crate::metadata::token::Token;

    pub(crate) const VOID: &[u8] = &[0x01];
    pub(crate) const I4: &[u8] = &[0x08];
    pub(crate) const STRING: &[u8] = &[0x0E];
    pub(crate) const OBJECT: &[u8] = &[0x1C];

    fn type_def_or_ref(token: Token) -> Vec<u8> {
        let tag = match token.table() {
            0x02 => 0,
            0x01 => 1,
            0x1B => 2,
            other => panic!("not a TypeDefOrRef table - {other}"),
        };
        compress((token.row() << 2) | tag)
    }

    /// `CLASS` of a `TypeDef`, `TypeRef` or `TypeSpec`
    pub(crate) fn class(token: Token) -> Vec<u8> {
        let mut blob = vec![0x12];
        blob.extend(type_def_or_ref(token));
        blob
    }

    /// `VALUETYPE` of a `TypeDef`, `TypeRef` or `TypeSpec`
    pub(crate) fn value_type(token: Token) -> Vec<u8> {
        let mut blob = vec![0x11];
        blob.extend(type_def_or_ref(token));
        blob
    }

    /// `GENERICINST` of the generic `base` (a [`class`] or [`value_type`])
    pub(crate) fn generic_inst(base: &[u8], arguments: &[&[u8]]) -> Vec<u8> {
        let mut blob = vec![0x15];
        blob.extend_from_slice(base);
        blob.extend(compress(arguments.len() as u32));
        for argument in arguments {
            blob.extend_from_slice(argument);
        }
        blob
    }

    /// Single dimensional, zero based array
    pub(crate) fn sz_array(element: &[u8]) -> Vec<u8> {
        let mut blob = vec![0x1D];
        blob.extend_from_slice(element);
        blob
    }

    /// Managed pointer
    pub(crate) fn by_ref(inner: &[u8]) -> Vec<u8> {
        let mut blob = vec![0x10];
        blob.extend_from_slice(inner);
        blob
    }

    /// `FieldSig`
    pub(crate) fn field(ty: &[u8]) -> Vec<u8> {
        let mut blob = vec![0x06];
        blob.extend_from_slice(ty);
        blob
    }

    /// `MethodDefSig` with the default calling convention
    pub(crate) fn method(has_this: bool, ret: &[u8], params: &[&[u8]]) -> Vec<u8> {
        let mut blob = vec![if has_this { 0x20 } else { 0x00 }];
        blob.extend(compress(params.len() as u32));
        blob.extend_from_slice(ret);
        for param in params {
            blob.extend_from_slice(param);
        }
        blob
    }
}

/// CIL code encoder
#[derive(Debug, Default, Clone)]
pub(crate) struct Il(Vec<u8>);

impl Il {
    pub(crate) fn new() -> Self {
        Il::default()
    }

    fn token_op(mut self, opcode: u8, token: Token) -> Self {
        self.0.push(opcode);
        self.0.extend_from_slice(&token.value().to_le_bytes());
        self
    }

    pub(crate) fn ldarg(mut self, index: u8) -> Self {
        assert!(index < 4);
        self.0.push(0x02 + index);
        self
    }

    pub(crate) fn ldnull(mut self) -> Self {
        self.0.push(0x14);
        self
    }

    pub(crate) fn ldc_i4(mut self, value: i32) -> Self {
        self.0.push(0x20);
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub(crate) fn ldstr(self, token: u32) -> Self {
        self.token_op(0x72, Token::new(token))
    }

    pub(crate) fn call(self, method: Token) -> Self {
        self.token_op(0x28, method)
    }

    pub(crate) fn newobj(self, constructor: Token) -> Self {
        self.token_op(0x73, constructor)
    }

    pub(crate) fn stfld(self, field: Token) -> Self {
        self.token_op(0x7D, field)
    }

    pub(crate) fn stsfld(self, field: Token) -> Self {
        self.token_op(0x80, field)
    }

    pub(crate) fn pop(mut self) -> Self {
        self.0.push(0x26);
        self
    }

    pub(crate) fn ret(mut self) -> Self {
        self.0.push(0x2A);
        self
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// An append-only heap that stores each distinct entry once
#[derive(Debug, Clone)]
struct Heap {
    data: Vec<u8>,
    index: HashMap<Vec<u8>, u32>,
}

impl Heap {
    fn new() -> Self {
        Heap {
            data: vec![0],
            index: HashMap::new(),
        }
    }

    fn string(&mut self, value: &str) -> u32 {
        if value.is_empty() {
            return 0;
        }

        let mut entry = value.as_bytes().to_vec();
        entry.push(0);
        self.insert(entry)
    }

    fn blob(&mut self, value: &[u8]) -> u32 {
        if value.is_empty() {
            return 0;
        }

        let mut entry = compress(value.len() as u32);
        entry.extend_from_slice(value);
        self.insert(entry)
    }

    fn insert(&mut self, entry: Vec<u8>) -> u32 {
        if let Some(offset) = self.index.get(&entry) {
            return *offset;
        }

        let offset = self.data.len() as u32;
        self.data.extend_from_slice(&entry);
        self.index.insert(entry, offset);
        offset
    }
}

/// Coded index tags, shifted by the tag width of the coded index kind
fn coded(token: Token, slots: &[u8], tag_bits: u32) -> u16 {
    if token.is_null() {
        return 0;
    }

    let Some(tag) = slots.iter().position(|table| *table == token.table()) else {
        panic!("{token} can not be stored in this coded index");
    };
    ((token.row() << tag_bits) | tag as u32) as u16
}

fn type_def_or_ref(token: Token) -> u16 {
    coded(token, &[0x02, 0x01, 0x1B], 2)
}

fn resolution_scope(token: Token) -> u16 {
    coded(token, &[0x00, 0x1A, 0x23, 0x01], 2)
}

fn member_ref_parent(token: Token) -> u16 {
    coded(token, &[0x02, 0x01, 0x1A, 0x06, 0x1B], 3)
}

fn put(image: &mut [u8], offset: usize, bytes: &[u8]) {
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn u16s(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_le_bytes()).collect()
}

#[derive(Debug, Clone)]
struct TypeDefRow {
    flags: u32,
    name: u32,
    namespace: u32,
    extends: Token,
    field_list: u16,
    method_list: u16,
}

/// Builder of a minimal .NET PE image
#[derive(Debug, Clone)]
pub(crate) struct ImageBuilder {
    strings: Heap,
    blobs: Heap,
    mvid: [u8; 16],
    module_name: u32,
    assembly_name: Option<u32>,
    assembly_refs: Vec<u16>,
    module_refs: Vec<u16>,
    type_refs: Vec<[u16; 3]>,
    type_defs: Vec<TypeDefRow>,
    fields: Vec<[u16; 3]>,
    methods: Vec<(u32, [u16; 4])>,
    interface_impls: Vec<[u16; 2]>,
    member_refs: Vec<[u16; 3]>,
    type_specs: Vec<u16>,
    nested: Vec<[u16; 2]>,
    bodies: Vec<u8>,
}

impl ImageBuilder {
    /// An image of the assembly `name` (module `name.dll`) holding only the `<Module>` type
    pub(crate) fn new(name: &str) -> Self {
        let mut strings = Heap::new();
        let module_name = strings.string(&format!("{name}.dll"));
        let assembly_name = Some(strings.string(name));

        let mut builder = ImageBuilder {
            strings,
            blobs: Heap::new(),
            mvid: [
                0x6F, 0x2A, 0x4C, 0x1B, 0x93, 0x0E, 0x4D, 0x52, 0xA7, 0x11, 0x3C, 0x5E, 0x80, 0x09,
                0xD4, 0x26,
            ],
            module_name,
            assembly_name,
            assembly_refs: Vec::new(),
            module_refs: Vec::new(),
            type_refs: Vec::new(),
            type_defs: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            interface_impls: Vec::new(),
            member_refs: Vec::new(),
            type_specs: Vec::new(),
            nested: Vec::new(),
            bodies: Vec::new(),
        };

        builder.type_def("", "<Module>", 0, None);
        builder
    }

    /// Drop the Assembly row, leaving a bare module
    pub(crate) fn without_assembly(mut self) -> Self {
        self.assembly_name = None;
        self
    }

    /// The `Module` row, for `TypeRef`s scoped to this module
    pub(crate) fn module(&self) -> Token {
        Token::from_parts(TableId::Module, 1)
    }

    pub(crate) fn assembly_ref(&mut self, name: &str) -> Token {
        let name = self.strings.string(name) as u16;
        self.assembly_refs.push(name);
        Token::from_parts(TableId::AssemblyRef, self.assembly_refs.len() as u32)
    }

    pub(crate) fn module_ref(&mut self, name: &str) -> Token {
        let name = self.strings.string(name) as u16;
        self.module_refs.push(name);
        Token::from_parts(TableId::ModuleRef, self.module_refs.len() as u32)
    }

    pub(crate) fn type_ref(&mut self, scope: Token, namespace: &str, name: &str) -> Token {
        let row = [
            resolution_scope(scope),
            self.strings.string(name) as u16,
            self.strings.string(namespace) as u16,
        ];
        self.type_refs.push(row);
        Token::from_parts(TableId::TypeRef, self.type_refs.len() as u32)
    }

    /// Declare a type; following fields and methods belong to it
    pub(crate) fn type_def(
        &mut self,
        namespace: &str,
        name: &str,
        flags: u32,
        extends: Option<Token>,
    ) -> Token {
        let row = TypeDefRow {
            flags,
            name: self.strings.string(name),
            namespace: self.strings.string(namespace),
            extends: extends.unwrap_or(Token::new(0)),
            field_list: self.fields.len() as u16 + 1,
            method_list: self.methods.len() as u16 + 1,
        };
        self.type_defs.push(row);
        Token::from_parts(TableId::TypeDef, self.type_defs.len() as u32)
    }

    pub(crate) fn nested(&mut self, nested: Token, enclosing: Token) {
        self.nested.push([nested.row() as u16, enclosing.row() as u16]);
    }

    pub(crate) fn interface_impl(&mut self, class: Token, interface: Token) {
        self.interface_impls
            .push([class.row() as u16, type_def_or_ref(interface)]);
    }

    /// Add a field to the last declared type
    pub(crate) fn field(&mut self, name: &str, flags: u16, signature: &[u8]) -> Token {
        let row = [
            flags,
            self.strings.string(name) as u16,
            self.blobs.blob(signature) as u16,
        ];
        self.fields.push(row);
        Token::from_parts(TableId::Field, self.fields.len() as u32)
    }

    /// Add a method to the last declared type, with a tiny or fat body if `body` is given
    pub(crate) fn method(
        &mut self,
        name: &str,
        flags: u16,
        signature: &[u8],
        body: Option<&Il>,
    ) -> Token {
        let rva = match body {
            Some(body) => self.body(body.bytes()),
            None => 0,
        };

        let row = [
            0,
            flags,
            self.strings.string(name) as u16,
            self.blobs.blob(signature) as u16,
        ];
        self.methods.push((rva, row));
        Token::from_parts(TableId::MethodDef, self.methods.len() as u32)
    }

    pub(crate) fn member_ref(&mut self, parent: Token, name: &str, signature: &[u8]) -> Token {
        let row = [
            member_ref_parent(parent),
            self.strings.string(name) as u16,
            self.blobs.blob(signature) as u16,
        ];
        self.member_refs.push(row);
        Token::from_parts(TableId::MemberRef, self.member_refs.len() as u32)
    }

    pub(crate) fn type_spec(&mut self, signature: &[u8]) -> Token {
        let blob = self.blobs.blob(signature) as u16;
        self.type_specs.push(blob);
        Token::from_parts(TableId::TypeSpec, self.type_specs.len() as u32)
    }

    fn body(&mut self, code: &[u8]) -> u32 {
        if code.len() < 64 {
            let rva = TEXT_RVA + (COR20_SIZE + self.bodies.len()) as u32;
            self.bodies.push(((code.len() as u8) << 2) | 0x02);
            self.bodies.extend_from_slice(code);
            return rva;
        }

        self.bodies.resize(align(self.bodies.len(), 4), 0);
        let rva = TEXT_RVA + (COR20_SIZE + self.bodies.len()) as u32;
        self.bodies.extend_from_slice(&0x3003_u16.to_le_bytes());
        self.bodies.extend_from_slice(&8_u16.to_le_bytes());
        self.bodies.extend_from_slice(&(code.len() as u32).to_le_bytes());
        self.bodies.extend_from_slice(&0_u32.to_le_bytes());
        self.bodies.extend_from_slice(code);
        rva
    }

    fn tables_stream(&self) -> Vec<u8> {
        let mut rows: Vec<(TableId, Vec<Vec<u8>>)> = Vec::new();

        rows.push((
            TableId::Module,
            vec![u16s(&[0, self.module_name as u16, 1, 0, 0])],
        ));
        rows.push((TableId::TypeRef, self.type_refs.iter().map(|r| u16s(r)).collect()));
        rows.push((
            TableId::TypeDef,
            self.type_defs
                .iter()
                .map(|row| {
                    let mut bytes = row.flags.to_le_bytes().to_vec();
                    bytes.extend(u16s(&[
                        row.name as u16,
                        row.namespace as u16,
                        type_def_or_ref(row.extends),
                        row.field_list,
                        row.method_list,
                    ]));
                    bytes
                })
                .collect(),
        ));
        rows.push((TableId::Field, self.fields.iter().map(|r| u16s(r)).collect()));
        rows.push((
            TableId::MethodDef,
            self.methods
                .iter()
                .map(|(rva, row)| {
                    let mut bytes = rva.to_le_bytes().to_vec();
                    bytes.extend(u16s(row));
                    bytes.extend(u16s(&[1]));
                    bytes
                })
                .collect(),
        ));
        rows.push((
            TableId::InterfaceImpl,
            self.interface_impls.iter().map(|r| u16s(r)).collect(),
        ));
        rows.push((TableId::MemberRef, self.member_refs.iter().map(|r| u16s(r)).collect()));
        rows.push((TableId::ModuleRef, self.module_refs.iter().map(|r| u16s(&[*r])).collect()));
        rows.push((TableId::TypeSpec, self.type_specs.iter().map(|r| u16s(&[*r])).collect()));
        if let Some(name) = self.assembly_name {
            let mut bytes = 0x8004_u32.to_le_bytes().to_vec();
            bytes.extend(u16s(&[1, 0, 0, 0]));
            bytes.extend(0_u32.to_le_bytes());
            bytes.extend(u16s(&[0, name as u16, 0]));
            rows.push((TableId::Assembly, vec![bytes]));
        }
        rows.push((
            TableId::AssemblyRef,
            self.assembly_refs
                .iter()
                .map(|name| {
                    let mut bytes = u16s(&[8, 0, 0, 0]);
                    bytes.extend(0_u32.to_le_bytes());
                    bytes.extend(u16s(&[0, *name, 0, 0]));
                    bytes
                })
                .collect(),
        ));
        rows.push((TableId::NestedClass, self.nested.iter().map(|r| u16s(r)).collect()));

        rows.retain(|(_, table)| !table.is_empty());
        rows.sort_by_key(|(table, _)| *table as u8);

        let valid = rows
            .iter()
            .fold(0_u64, |valid, (table, _)| valid | (1 << *table as u8));

        let mut stream = vec![0, 0, 0, 0, 2, 0, 0, 1];
        stream.extend(valid.to_le_bytes());
        stream.extend(0_u64.to_le_bytes());
        for (_, table) in &rows {
            stream.extend((table.len() as u32).to_le_bytes());
        }
        for (_, table) in &rows {
            for row in table {
                stream.extend_from_slice(row);
            }
        }

        stream.resize(align(stream.len(), 4), 0);
        stream
    }

    fn metadata(&self) -> Vec<u8> {
        let mut guids = self.mvid.to_vec();
        guids.resize(16, 0);

        let mut strings = self.strings.data.clone();
        strings.resize(align(strings.len(), 4), 0);
        let mut blobs = self.blobs.data.clone();
        blobs.resize(align(blobs.len(), 4), 0);

        let streams = [
            ("#~", self.tables_stream()),
            ("#Strings", strings),
            ("#GUID", guids),
            ("#Blob", blobs),
        ];

        let version = b"v4.0.30319\0\0";
        let headers_len: usize = streams
            .iter()
            .map(|(name, _)| 8 + align(name.len() + 1, 4))
            .sum();

        let mut root = Vec::new();
        root.extend(0x424A_5342_u32.to_le_bytes());
        root.extend(1_u16.to_le_bytes());
        root.extend(1_u16.to_le_bytes());
        root.extend(0_u32.to_le_bytes());
        root.extend((version.len() as u32).to_le_bytes());
        root.extend_from_slice(version);
        root.extend(0_u16.to_le_bytes());
        root.extend((streams.len() as u16).to_le_bytes());

        let mut offset = root.len() + headers_len;
        for (name, data) in &streams {
            root.extend((offset as u32).to_le_bytes());
            root.extend((data.len() as u32).to_le_bytes());
            let mut padded = name.as_bytes().to_vec();
            padded.resize(align(name.len() + 1, 4), 0);
            root.extend(padded);
            offset += data.len();
        }

        for (_, data) in &streams {
            root.extend_from_slice(data);
        }

        root
    }

    /// Write the PE image
    pub(crate) fn build(&self) -> Vec<u8> {
        let metadata = self.metadata();
        let metadata_offset = align(COR20_SIZE + self.bodies.len(), 4);

        let mut text = Vec::new();
        text.extend(72_u32.to_le_bytes());
        text.extend(2_u16.to_le_bytes());
        text.extend(5_u16.to_le_bytes());
        text.extend((TEXT_RVA + metadata_offset as u32).to_le_bytes());
        text.extend((metadata.len() as u32).to_le_bytes());
        text.extend(1_u32.to_le_bytes());
        text.resize(COR20_SIZE, 0);
        text.extend_from_slice(&self.bodies);
        text.resize(metadata_offset, 0);
        text.extend_from_slice(&metadata);

        let virtual_size = text.len();
        let raw_size = align(text.len(), FILE_ALIGNMENT);
        text.resize(raw_size, 0);

        let mut image = vec![0_u8; FILE_ALIGNMENT];

        // DOS header
        put(&mut image, 0x00, b"MZ");
        put(&mut image, 0x3C, &0x80_u32.to_le_bytes());

        // PE signature and COFF header
        put(&mut image, 0x80, b"PE\0\0");
        put(&mut image, 0x84, &0x014C_u16.to_le_bytes());
        put(&mut image, 0x86, &1_u16.to_le_bytes());
        put(&mut image, 0x94, &0xE0_u16.to_le_bytes());
        put(&mut image, 0x96, &0x2102_u16.to_le_bytes());

        // PE32 optional header
        put(&mut image, 0x98, &0x010B_u16.to_le_bytes());
        put(&mut image, 0x9A, &[8, 0]);
        put(&mut image, 0x9C, &(raw_size as u32).to_le_bytes());
        put(&mut image, 0xAC, &TEXT_RVA.to_le_bytes());
        put(&mut image, 0xB4, &0x1000_0000_u32.to_le_bytes());
        put(&mut image, 0xB8, &(SECTION_ALIGNMENT as u32).to_le_bytes());
        put(&mut image, 0xBC, &(FILE_ALIGNMENT as u32).to_le_bytes());
        put(&mut image, 0xC0, &4_u16.to_le_bytes());
        put(&mut image, 0xC8, &4_u16.to_le_bytes());
        put(
            &mut image,
            0xD0,
            &((SECTION_ALIGNMENT + align(virtual_size, SECTION_ALIGNMENT)) as u32).to_le_bytes(),
        );
        put(&mut image, 0xD4, &(FILE_ALIGNMENT as u32).to_le_bytes());
        put(&mut image, 0xDC, &3_u16.to_le_bytes());
        put(&mut image, 0xDE, &0x8540_u16.to_le_bytes());
        put(&mut image, 0xE0, &0x0010_0000_u32.to_le_bytes());
        put(&mut image, 0xE4, &0x1000_u32.to_le_bytes());
        put(&mut image, 0xE8, &0x0010_0000_u32.to_le_bytes());
        put(&mut image, 0xEC, &0x1000_u32.to_le_bytes());
        put(&mut image, 0xF4, &16_u32.to_le_bytes());

        // CLR runtime header directory
        put(&mut image, 0xF8 + 14 * 8, &TEXT_RVA.to_le_bytes());
        put(&mut image, 0xFC + 14 * 8, &(COR20_SIZE as u32).to_le_bytes());

        // .text section header
        put(&mut image, 0x178, b".text\0\0\0");
        put(&mut image, 0x180, &(virtual_size as u32).to_le_bytes());
        put(&mut image, 0x184, &TEXT_RVA.to_le_bytes());
        put(&mut image, 0x188, &(raw_size as u32).to_le_bytes());
        put(&mut image, 0x18C, &(FILE_ALIGNMENT as u32).to_le_bytes());
        put(&mut image, 0x19C, &0x6000_0020_u32.to_le_bytes());

        image.extend(text);
        image
    }
}

/// The image used by the reader tests: a small car shop.
///
/// ```text
/// namespace Shop {
///     interface IVehicle { }
///     class Wheel { Wheel() }
///     struct Speed { }
///     enum Color { }
///     class Car : IVehicle {
///         Wheel wheel; Speed speed; int doors; List<Wheel> spares; string label;
///         Car(Wheel w) { this.wheel = w; this.spares = new List<Wheel>(); }
///         void Repair(Garage g) { new Wheel(); new Garage(); }
///         static Car Build() { return new Car(null); }
///         class Engine { }
///     }
///     class Garage { }
/// }
/// ```
pub(crate) fn shop_image() -> Vec<u8> {
    let mut image = ImageBuilder::new("Shop");
    let runtime = image.assembly_ref("System.Runtime");
    let collections = image.assembly_ref("System.Collections");

    let object = image.type_ref(runtime, "System", "Object");
    let value_type = image.type_ref(runtime, "System", "ValueType");
    let enum_type = image.type_ref(runtime, "System", "Enum");
    let list = image.type_ref(collections, "System.Collections.Generic", "List`1");

    let object_ctor = image.member_ref(object, ".ctor", &sig::method(true, sig::VOID, &[]));

    let vehicle = image.type_def("Shop", "IVehicle", INTERFACE, None);

    let wheel = image.type_def("Shop", "Wheel", CLASS, Some(object));
    let wheel_ctor = image.method(
        ".ctor",
        CTOR,
        &sig::method(true, sig::VOID, &[]),
        Some(&Il::new().ldarg(0).call(object_ctor).ret()),
    );

    let speed = image.type_def("Shop", "Speed", SEALED, Some(value_type));
    image.field("value", FIELD, &sig::field(sig::I4));

    image.type_def("Shop", "Color", SEALED, Some(enum_type));
    image.field("value__", 0x0601, &sig::field(sig::I4));

    // Garage is declared after Car, its row id is known up front
    let garage = Token::from_parts(TableId::TypeDef, 8);

    let car = image.type_def("Shop", "Car", CLASS, Some(object));
    image.interface_impl(car, vehicle);

    let wheel_list = image.type_spec(&sig::generic_inst(&sig::class(list), &[&sig::class(wheel)]));
    let list_ctor = image.member_ref(wheel_list, ".ctor", &sig::method(true, sig::VOID, &[]));
    let garage_ctor = image.member_ref(garage, ".ctor", &sig::method(true, sig::VOID, &[]));

    let wheel_field = image.field("wheel", FIELD, &sig::field(&sig::class(wheel)));
    image.field("speed", FIELD, &sig::field(&sig::value_type(speed)));
    image.field("doors", FIELD, &sig::field(sig::I4));
    let spares = image.field(
        "spares",
        FIELD,
        &sig::field(&sig::generic_inst(&sig::class(list), &[&sig::class(wheel)])),
    );
    image.field("label", FIELD, &sig::field(sig::STRING));

    let car_ctor = image.method(
        ".ctor",
        CTOR,
        &sig::method(true, sig::VOID, &[&sig::class(wheel)]),
        Some(
            &Il::new()
                .ldarg(0)
                .call(object_ctor)
                .ldarg(0)
                .ldarg(1)
                .stfld(wheel_field)
                .ldarg(0)
                .newobj(list_ctor)
                .stfld(spares)
                .ret(),
        ),
    );
    image.method(
        "Repair",
        METHOD,
        &sig::method(true, sig::VOID, &[&sig::class(garage)]),
        Some(&Il::new().newobj(wheel_ctor).pop().newobj(garage_ctor).pop().ret()),
    );
    image.method(
        "Build",
        STATIC,
        &sig::method(false, &sig::class(car), &[]),
        Some(&Il::new().ldnull().newobj(car_ctor).ret()),
    );

    let engine = image.type_def("", "Engine", NESTED, Some(object));
    image.nested(engine, car);

    let declared_garage = image.type_def("Shop", "Garage", CLASS, Some(object));
    assert_eq!(declared_garage, garage);
    image.method(
        ".ctor",
        CTOR,
        &sig::method(true, sig::VOID, &[]),
        Some(&Il::new().ldarg(0).call(object_ctor).ret()),
    );

    image.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed() {
        assert_eq!(compress(0x03), vec![0x03]);
        assert_eq!(compress(0x80), vec![0x80, 0x80]);
        assert_eq!(compress(0x4000), vec![0xC0, 0x00, 0x40, 0x00]);
    }

    #[test]
    fn image_is_aligned() {
        let image = ImageBuilder::new("Crafted").build();
        assert_eq!(image.len() % FILE_ALIGNMENT, 0);
        assert_eq!(&image[0..2], b"MZ");
    }
}
