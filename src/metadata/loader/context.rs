//! `LoaderContext` - decoded rows and token resolution while a module is loaded.
//!
//! The context is created by [`super::load`] once the streams are parsed, reads the rows of every
//! table the analysis depends on, and is dropped after [`LoaderContext::build`] produced the
//! [`Module`]. Tokens found in signatures and method bodies are resolved against these rows into
//! owned [`TypeRef`]s; nothing of the image outlives the context.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    file::File,
    metadata::{
        method::{
            decoder::{self, NEWOBJ, STFLD},
            FieldStore, Instruction, MethodBody, MethodDefinition, MethodModifiers,
        },
        module::Module,
        signatures::{
            parse_field_signature, parse_method_signature, parse_type_spec_signature,
            TypeSignature,
        },
        streams::{Blob, Guid, Strings, TablesHeader},
        tables::{
            AssemblyRaw, AssemblyRefRaw, FieldRaw, InterfaceImplRaw, MemberRefRaw, MethodDefRaw,
            ModuleRaw, ModuleRefRaw, NestedClassRaw, RowReadable, TableId, TypeDefRaw, TypeRefRaw,
            TypeSpecRaw,
        },
        token::Token,
        typesystem::{FieldDefinition, TypeAttributes, TypeDefinition, TypeRef},
    },
    Error::RecursionLimit,
    Result,
};

/// Deepest chain of nested types, nested type references or `TypeSpec` indirections followed
const MAX_RESOLUTION_DEPTH: usize = 50;

/// `MethodImplAttributes.CodeTypeMask`; zero means the body is CIL
const CODE_TYPE_MASK: u32 = 0x0003;

/// Assemblies defining `System.Object`, in the order a reference to them is preferred
const CORE_LIBRARIES: [&str; 4] =
    ["System.Private.CoreLib", "System.Runtime", "netstandard", "mscorlib"];

/// Decode all rows of the table holding `T`
fn rows<T: RowReadable>(tables: &TablesHeader) -> Result<Vec<T>> {
    match tables.table::<T>() {
        Some(table) => table.iter().collect(),
        None => Ok(Vec::new()),
    }
}

/// Maps each row of a member table (1-based) to the `TypeDef` row owning it, following the
/// `FieldList` / `MethodList` runs of the `TypeDef` table
fn owners(
    type_defs: &[TypeDefRaw],
    member_count: usize,
    list: impl Fn(&TypeDefRaw) -> u32,
) -> Vec<u32> {
    let mut owners = vec![0; member_count];

    for (index, type_def) in type_defs.iter().enumerate() {
        let start = list(type_def).max(1) as usize;
        let end = type_defs
            .get(index + 1)
            .map_or(member_count + 1, |next| list(next) as usize)
            .min(member_count + 1);

        for rid in start..end {
            owners[rid - 1] = type_def.rid;
        }
    }

    owners
}

/// Name of a signature type without a definition of its own
fn builtin_name(signature: &TypeSignature) -> Option<&'static str> {
    Some(match signature {
        TypeSignature::Void => "System.Void",
        TypeSignature::Boolean => "System.Boolean",
        TypeSignature::Char => "System.Char",
        TypeSignature::I1 => "System.SByte",
        TypeSignature::U1 => "System.Byte",
        TypeSignature::I2 => "System.Int16",
        TypeSignature::U2 => "System.UInt16",
        TypeSignature::I4 => "System.Int32",
        TypeSignature::U4 => "System.UInt32",
        TypeSignature::I8 => "System.Int64",
        TypeSignature::U8 => "System.UInt64",
        TypeSignature::R4 => "System.Single",
        TypeSignature::R8 => "System.Double",
        TypeSignature::I => "System.IntPtr",
        TypeSignature::U => "System.UIntPtr",
        TypeSignature::String => "System.String",
        TypeSignature::Object => "System.Object",
        TypeSignature::TypedByRef => "System.TypedReference",
        _ => return None,
    })
}

/// Decoded tables and heaps of the module being loaded
pub(crate) struct LoaderContext<'a> {
    file: &'a File,
    strings: &'a Strings<'a>,
    blobs: Option<&'a Blob<'a>>,
    guids: Option<&'a Guid<'a>>,

    /// Identity of this module: assembly name, or module name without a manifest
    identity: String,
    /// Identity of the module defining the builtin types (`string`, `object`, `int`, arrays)
    corlib: String,
    module: Option<ModuleRaw>,

    type_defs: Vec<TypeDefRaw>,
    type_refs: Vec<TypeRefRaw>,
    type_specs: Vec<TypeSpecRaw>,
    fields: Vec<FieldRaw>,
    methods: Vec<MethodDefRaw>,
    member_refs: Vec<MemberRefRaw>,
    module_refs: Vec<ModuleRefRaw>,
    assembly_refs: Vec<AssemblyRefRaw>,
    interface_impls: Vec<InterfaceImplRaw>,

    /// nested `TypeDef` rid -> enclosing `TypeDef` rid
    enclosing: HashMap<u32, u32>,
    field_owners: Vec<u32>,
    method_owners: Vec<u32>,
}

impl<'a> LoaderContext<'a> {
    /// Decode the rows of all tables the module model is built from
    ///
    /// # Errors
    /// Returns an error if a row or a name in the `#Strings` heap is malformed
    pub(crate) fn new(
        file: &'a File,
        tables: &'a TablesHeader<'a>,
        strings: &'a Strings<'a>,
        blobs: Option<&'a Blob<'a>>,
        guids: Option<&'a Guid<'a>>,
    ) -> Result<Self> {
        let module = rows::<ModuleRaw>(tables)?.into_iter().next();
        let assembly = rows::<AssemblyRaw>(tables)?.into_iter().next();

        let identity = match (&assembly, &module) {
            (Some(assembly), _) => strings.get(assembly.name as usize)?.to_string(),
            (None, Some(module)) => strings.get(module.name as usize)?.to_string(),
            (None, None) => {
                return Err(malformed_error!(
                    "Image has neither a Module nor an Assembly row"
                ))
            }
        };

        let type_defs = rows::<TypeDefRaw>(tables)?;
        let fields = rows::<FieldRaw>(tables)?;
        let methods = rows::<MethodDefRaw>(tables)?;

        let field_owners = owners(&type_defs, fields.len(), |row| row.field_list);
        let method_owners = owners(&type_defs, methods.len(), |row| row.method_list);

        let enclosing = rows::<NestedClassRaw>(tables)?
            .into_iter()
            .map(|row| (row.nested_class, row.enclosing_class))
            .collect();

        let assembly_refs = rows::<AssemblyRefRaw>(tables)?;
        let corlib =
            Self::core_library(strings, &assembly_refs)?.unwrap_or_else(|| identity.clone());

        Ok(LoaderContext {
            file,
            strings,
            blobs,
            guids,
            identity,
            corlib,
            module,
            type_refs: rows(tables)?,
            type_specs: rows(tables)?,
            member_refs: rows(tables)?,
            module_refs: rows(tables)?,
            assembly_refs,
            interface_impls: rows(tables)?,
            type_defs,
            fields,
            methods,
            enclosing,
            field_owners,
            method_owners,
        })
    }

    /// Name of the referenced core library, `None` if the image references none
    fn core_library(strings: &Strings, assembly_refs: &[AssemblyRefRaw]) -> Result<Option<String>> {
        let mut best: Option<(usize, &str)> = None;

        for row in assembly_refs {
            let name = strings.get(row.name as usize)?;
            let Some(rank) = CORE_LIBRARIES.iter().position(|core| *core == name) else {
                continue;
            };
            if best.map_or(true, |(best_rank, _)| rank < best_rank) {
                best = Some((rank, name));
            }
        }

        Ok(best.map(|(_, name)| name.to_string()))
    }

    /// Build the module: every `TypeDef` in table order with its members resolved
    ///
    /// # Errors
    /// Returns an error if a signature or method body is malformed
    pub(crate) fn build(&self) -> Result<Module> {
        let mut module = Module::new(self.identity.clone());

        if let (Some(row), Some(guids)) = (&self.module, self.guids) {
            if row.mvid != 0 {
                module = module.with_mvid(guids.get(row.mvid as usize)?);
            }
        }

        let mut interfaces: HashMap<u32, Vec<TypeRef>> = HashMap::new();
        for row in &self.interface_impls {
            match self.resolve_type(row.interface.token, 0)? {
                Some(interface) => interfaces.entry(row.class).or_default().push(interface),
                None => trace!(token = %row.interface.token, "dropped unresolvable interface"),
            }
        }

        let mut fields: HashMap<u32, Vec<&FieldRaw>> = HashMap::new();
        for (field, owner) in self.fields.iter().zip(&self.field_owners) {
            fields.entry(*owner).or_default().push(field);
        }

        let mut methods: HashMap<u32, Vec<&MethodDefRaw>> = HashMap::new();
        for (method, owner) in self.methods.iter().zip(&self.method_owners) {
            methods.entry(*owner).or_default().push(method);
        }

        for type_def in &self.type_defs {
            let mut definition = self.type_definition(
                type_def,
                fields.get(&type_def.rid).map_or(&[][..], Vec::as_slice),
                methods.get(&type_def.rid).map_or(&[][..], Vec::as_slice),
            )?;
            definition.interfaces = interfaces.remove(&type_def.rid).unwrap_or_default();
            module.add_type(definition);
        }

        Ok(module)
    }

    fn type_definition(
        &self,
        row: &TypeDefRaw,
        fields: &[&FieldRaw],
        methods: &[&MethodDefRaw],
    ) -> Result<TypeDefinition> {
        let fullname = self.type_def_name(row.rid, 0)?;

        let mut definition = TypeDefinition::class(
            self.string(row.type_namespace)?,
            self.string(row.type_name)?,
        )
        .with_flags(TypeAttributes::from_bits_retain(row.flags));
        definition.token = row.token;

        if let Some(&outer) = self.enclosing.get(&row.rid) {
            definition = definition.nested_in(self.type_def_name(outer, 1)?);
        }

        if !row.extends.is_null() {
            definition.base = self.resolve_type(row.extends.token, 0)?;
        }

        for field in fields {
            definition.fields.push(self.field_definition(field)?);
        }

        for method in methods {
            definition.methods.push(self.method_definition(method, &fullname)?);
        }

        trace!(
            name = %fullname,
            fields = definition.fields.len(),
            methods = definition.methods.len(),
            "loaded type"
        );

        Ok(definition)
    }

    fn field_definition(&self, row: &FieldRaw) -> Result<FieldDefinition> {
        let name = self.string(row.name)?;
        let signature = parse_field_signature(self.blob(row.signature)?)?;

        Ok(match self.signature_type(&signature.base, 0)? {
            Some(ty) => FieldDefinition::new(name, ty),
            None => FieldDefinition::unnamed(name, signature.base.is_primitive_value()),
        })
    }

    fn method_definition(
        &self,
        row: &MethodDefRaw,
        declaring_type: &str,
    ) -> Result<MethodDefinition> {
        let signature = parse_method_signature(self.blob(row.signature)?)?;

        let mut params = Vec::with_capacity(signature.params.len());
        for param in &signature.params {
            match self.signature_type(&param.base, 0)? {
                Some(ty) => params.push(ty),
                None => {
                    return Err(malformed_error!(
                        "Parameter of type {:?} in method {}",
                        param.base,
                        self.string(row.name)?
                    ))
                }
            }
        }

        let instructions = if row.rva != 0 && row.impl_flags & CODE_TYPE_MASK == 0 {
            Some(self.method_body(row.rva)?)
        } else {
            None
        };

        Ok(MethodDefinition {
            token: row.token,
            declaring_type: declaring_type.to_string(),
            name: self.string(row.name)?.to_string(),
            flags: MethodModifiers::from_bits_retain(row.flags),
            params,
            instructions,
        })
    }

    /// Decode the body at `rva`, keeping the object constructions and field stores
    fn method_body(&self, rva: u32) -> Result<Vec<Instruction>> {
        let offset = self.file.rva_to_offset(rva as usize)?;
        let data = self.file.data_slice(offset, self.file.len().saturating_sub(offset))?;

        let body = MethodBody::from(data)?;
        let mut instructions = Vec::new();

        for raw in decoder::decode_stream(body.code(data))? {
            let Some(token) = raw.token() else {
                continue;
            };

            let resolved = match (raw.prefix, raw.opcode) {
                (0, NEWOBJ) => self.constructed_type(token)?.map(Instruction::Construct),
                (0, STFLD) => self.stored_field(token)?.map(Instruction::StoreField),
                _ => continue,
            };

            match resolved {
                Some(instruction) => instructions.push(instruction),
                None => trace!(%token, offset = raw.offset, "dropped unresolvable operand"),
            }
        }

        Ok(instructions)
    }

    /// The type constructed by `newobj` on the constructor `token`
    fn constructed_type(&self, token: Token) -> Result<Option<TypeRef>> {
        match token.table_id() {
            Some(TableId::MethodDef) => {
                match self.method_owners.get(token.row().wrapping_sub(1) as usize) {
                    Some(&owner) if owner != 0 => {
                        self.resolve_type(Token::from_parts(TableId::TypeDef, owner), 0)
                    }
                    _ => Ok(None),
                }
            }
            Some(TableId::MemberRef) => match self.member_ref(token.row()) {
                Some(member) => self.member_parent(member),
                None => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// The field written by `stfld` on the field `token`
    fn stored_field(&self, token: Token) -> Result<Option<FieldStore>> {
        let (declaring_type, name, signature) = match token.table_id() {
            Some(TableId::Field) => {
                let index = token.row().wrapping_sub(1) as usize;
                let (Some(field), Some(&owner)) =
                    (self.fields.get(index), self.field_owners.get(index))
                else {
                    return Ok(None);
                };
                if owner == 0 {
                    return Ok(None);
                }

                let owner = Token::from_parts(TableId::TypeDef, owner);
                let Some(declaring_type) = self.resolve_type(owner, 0)? else {
                    return Ok(None);
                };
                (declaring_type, field.name, field.signature)
            }
            Some(TableId::MemberRef) => {
                let Some(member) = self.member_ref(token.row()) else {
                    return Ok(None);
                };
                let Some(declaring_type) = self.member_parent(member)? else {
                    return Ok(None);
                };
                (declaring_type, member.name, member.signature)
            }
            _ => return Ok(None),
        };

        let signature = parse_field_signature(self.blob(signature)?)?;
        let field_type = self.signature_type(&signature.base, 0)?;
        let is_value_type = signature.base.is_primitive_value()
            || field_type.as_ref().is_some_and(TypeRef::is_value_type);

        Ok(Some(FieldStore {
            declaring_type,
            name: self.string(name)?.to_string(),
            field_type,
            is_value_type,
        }))
    }

    fn member_ref(&self, rid: u32) -> Option<&MemberRefRaw> {
        self.member_refs.get(rid.wrapping_sub(1) as usize)
    }

    /// The type declaring a member reference; `None` for global members and vararg call sites
    fn member_parent(&self, member: &MemberRefRaw) -> Result<Option<TypeRef>> {
        match member.class.tag {
            TableId::TypeDef | TableId::TypeRef | TableId::TypeSpec => {
                self.resolve_type(member.class.token, 0)
            }
            _ => Ok(None),
        }
    }

    /// Resolve a `TypeDef`, `TypeRef` or `TypeSpec` token
    ///
    /// Returns `None` for tokens that name no type or a type without a name of its own, such
    /// as an array or a generic parameter.
    fn resolve_type(&self, token: Token, depth: usize) -> Result<Option<TypeRef>> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(RecursionLimit(MAX_RESOLUTION_DEPTH));
        }

        let index = token.row().wrapping_sub(1) as usize;
        match token.table_id() {
            Some(TableId::TypeDef) => {
                let Some(row) = self.type_defs.get(index) else {
                    return Ok(None);
                };

                let reference =
                    TypeRef::new(self.type_def_name(row.rid, depth)?, self.identity.clone());
                if self.is_value_type_def(row)? {
                    Ok(Some(reference.as_value_type()))
                } else {
                    Ok(Some(reference))
                }
            }
            Some(TableId::TypeRef) => {
                if index >= self.type_refs.len() {
                    return Ok(None);
                }

                let (name, module) = self.type_ref_name(token.row(), depth)?;
                Ok(Some(TypeRef::new(name, module)))
            }
            Some(TableId::TypeSpec) => {
                let Some(row) = self.type_specs.get(index) else {
                    return Ok(None);
                };

                let signature = parse_type_spec_signature(self.blob(row.signature)?)?;
                self.signature_type(&signature.base, depth + 1)
            }
            _ => Ok(None),
        }
    }

    /// The type a signature refers to
    ///
    /// `string` and `object` resolve to their core library classes, the numeric primitives and
    /// pointers to value types, arrays to a reference type named after their element. Only
    /// `void` and undecodable signatures yield `None`.
    fn signature_type(&self, signature: &TypeSignature, depth: usize) -> Result<Option<TypeRef>> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(RecursionLimit(MAX_RESOLUTION_DEPTH));
        }

        match signature {
            TypeSignature::Class(token) => self.resolve_type(*token, depth + 1),
            TypeSignature::ValueType(token) => {
                Ok(self.resolve_type(*token, depth + 1)?.map(TypeRef::as_value_type))
            }
            TypeSignature::GenericInst(base, arguments) => {
                let Some(definition) = self.signature_type(base, depth + 1)? else {
                    return Ok(None);
                };

                let arguments = arguments
                    .iter()
                    .map(|argument| self.signature_name(argument, depth + 1))
                    .collect::<Result<Vec<_>>>()?;

                Ok(Some(TypeRef::generic_instance(&definition, arguments)))
            }
            TypeSignature::ByRef(inner) | TypeSignature::Pinned(inner) => {
                self.signature_type(inner, depth + 1)
            }
            TypeSignature::SzArray(element) | TypeSignature::Array(element, _) => {
                let module = match self.signature_type(element, depth + 1)? {
                    Some(element) => element.module().to_string(),
                    None => self.corlib.clone(),
                };

                Ok(Some(TypeRef::new(self.signature_name(signature, depth + 1)?, module)))
            }
            TypeSignature::GenericParamType(_) | TypeSignature::GenericParamMethod(_) => {
                let name = self.signature_name(signature, depth + 1)?;
                Ok(Some(TypeRef::generic_parameter(name, self.identity.clone())))
            }
            TypeSignature::Ptr(_) | TypeSignature::FnPtr(_) => {
                let name = self.signature_name(signature, depth + 1)?;
                Ok(Some(TypeRef::new(name, self.corlib.clone()).as_value_type()))
            }
            TypeSignature::String | TypeSignature::Object => {
                Ok(builtin_name(signature).map(|name| TypeRef::new(name, self.corlib.clone())))
            }
            TypeSignature::Void | TypeSignature::Unknown => Ok(None),
            builtin => Ok(builtin_name(builtin)
                .map(|name| TypeRef::new(name, self.corlib.clone()).as_value_type())),
        }
    }

    /// Render a signature type the way it appears inside a generic instance name
    fn signature_name(&self, signature: &TypeSignature, depth: usize) -> Result<String> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(RecursionLimit(MAX_RESOLUTION_DEPTH));
        }

        if let Some(name) = builtin_name(signature) {
            return Ok(name.to_string());
        }

        Ok(match signature {
            TypeSignature::SzArray(inner) => {
                format!("{}[]", self.signature_name(inner, depth + 1)?)
            }
            TypeSignature::Array(inner, rank) => format!(
                "{}[{}]",
                self.signature_name(inner, depth + 1)?,
                ",".repeat(rank.saturating_sub(1) as usize)
            ),
            TypeSignature::Ptr(inner) => format!("{}*", self.signature_name(inner, depth + 1)?),
            TypeSignature::ByRef(inner) => format!("{}&", self.signature_name(inner, depth + 1)?),
            TypeSignature::Pinned(inner) => self.signature_name(inner, depth + 1)?,
            TypeSignature::GenericParamType(index) => format!("!{index}"),
            TypeSignature::GenericParamMethod(index) => format!("!!{index}"),
            TypeSignature::FnPtr(_) => "method".to_string(),
            other => match self.signature_type(other, depth + 1)? {
                Some(reference) => reference.name().to_string(),
                None => "?".to_string(),
            },
        })
    }

    /// Full name of a `TypeDef`: `Namespace.Name`, or `Outer/Inner` for nested types
    fn type_def_name(&self, rid: u32, depth: usize) -> Result<String> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(RecursionLimit(MAX_RESOLUTION_DEPTH));
        }

        let Some(row) = self.type_defs.get(rid.wrapping_sub(1) as usize) else {
            return Err(malformed_error!("TypeDef row {} does not exist", rid));
        };

        let name = self.string(row.type_name)?;
        if let Some(&outer) = self.enclosing.get(&rid) {
            return Ok(format!("{}/{}", self.type_def_name(outer, depth + 1)?, name));
        }

        let namespace = self.string(row.type_namespace)?;
        if namespace.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{namespace}.{name}"))
        }
    }

    /// Full name and defining module of a `TypeRef`
    fn type_ref_name(&self, rid: u32, depth: usize) -> Result<(String, String)> {
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(RecursionLimit(MAX_RESOLUTION_DEPTH));
        }

        let Some(row) = self.type_refs.get(rid.wrapping_sub(1) as usize) else {
            return Err(malformed_error!("TypeRef row {} does not exist", rid));
        };

        let name = self.string(row.type_name)?;
        let namespace = self.string(row.type_namespace)?;
        let qualified = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };

        let scope = &row.resolution_scope;
        if scope.is_null() {
            return Ok((qualified, self.identity.clone()));
        }

        let scope_index = scope.row.wrapping_sub(1) as usize;
        match scope.tag {
            TableId::TypeRef => {
                let (outer, module) = self.type_ref_name(scope.row, depth + 1)?;
                Ok((format!("{outer}/{name}"), module))
            }
            TableId::AssemblyRef => match self.assembly_refs.get(scope_index) {
                Some(assembly) => Ok((qualified, self.string(assembly.name)?.to_string())),
                None => Err(malformed_error!("AssemblyRef row {} does not exist", scope.row)),
            },
            TableId::ModuleRef => match self.module_refs.get(scope_index) {
                Some(module) => Ok((qualified, self.string(module.name)?.to_string())),
                None => Err(malformed_error!("ModuleRef row {} does not exist", scope.row)),
            },
            _ => Ok((qualified, self.identity.clone())),
        }
    }

    /// True if the `TypeDef` extends `System.ValueType` or `System.Enum`
    fn is_value_type_def(&self, row: &TypeDefRaw) -> Result<bool> {
        if row.extends.is_null() {
            return Ok(false);
        }

        let base = match row.extends.tag {
            TableId::TypeRef => self.type_ref_name(row.extends.row, 0)?.0,
            TableId::TypeDef => self.type_def_name(row.extends.row, 0)?,
            _ => return Ok(false),
        };

        let own = self.type_def_name(row.rid, 0)?;
        Ok(match base.as_str() {
            "System.Enum" => true,
            "System.ValueType" => own != "System.Enum",
            _ => false,
        })
    }

    fn string(&self, index: u32) -> Result<&'a str> {
        self.strings.get(index as usize)
    }

    fn blob(&self, index: u32) -> Result<&'a [u8]> {
        match self.blobs {
            Some(blobs) => blobs.get(index as usize),
            None => Err(malformed_error!(
                "Image has no #Blob heap, needed for index {}",
                index
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_def(rid: u32, field_list: u32, method_list: u32) -> TypeDefRaw {
        TypeDefRaw {
            rid,
            token: Token::from_parts(TableId::TypeDef, rid),
            flags: 0,
            type_name: 0,
            type_namespace: 0,
            extends: crate::metadata::tables::CodedIndex::new(TableId::TypeRef, 0),
            field_list,
            method_list,
        }
    }

    #[test]
    fn member_owners() {
        // <Module> owns nothing, Car owns fields 1-2, Wheel owns field 3
        let type_defs = vec![type_def(1, 1, 1), type_def(2, 1, 1), type_def(3, 3, 2)];

        assert_eq!(owners(&type_defs, 3, |row| row.field_list), vec![2, 2, 3]);
        assert_eq!(owners(&type_defs, 2, |row| row.method_list), vec![2, 3]);
        assert_eq!(owners(&type_defs, 0, |row| row.method_list), Vec::<u32>::new());
    }

    #[test]
    fn member_owners_out_of_range() {
        // list pointers past the end of the member table are clamped
        let type_defs = vec![type_def(1, 1, 1), type_def(2, 9, 9)];
        assert_eq!(owners(&type_defs, 2, |row| row.field_list), vec![1, 1]);
    }

    #[test]
    fn builtins() {
        assert_eq!(builtin_name(&TypeSignature::I4), Some("System.Int32"));
        assert_eq!(builtin_name(&TypeSignature::String), Some("System.String"));
        assert_eq!(builtin_name(&TypeSignature::Class(Token::new(0x0100_0001))), None);
    }
}
