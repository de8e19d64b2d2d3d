//! Assembly of a [`ParsedAssembly`] from a [`Module`].

use std::path::Path;

use tracing::{debug, debug_span};

use crate::{
    analysis::{
        classifier::{classify, partition_methods},
        filter::NamespaceFilter,
        interfaces::deduplicate,
        model::{ParsedAssembly, ParsedType, RelationshipSet, TypeKind},
        relationships::{extract, ClassShape},
    },
    config::AnalyzerConfig,
    metadata::{
        module::Module,
        typesystem::{TypeDefinition, TypeRef},
    },
    Error::InvariantViolation,
    Result,
};

/// Root of every class hierarchy; a class deriving from it has no parent in the model
const OBJECT: &str = "System.Object";

/// Drives classification, interface reduction and relationship extraction over all types of
/// a module
pub struct AssemblyBuilder<'a> {
    module: &'a Module,
    filter: NamespaceFilter<'a>,
}

impl<'a> AssemblyBuilder<'a> {
    /// Create a builder for `module`
    #[must_use]
    pub fn new(module: &'a Module, config: &'a AnalyzerConfig) -> Self {
        AssemblyBuilder {
            module,
            filter: NamespaceFilter::new(config),
        }
    }

    /// Analyze every type of the module, in declaration order
    ///
    /// # Errors
    /// Returns [`crate::Error::InvariantViolation`] if a class ends up with relationships that
    /// contradict its parent or interfaces
    pub fn build(&self) -> Result<ParsedAssembly> {
        let span = debug_span!("analyze_module", module = self.module.name());
        let _enter = span.enter();

        let mut classes = Vec::new();
        let mut interfaces = Vec::new();

        for ty in self.module.types() {
            match classify(ty, &self.filter) {
                Some(TypeKind::Class) => {
                    let class = self.class(ty);
                    check_inheritance(&class)?;
                    classes.push(class);
                }
                Some(TypeKind::Interface) => interfaces.push(self.interface(ty)),
                None => {}
            }
        }

        debug!(
            types = self.module.types().len(),
            classes = classes.len(),
            interfaces = interfaces.len(),
            "analyzed module"
        );

        Ok(ParsedAssembly {
            file_name: self
                .module
                .file_name()
                .unwrap_or(self.module.name())
                .to_string(),
            module: self.module.name().to_string(),
            mvid: self.module.mvid(),
            sha1: self.module.sha1().map(ToString::to_string),
            classes,
            interfaces,
        })
    }

    fn class(&self, ty: &TypeDefinition) -> ParsedType {
        let this = ty.type_ref(self.module.name());
        let parent = ty.base.clone().filter(|base| base.name() != OBJECT);

        let parent_interfaces = parent
            .as_ref()
            .and_then(|parent| self.module.resolve(parent))
            .map_or(&[][..], |definition| definition.interfaces.as_slice());
        let interfaces = deduplicate(self.module, &ty.interfaces, parent_interfaces);

        let (constructors, methods) = partition_methods(ty);
        let constructors: Vec<_> = constructors.into_iter().cloned().collect();
        let methods: Vec<_> = methods.into_iter().cloned().collect();

        let relationships = extract(&ClassShape {
            this: &this,
            parent: parent.as_ref(),
            interfaces: &interfaces,
            constructors: &constructors,
            methods: &methods,
        });

        ParsedType {
            type_ref: this,
            kind: TypeKind::Class,
            parent,
            interfaces,
            fields: ty.fields.clone(),
            constructors,
            methods,
            relationships,
        }
    }

    fn interface(&self, ty: &TypeDefinition) -> ParsedType {
        let (constructors, methods) = partition_methods(ty);

        ParsedType {
            type_ref: ty.type_ref(self.module.name()),
            kind: TypeKind::Interface,
            parent: None,
            interfaces: ty.interfaces.clone(),
            fields: ty.fields.clone(),
            constructors: constructors.into_iter().cloned().collect(),
            methods: methods.into_iter().cloned().collect(),
            relationships: RelationshipSet::default(),
        }
    }
}

/// `inherits` must be exactly the parent, or exactly the interfaces when there is no parent
fn check_inheritance(class: &ParsedType) -> Result<()> {
    let this = &class.type_ref;
    let expected: Vec<&TypeRef> = match &class.parent {
        Some(parent) => vec![parent],
        None => class.interfaces.iter().collect(),
    };
    let expected: Vec<&TypeRef> = expected.into_iter().filter(|ty| *ty != this).collect();

    let inherits = class.relationships.inherits();
    if inherits.len() != expected.len() || expected.iter().any(|ty| !inherits.contains(*ty)) {
        return Err(InvariantViolation {
            type_name: this.name().to_string(),
            message: format!("inherits {inherits:?}, expected {expected:?}"),
        });
    }

    Ok(())
}

impl ParsedAssembly {
    /// Analyze `module`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvariantViolation`] if the analysis breaks one of its guarantees
    pub fn from_module(module: &Module, config: &AnalyzerConfig) -> Result<ParsedAssembly> {
        AssemblyBuilder::new(module, config).build()
    }

    /// Load and analyze the PE image at `path`
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleLoad`] if the image can not be loaded
    pub fn from_file(path: &Path, config: &AnalyzerConfig) -> Result<ParsedAssembly> {
        let module = Module::from_file(path)?;
        Self::from_module(&module, config)
    }

    /// Load and analyze the PE image `data`, reporting it as `file_name`
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleLoad`] if the image can not be loaded
    pub fn from_mem(
        data: Vec<u8>,
        file_name: &str,
        config: &AnalyzerConfig,
    ) -> Result<ParsedAssembly> {
        let module = Module::from_mem_named(data, file_name)?;
        Self::from_module(&module, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::model::RelationshipKind,
        metadata::{
            method::MethodDefinition, tables::TableId, token::Token,
            typesystem::FieldDefinition,
        },
        test::{sig, Il, ImageBuilder, CLASS, CTOR, FIELD, METHOD},
    };

    fn object() -> TypeRef {
        TypeRef::new(OBJECT, "System.Runtime")
    }

    #[test]
    fn object_is_no_parent() {
        let module = Module::new("Shop")
            .with_type(TypeDefinition::class("Shop", "Vehicle").with_base(object()))
            .with_type(
                TypeDefinition::class("Shop", "Car")
                    .with_base(TypeRef::new("Shop.Vehicle", "Shop")),
            );

        let parsed = ParsedAssembly::from_module(&module, &AnalyzerConfig::default()).unwrap();
        assert_eq!(parsed.class("Shop.Vehicle").unwrap().parent_name(), None);
        assert_eq!(parsed.class("Shop.Car").unwrap().parent_name(), Some("Shop.Vehicle"));
        assert_eq!(
            parsed.class("Shop.Car").unwrap().relationships().names(RelationshipKind::Inherits),
            vec!["Shop.Vehicle"]
        );
    }

    #[test]
    fn interfaces_keep_members_without_relationships() {
        let logger = TypeDefinition::interface("Shop", "ILogger")
            .with_interface(TypeRef::new("System.IDisposable", "System.Runtime"))
            .with_method(
                MethodDefinition::method("Shop.ILogger", "Log")
                    .with_param(TypeRef::new("Shop.Message", "Shop")),
            );
        let module = Module::new("Shop").with_type(logger);

        let parsed = ParsedAssembly::from_module(&module, &AnalyzerConfig::default()).unwrap();
        let logger = parsed.interface("Shop.ILogger").unwrap();
        assert_eq!(logger.kind(), TypeKind::Interface);
        assert_eq!(logger.interface_names(), vec!["System.IDisposable"]);
        assert_eq!(logger.methods().len(), 1);
        assert!(logger.relationships().is_empty());
        assert!(parsed.classes().is_empty());
    }

    #[test]
    fn members_are_carried() {
        let wheel = TypeRef::new("Shop.Wheel", "Shop");
        let car = TypeDefinition::class("Shop", "Car")
            .with_base(object())
            .with_field(FieldDefinition::new("wheel", wheel.clone()))
            .with_field(FieldDefinition::unnamed("speed", true))
            .with_method(MethodDefinition::constructor("Shop.Car").with_param(wheel))
            .with_method(MethodDefinition::method("Shop.Car", "Drive"));
        let module = Module::new("Shop").with_file_name("Shop.dll").with_type(car);

        let parsed = ParsedAssembly::from_module(&module, &AnalyzerConfig::default()).unwrap();
        assert_eq!(parsed.file_name(), "Shop.dll");
        assert_eq!(parsed.module_name(), "Shop");

        let car = parsed.class("Shop.Car").unwrap();
        assert_eq!(car.fields().len(), 2);
        assert_eq!(car.constructors().len(), 1);
        assert_eq!(car.methods().len(), 1);
        assert_eq!(car.relationships().names(RelationshipKind::Uses), vec!["Shop.Wheel"]);
    }

    #[test]
    fn shop_image() {
        let config = AnalyzerConfig::default();
        let image = crate::test::shop_image();
        let parsed = ParsedAssembly::from_mem(image, "Shop.dll", &config).unwrap();

        assert_eq!(parsed.file_name(), "Shop.dll");
        assert_eq!(parsed.module_name(), "Shop");
        assert!(parsed.mvid().is_some());
        assert!(parsed.sha1().is_some());

        let classes: Vec<&str> = parsed.classes().iter().map(ParsedType::name).collect();
        assert_eq!(classes, ["Shop.Wheel", "Shop.Car", "Shop.Garage"]);
        let interfaces: Vec<&str> = parsed.interfaces().iter().map(ParsedType::name).collect();
        assert_eq!(interfaces, ["Shop.IVehicle"]);

        let car = parsed.class("Shop.Car").unwrap();
        assert_eq!(car.parent(), None);
        assert_eq!(car.interface_names(), ["Shop.IVehicle"]);
        assert_eq!(car.fields().len(), 5);
        assert_eq!(car.constructors().len(), 1);
        assert_eq!(car.methods().len(), 2);

        let relationships = car.relationships();
        assert_eq!(relationships.names(RelationshipKind::Uses), ["Shop.Garage"]);
        assert_eq!(
            relationships.names(RelationshipKind::Aggregates),
            ["Shop.Wheel", "Shop.Garage"]
        );
        assert_eq!(relationships.names(RelationshipKind::Composes), ["Shop.Wheel"]);
        assert_eq!(relationships.names(RelationshipKind::Inherits), ["Shop.IVehicle"]);

        assert!(parsed.class("Shop.Wheel").unwrap().relationships().is_empty());
    }

    #[test]
    fn builtin_reference_parameters() {
        let mut image = ImageBuilder::new("Shop");
        let runtime = image.assembly_ref("System.Runtime");
        let object = image.type_ref(runtime, "System", "Object");
        let exception = image.type_ref(runtime, "System", "Exception");

        image.type_def("Shop", "Logger", CLASS, Some(object));
        let name = image.field("name", FIELD, &sig::field(sig::STRING));
        image.method(
            ".ctor",
            CTOR,
            &sig::method(true, sig::VOID, &[sig::STRING]),
            Some(&Il::new().ldarg(0).ldarg(1).stfld(name).ret()),
        );
        image.method(
            "Log",
            METHOD,
            &sig::method(
                true,
                sig::VOID,
                &[sig::STRING, sig::OBJECT, &sig::class(exception), sig::I4],
            ),
            Some(&Il::new().ret()),
        );

        let config = AnalyzerConfig::default();
        let parsed = ParsedAssembly::from_mem(image.build(), "Shop.dll", &config).unwrap();
        let logger = parsed.class("Shop.Logger").unwrap();

        let log: Vec<&str> = logger.methods()[0].params.iter().map(TypeRef::name).collect();
        assert_eq!(log, ["System.String", "System.Object", "System.Exception", "System.Int32"]);
        assert_eq!(logger.constructors()[0].params.len(), 1);

        let relationships = logger.relationships();
        assert_eq!(
            relationships.names(RelationshipKind::Uses),
            ["System.String", "System.Object", "System.Exception"]
        );
        assert_eq!(relationships.names(RelationshipKind::Composes), ["System.String"]);
        assert!(relationships.aggregates().is_empty());
        assert!(relationships.inherits().is_empty());
    }

    #[test]
    fn unresolvable_operands_leave_no_relationships() {
        let mut image = ImageBuilder::new("Shop");
        let native = image.module_ref("Native.dll");
        let global = image.member_ref(native, ".ctor", &sig::method(true, sig::VOID, &[]));

        image.type_def("Shop", "Loader", CLASS, None);
        image.method(
            ".ctor",
            CTOR,
            &sig::method(true, sig::VOID, &[]),
            Some(
                &Il::new()
                    .ldarg(0)
                    .ldnull()
                    .stfld(Token::from_parts(TableId::Field, 0xFF))
                    .ret(),
            ),
        );
        image.method(
            "Run",
            METHOD,
            &sig::method(true, sig::VOID, &[]),
            Some(
                &Il::new()
                    .newobj(global)
                    .pop()
                    .newobj(Token::from_parts(TableId::MemberRef, 0xFF))
                    .pop()
                    .ret(),
            ),
        );

        let config = AnalyzerConfig::default();
        let parsed = ParsedAssembly::from_mem(image.build(), "Shop.dll", &config).unwrap();
        let loader = parsed.class("Shop.Loader").unwrap();

        assert!(loader.relationships().is_empty());
    }

    #[test]
    fn broken_inheritance_is_reported() {
        let car = TypeRef::new("Shop.Car", "Shop");
        let mut relationships = RelationshipSet::default();
        relationships.insert(RelationshipKind::Inherits, TypeRef::new("Shop.IA", "Shop"));

        let class = ParsedType {
            type_ref: car,
            kind: TypeKind::Class,
            parent: Some(TypeRef::new("Shop.Vehicle", "Shop")),
            interfaces: vec![TypeRef::new("Shop.IA", "Shop")],
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            relationships,
        };

        assert!(matches!(
            check_inheritance(&class),
            Err(InvariantViolation { ref type_name, .. }) if type_name == "Shop.Car"
        ));
    }
}
