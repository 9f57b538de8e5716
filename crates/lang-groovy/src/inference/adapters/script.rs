//! Classes declared in the analysed source, layered over the builtin table.
//!
//! Top-level script code belongs to a synthetic script class (named by
//! `script_class`, `Script` unless configured) that extends
//! `groovy.lang.Script` and owns the script's methods.

use crate::builtin::{JdkTypeSystem, jdk, simple_name};
use crate::inference::core::type_system::{InheritanceProvider, MemberProvider, TypeProvider};
use crate::inference::core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter,
    TypeResolutionContext,
};
use crate::parser::ast::{ClassDecl, ClassKind, MethodDecl, Param, TypeNode};
use crate::parser::{CompilationUnit, StmtKind};
use groovyscope_api::{TypeRef, names};
use std::collections::HashMap;

/// A static import: the class, and the member name unless it is `.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticImport {
    pub class: String,
    pub member: Option<String>,
}

pub struct ScriptTypeSystem {
    base: &'static JdkTypeSystem,
    types: HashMap<String, TypeInfo>,
    members: HashMap<String, Vec<MemberInfo>>,
    script_fqn: String,
    resolution: TypeResolutionContext,
    static_imports: Vec<StaticImport>,
}

impl ScriptTypeSystem {
    pub fn new(unit: &CompilationUnit, script_class: &str) -> Self {
        let qualify = |name: &str| match &unit.package {
            Some(package) => format!("{package}.{name}"),
            None => name.to_string(),
        };

        let classes: Vec<&ClassDecl> = unit
            .top_level
            .iter()
            .filter_map(|id| match &unit.stmt(*id).kind {
                StmtKind::Class(class) => Some(class),
                _ => None,
            })
            .collect();
        let script_fqn = qualify(script_class);

        let mut resolution = TypeResolutionContext {
            package: unit.package.clone(),
            ..Default::default()
        };
        let mut static_imports = Vec::new();
        for import in &unit.imports {
            match (import.is_static, import.is_star) {
                (false, false) => {
                    if let Some(visible) = import.visible_name() {
                        resolution
                            .imports
                            .push((visible.to_string(), import_fqn(&import.path)));
                    }
                }
                (false, true) => resolution.star_imports.push(import.path.clone()),
                (true, false) => {
                    if let Some((class, member)) = import.path.rsplit_once('.') {
                        static_imports.push(StaticImport {
                            class: class.to_string(),
                            member: Some(member.to_string()),
                        });
                    }
                }
                (true, true) => static_imports.push(StaticImport {
                    class: import.path.clone(),
                    member: None,
                }),
            }
        }
        resolution.known_fqns = classes.iter().map(|c| qualify(&c.name)).collect();
        resolution.known_fqns.push(script_fqn.clone());

        let mut ts = Self {
            base: jdk(),
            types: HashMap::new(),
            members: HashMap::new(),
            script_fqn: script_fqn.clone(),
            resolution,
            static_imports: Vec::new(),
        };
        ts.static_imports = static_imports
            .into_iter()
            .map(|i| StaticImport {
                class: ts.resolve_name(&i.class).unwrap_or(i.class),
                member: i.member,
            })
            .collect();

        let mut script = TypeInfo::new(&script_fqn, TypeKind::Class);
        script.superclass = Some(TypeRef::id(names::SCRIPT));
        let headers: Vec<TypeInfo> = classes
            .iter()
            .map(|c| ts.class_header(c, qualify(&c.name)))
            .chain(std::iter::once(script))
            .collect();
        for info in headers {
            ts.types.insert(info.fqn.clone(), info);
        }

        for class in &classes {
            let fqn = qualify(&class.name);
            let members = ts.class_members(class, &fqn);
            ts.members.insert(fqn, members);
        }
        let script_methods: Vec<MemberInfo> = unit
            .top_level
            .iter()
            .filter_map(|id| match &unit.stmt(*id).kind {
                StmtKind::Method(method) => Some(ts.method(method, &script_fqn, &[])),
                _ => None,
            })
            .collect();
        ts.members.insert(script_fqn, script_methods);

        tracing::trace!(
            "Script type system: {} declared types over the builtin table",
            ts.types.len()
        );
        ts
    }

    /// FQN of the class holding top-level script code.
    pub fn script_type(&self) -> &str {
        &self.script_fqn
    }

    pub fn is_declared(&self, fqn: &str) -> bool {
        self.types.contains_key(fqn)
    }

    pub fn resolution(&self) -> &TypeResolutionContext {
        &self.resolution
    }

    pub fn static_imports(&self) -> &[StaticImport] {
        &self.static_imports
    }

    /// Resolve a simple or dotted class name as written in source.
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        self.resolve_type_name(name, &self.resolution)
    }

    /// Resolve a source type. `type_vars` are the type parameters in scope.
    /// Names that resolve to nothing give [`TypeRef::Unknown`].
    pub fn resolve_type(&self, node: &TypeNode, type_vars: &[String]) -> TypeRef {
        if node.is_wildcard() {
            return TypeRef::Wildcard {
                bound: node
                    .bound
                    .as_ref()
                    .map(|(bound, _)| Box::new(self.resolve_type(bound, type_vars))),
                is_upper_bound: node.bound.as_ref().is_none_or(|(_, upper)| *upper),
            };
        }
        let base = if type_vars.iter().any(|v| *v == node.name) {
            TypeRef::var(&node.name)
        } else if TypeRef::is_primitive_name(&node.name) {
            TypeRef::raw(&node.name)
        } else {
            match self.resolve_name(&node.name) {
                Some(fqn) if node.args.is_empty() => TypeRef::Id(fqn),
                Some(fqn) => TypeRef::generic(
                    fqn,
                    node.args
                        .iter()
                        .map(|a| self.resolve_type(a, type_vars))
                        .collect(),
                ),
                None => return TypeRef::Unknown,
            }
        };
        (0..node.dims).fold(base, |ty, _| TypeRef::array_of(ty))
    }

    /// Declared type of a parameter or local, `Object` when untyped.
    pub fn declared_or_object(&self, ty: Option<&TypeNode>, type_vars: &[String]) -> TypeRef {
        ty.map(|t| self.resolve_type(t, type_vars))
            .unwrap_or_else(TypeRef::object)
    }

    fn class_header(&self, class: &ClassDecl, fqn: String) -> TypeInfo {
        let kind = match class.kind {
            ClassKind::Class => TypeKind::Class,
            ClassKind::Interface => TypeKind::Interface,
            ClassKind::Trait => TypeKind::Trait,
            ClassKind::Enum => TypeKind::Enum,
        };
        let vars = &class.type_params;
        let mut info = TypeInfo::new(&fqn, kind);
        info.type_parameters = vars.iter().map(TypeParameter::new).collect();

        let mut extends = class.extends.iter().map(|t| self.resolve_type(t, vars));
        if info.is_interface() {
            info.interfaces.extend(extends);
        } else if class.kind == ClassKind::Enum {
            info.superclass = Some(TypeRef::generic("java.lang.Enum", vec![TypeRef::id(&fqn)]));
        } else {
            info.superclass = extends.next().filter(|t| !t.is_unknown());
        }
        info.interfaces.extend(
            class
                .implements
                .iter()
                .map(|t| self.resolve_type(t, vars))
                .filter(|t| !t.is_unknown()),
        );
        if !info.is_interface() {
            info.interfaces.push(TypeRef::id("groovy.lang.GroovyObject"));
        }
        info
    }

    fn class_members(&self, class: &ClassDecl, fqn: &str) -> Vec<MemberInfo> {
        let vars = &class.type_params;
        let mut members = Vec::new();
        for (name, _) in &class.enum_constants {
            members.push(MemberInfo {
                name: name.clone(),
                kind: MemberKind::Field,
                declaring_type: fqn.to_string(),
                type_ref: TypeRef::id(fqn),
                parameters: None,
                modifiers: vec!["static".to_string()],
                type_parameters: Vec::new(),
            });
        }
        for field in &class.fields {
            members.push(MemberInfo {
                name: field.name.clone(),
                kind: MemberKind::Field,
                declaring_type: fqn.to_string(),
                type_ref: self.declared_or_object(field.ty.as_ref(), vars),
                parameters: None,
                modifiers: modifiers(field.is_static),
                type_parameters: Vec::new(),
            });
        }
        for method in &class.methods {
            members.push(self.method(method, fqn, vars));
        }
        members
    }

    fn method(&self, method: &MethodDecl, owner: &str, class_vars: &[String]) -> MemberInfo {
        let vars: Vec<String> = class_vars
            .iter()
            .chain(method.type_params.iter())
            .cloned()
            .collect();
        let (name, kind, type_ref) = if method.is_constructor {
            let owner_type = self
                .types
                .get(owner)
                .map(TypeInfo::self_type)
                .unwrap_or_else(|| TypeRef::id(owner));
            ("<init>".to_string(), MemberKind::Constructor, owner_type)
        } else {
            (
                method.name.clone(),
                MemberKind::Method,
                self.declared_or_object(method.return_type.as_ref(), &vars),
            )
        };
        MemberInfo {
            name,
            kind,
            declaring_type: owner.to_string(),
            type_ref,
            parameters: Some(method.params.iter().map(|p| self.param(p, &vars)).collect()),
            modifiers: modifiers(method.is_static),
            type_parameters: method.type_params.iter().map(TypeParameter::new).collect(),
        }
    }

    fn param(&self, param: &Param, vars: &[String]) -> ParameterInfo {
        let mut ty = self.declared_or_object(param.ty.as_ref(), vars);
        if param.varargs {
            ty = TypeRef::array_of(ty);
        }
        ParameterInfo {
            name: param.name.clone(),
            type_ref: ty,
            is_varargs: param.varargs,
        }
    }
}

impl TypeProvider for ScriptTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types
            .get(fqn)
            .cloned()
            .or_else(|| self.base.get_type_info(fqn))
    }

    fn resolve_type_name(&self, name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        if let Some(fqn) = ctx.known_fqns.iter().find(|f| *f == name) {
            return Some(fqn.clone());
        }
        if !name.contains('.') {
            if let Some(fqn) = ctx.known_fqns.iter().find(|f| simple_name(f) == name) {
                return Some(fqn.clone());
            }
        }
        let fqn = self.base.resolve_type_name(name, ctx)?;
        // imported names are trusted only when something declares them
        (TypeRef::is_primitive_name(&fqn) || self.get_type_info(&fqn).is_some()).then_some(fqn)
    }
}

impl InheritanceProvider for ScriptTypeSystem {
    fn supertypes(&self, fqn: &str) -> Vec<TypeRef> {
        match self.types.get(fqn) {
            Some(info) => info.supertypes().cloned().collect(),
            None => self.base.supertypes(fqn),
        }
    }
}

impl MemberProvider for ScriptTypeSystem {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        match self.members.get(type_fqn) {
            Some(members) => members
                .iter()
                .filter(|m| m.name == member_name)
                .cloned()
                .collect(),
            None => self.base.get_members(type_fqn, member_name),
        }
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        match self.members.get(type_fqn) {
            Some(members) => members.clone(),
            None => self.base.get_all_members(type_fqn),
        }
    }
}

fn modifiers(is_static: bool) -> Vec<String> {
    if is_static {
        vec!["static".to_string()]
    } else {
        Vec::new()
    }
}

/// `java.util.Map.Entry` names the nested type `java.util.Map$Entry`.
fn import_fqn(path: &str) -> String {
    if jdk().contains(path) {
        return path.to_string();
    }
    match path.rsplit_once('.') {
        Some((outer, inner)) if jdk().contains(outer) => format!("{outer}${inner}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::core::type_system::GroovyTypeSystem;
    use crate::parser::parse;

    fn ts(source: &str) -> ScriptTypeSystem {
        ScriptTypeSystem::new(&parse(source), "Script")
    }

    #[test]
    fn test_script_class_extends_groovy_script() {
        let ts = ts("def greet(String name) { 'hi ' + name }\n");
        assert_eq!(ts.script_type(), "Script");
        let greet = ts.find_member_in_hierarchy("Script", "greet");
        assert_eq!(greet.len(), 1);
        assert_eq!(greet[0].params()[0].type_ref, TypeRef::string());
        assert!(!ts.find_member_in_hierarchy("Script", "println").is_empty());
    }

    #[test]
    fn test_declared_classes_resolve_and_inherit() {
        let ts = ts(
            "package p\nimport java.util.regex.Pattern\nclass Base { String name }\nclass Child extends Base implements Runnable { void run() {} }\n",
        );
        assert_eq!(ts.resolve_name("Child").as_deref(), Some("p.Child"));
        assert_eq!(ts.resolve_name("Pattern").as_deref(), Some(names::PATTERN));
        assert!(ts.is_subtype(&TypeRef::id("p.Child"), &TypeRef::id("java.lang.Runnable")));
        let name = ts.find_member_in_hierarchy("p.Child", "name");
        assert_eq!(name[0].declaring_type, "p.Base");
        assert_eq!(ts.script_type(), "p.Script");
    }

    #[test]
    fn test_unresolved_names_are_unknown() {
        let ts = ts("import com.acme.Missing\n");
        let node = TypeNode::simple("Missing", Default::default());
        assert_eq!(ts.resolve_type(&node, &[]), TypeRef::Unknown);
        let var = TypeNode::simple("T", Default::default());
        assert_eq!(ts.resolve_type(&var, &["T".to_string()]), TypeRef::var("T"));
    }

    #[test]
    fn test_static_imports_are_resolved() {
        let ts = ts("import static java.lang.Math.max\n");
        assert_eq!(
            ts.static_imports(),
            &[StaticImport {
                class: "java.lang.Math".to_string(),
                member: Some("max".to_string()),
            }]
        );
    }
}
