use groovyscope_core::GroovyscopeConfig;
use groovyscope_groovy::catalog::{
    ClasspathModuleProvider, ExtensionMethod, ExtensionModuleProvider,
};
use groovyscope_groovy::{CatalogBuilder, ExtensionCatalog, ExtensionLoadFailure};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MethodRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Self")]
    self_type: String,
    #[tabled(rename = "Parameters")]
    params: String,
    #[tabled(rename = "Returns")]
    returns: String,
    #[tabled(rename = "Declared by")]
    declaring: String,
    #[tabled(rename = "Static")]
    is_static: bool,
    #[tabled(rename = "Module")]
    module: String,
}

impl MethodRow {
    fn from_method(method: &ExtensionMethod) -> Self {
        let params = method
            .member
            .params()
            .iter()
            .skip(1)
            .map(|p| p.type_ref.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            name: method.name().to_string(),
            self_type: method.self_type.to_string(),
            params,
            returns: method.member.type_ref.to_string(),
            declaring: short_name(method.declaring_type()).to_string(),
            is_static: method.is_static_extension,
            module: method.module.clone(),
        }
    }
}

#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "Module")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Extension classes")]
    classes: String,
    #[tabled(rename = "Static classes")]
    static_classes: String,
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&ExtensionLoadFailure> for FailureRow {
    fn from(failure: &ExtensionLoadFailure) -> Self {
        Self {
            module: failure.module.clone(),
            class: failure.class.clone(),
            reason: failure.reason.clone(),
        }
    }
}

pub fn list_methods(config: &GroovyscopeConfig, name: Option<&str>) -> anyhow::Result<()> {
    let provider = ClasspathModuleProvider::new(config.classpath.clone());
    let catalog = build(&provider, config);

    let rows: Vec<MethodRow> = match name {
        Some(name) => catalog
            .candidates(name)
            .iter()
            .map(MethodRow::from_method)
            .collect(),
        None => catalog.iter().map(MethodRow::from_method).collect(),
    };
    if rows.is_empty() {
        println!("No extension methods found.");
    } else {
        println!("{}", Table::new(rows));
    }
    println!(
        "{} methods from {} classes at Groovy {}",
        catalog.len(),
        catalog.classes().len() + catalog.static_classes().len(),
        catalog.level()
    );
    print_failures(&catalog);
    Ok(())
}

pub fn list_modules(config: &GroovyscopeConfig) -> anyhow::Result<()> {
    let provider = ClasspathModuleProvider::new(config.classpath.clone());
    let modules = provider.modules();
    if modules.is_empty() {
        println!(
            "No extension modules in {} classpath entries.",
            provider.entries().len()
        );
        return Ok(());
    }

    let rows: Vec<ModuleRow> = modules
        .iter()
        .map(|m| ModuleRow {
            name: m.name.clone(),
            version: m.version.clone(),
            classes: m.extension_classes.join("\n"),
            static_classes: m.static_extension_classes.join("\n"),
        })
        .collect();
    println!("{}", Table::new(rows));

    print_failures(&build(&provider, config));
    Ok(())
}

fn build(provider: &dyn ExtensionModuleProvider, config: &GroovyscopeConfig) -> ExtensionCatalog {
    CatalogBuilder::new(config.groovy_level)
        .with_provider(provider)
        .build()
}

fn print_failures(catalog: &ExtensionCatalog) {
    let failures = catalog.load_failures();
    if failures.is_empty() {
        return;
    }
    println!("\nSkipped modules:");
    println!("{}", Table::new(failures.iter().map(FailureRow::from)));
}

fn short_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_row_hides_self_parameter() {
        let catalog = CatalogBuilder::new(Default::default()).build();
        let each = catalog
            .candidates("eachWithIndex")
            .iter()
            .find(|m| m.self_type.to_string().starts_with("java.util.List"))
            .unwrap();
        let row = MethodRow::from_method(each);
        assert_eq!(row.params, "groovy.lang.Closure");
        assert_eq!(row.declaring, "DefaultGroovyMethods");
        assert!(!row.is_static);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("org.codehaus.groovy.runtime.IOGroovyMethods"), "IOGroovyMethods");
        assert_eq!(short_name("Script"), "Script");
    }
}
