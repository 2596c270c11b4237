use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::ast::{Module, ModulePart, RawBinder, UniqueBinder};

use super::error::ScopeError;

/// Every definition and module of a source file by fully qualified path.
///
/// This is the first resolution pass: it allocates the one [`UniqueBinder`]
/// each definition will carry for the rest of the pipeline.
#[derive(Debug, Default)]
pub struct Definitions {
    binders: HashMap<Vec<String>, UniqueBinder>,
    modules: HashSet<Vec<String>>,
}

impl Definitions {
    pub fn collect(module: &Module<RawBinder>) -> Result<Self, ScopeError> {
        let mut definitions = Self::default();
        definitions.walk(module, &[])?;
        Ok(definitions)
    }

    fn walk(&mut self, module: &Module<RawBinder>, parent: &[String]) -> Result<(), ScopeError> {
        let path = qualify(parent, &module.name);
        self.modules.insert(path.clone());

        for part in &module.parts {
            match part {
                ModulePart::Module(inner) => self.walk(inner, &path)?,
                ModulePart::Definition { name, .. } => {
                    let qualified = qualify(&path, name);
                    if self.binders.contains_key(&qualified) {
                        return Err(ScopeError::DuplicateDefinition {
                            name: qualified.join("."),
                        });
                    }
                    trace!(name = %qualified.join("."), "collected definition");
                    let binder = UniqueBinder::new(qualified.clone());
                    self.binders.insert(qualified, binder);
                }
                ModulePart::Fixity(_) | ModulePart::TypeDefinition { .. } | ModulePart::Import(_) => {}
            }
        }
        Ok(())
    }

    pub fn binder(&self, path: &[String]) -> Option<&UniqueBinder> {
        self.binders.get(path)
    }

    pub fn has_module(&self, path: &[String]) -> bool {
        self.modules.contains(path)
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

/// `parent` extended by `name`.
pub fn qualify(parent: &[String], name: &str) -> Vec<String> {
    let mut path = parent.to_vec();
    path.push(name.to_string());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Literal};

    fn definition(name: &str) -> ModulePart<RawBinder> {
        ModulePart::Definition {
            name: name.to_string(),
            expr: Expr::Literal(Literal::Int(0)),
        }
    }

    fn path(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_collects_nested_definitions() {
        let module = Module::new(
            "Main",
            vec![
                definition("a"),
                ModulePart::Module(Module::new("Inner", vec![definition("a")])),
            ],
        );
        let definitions = Definitions::collect(&module).unwrap();
        assert_eq!(definitions.len(), 2);
        assert!(definitions.has_module(&path(&["Main", "Inner"])));
        assert_ne!(
            definitions.binder(&path(&["Main", "a"])),
            definitions.binder(&path(&["Main", "Inner", "a"]))
        );
    }

    #[test]
    fn test_duplicate_definition() {
        let module = Module::new("Main", vec![definition("a"), definition("a")]);
        assert_eq!(
            Definitions::collect(&module).unwrap_err(),
            ScopeError::DuplicateDefinition {
                name: "Main.a".to_string()
            }
        );
    }
}
