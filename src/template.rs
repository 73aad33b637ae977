//! Thin wrapper around the minijinja template engine.

use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::error::AppError;
use crate::vars::VarMap;

/// Template renderer with strict variable lookup.
///
/// Rendering is a pure function of the template source and the variable
/// mapping. Undefined references fail instead of substituting an empty
/// string, so a typo in a template surfaces before anything is written.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Render a template source string against the variable mapping.
    ///
    /// `name` is only used for error reporting.
    pub fn render(&self, name: &str, source: &str, vars: &VarMap) -> Result<String, AppError> {
        self.env.render_str(source, vars).map_err(|e| {
            if matches!(e.kind(), ErrorKind::UndefinedError) {
                AppError::UndefinedVariable {
                    name: name.to_string(),
                    source: e,
                }
            } else {
                AppError::TemplateSyntax {
                    name: name.to_string(),
                    source: e,
                }
            }
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
