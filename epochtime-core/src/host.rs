//! Script host abstraction.
//!
//! A load-testing script runs inside a host that owns its parameters and
//! its error log. The converter only needs two facilities from it: saving
//! a string under a parameter name, and reporting a diagnostic without
//! stopping the script. [`ScriptHost`] captures exactly those two, so the
//! converter can be embedded into any runtime that provides them.
//!
//! [`ParamStore`] is an in-memory host used by tests and by tools that
//! want to inspect what a script would have seen.

use std::collections::HashMap;

use log::trace;

pub trait ScriptHost {
    /// Save `value` under the parameter `param`, replacing any previous value
    fn save_string(&mut self, value: &str, param: &str);

    /// Report a diagnostic; control flow of the caller is not affected
    fn error_message(&mut self, message: &str);
}

// RUST CONCEPT: Blanket impl so `&mut H` can be passed where `H` is expected
impl<H: ScriptHost + ?Sized> ScriptHost for &mut H {
    fn save_string(&mut self, value: &str, param: &str) {
        (**self).save_string(value, param)
    }

    fn error_message(&mut self, message: &str) {
        (**self).error_message(message)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParamStore {
    params: HashMap<String, String>,
    errors: Vec<String>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, param: &str) -> Option<&str> {
        self.params.get(param).map(String::as_str)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Substitute `{param}` references with saved values.
    ///
    /// References to parameters that were never saved, and braces that do
    /// not close, are copied through unchanged.
    pub fn eval_string(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];

            match after_open.find('}') {
                Some(close) => {
                    let name = &after_open[..close];
                    match self.get(name) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push('{');
                            result.push_str(name);
                            result.push('}');
                        }
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    result.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }
}

impl ScriptHost for ParamStore {
    fn save_string(&mut self, value: &str, param: &str) {
        trace!("param {} = {}", param, value);
        self.params.insert(param.to_string(), value.to_string());
    }

    fn error_message(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
