// Script host backed by stdout/stderr, keeping saved parameters in memory

use epochtime_core::{ParamStore, ScriptHost};

pub struct StdioHost {
    store: ParamStore,
}

impl StdioHost {
    pub fn new() -> Self {
        StdioHost {
            store: ParamStore::new(),
        }
    }

    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    pub fn has_errors(&self) -> bool {
        !self.store.errors().is_empty()
    }
}

impl ScriptHost for StdioHost {
    fn save_string(&mut self, value: &str, param: &str) {
        println!("{} = {}", param, value);
        self.store.save_string(value, param);
    }

    fn error_message(&mut self, message: &str) {
        eprintln!("Error: {}", message.trim_end());
        self.store.error_message(message);
    }
}
