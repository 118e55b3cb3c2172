//! Transpiler options
//!
//! Everything about the C side that is fixed by the runtime support library:
//! the header to include, the word-sized value type, the prefix applied to
//! every Blaest function, and the functions the runtime already provides.

/// Functions defined by the default `bglue.c`
pub const DEFAULT_RUNTIME_FUNCTIONS: &[&str] = &["puts"];

/// Options controlling emission and the initial symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct TranspileOptions {
    /// File named by the leading `#include`
    pub runtime_header: String,
    /// C type used for every value
    pub word_type: String,
    /// Prefix for function names, keeping them apart from C library symbols
    pub mangle_prefix: String,
    /// Functions callable without a Blaest definition
    pub runtime_functions: Vec<String>,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            runtime_header: "bglue.c".to_string(),
            word_type: "bword_t".to_string(),
            mangle_prefix: "B_".to_string(),
            runtime_functions: DEFAULT_RUNTIME_FUNCTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TranspileOptions {
    /// Add runtime functions on top of the defaults, skipping repeats
    pub fn with_runtime_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.runtime_functions.contains(&name) {
                self.runtime_functions.push(name);
            }
        }
        self
    }

    pub fn with_runtime_header(mut self, header: impl Into<String>) -> Self {
        self.runtime_header = header.into();
        self
    }

    /// Mangled C name of a Blaest function
    pub fn mangle(&self, name: &str) -> String {
        format!("{}{}", self.mangle_prefix, name)
    }
}
