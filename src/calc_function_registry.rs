use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::calc_types::CalcError;

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: &'static str,
    pub implementation: fn(f64) -> Result<f64, CalcError>,
}

/// The closed whitelist of unary math functions reachable from scientific
/// expressions. Nothing outside this registry can ever be called by the
/// evaluator; the safe literal path runs with an empty registry.
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let mut registry = FunctionRegistry {
            functions: HashMap::new(),
        };

        registry.register_math_functions();

        registry
    }

    /// A registry with no callable bindings.
    pub fn empty() -> Self {
        FunctionRegistry {
            functions: HashMap::new(),
        }
    }

    fn register_math_functions(&mut self) {
        // SIN function
        self.functions.insert("sin", FunctionDef {
            name: "sin",
            implementation: |value| Ok(value.sin()),
        });

        // COS function
        self.functions.insert("cos", FunctionDef {
            name: "cos",
            implementation: |value| Ok(value.cos()),
        });

        // TAN function
        self.functions.insert("tan", FunctionDef {
            name: "tan",
            implementation: |value| Ok(value.tan()),
        });

        // LOG function, base 10
        self.functions.insert("log", FunctionDef {
            name: "log",
            implementation: |value| {
                if value <= 0.0 {
                    return Err(CalcError::evaluation("math domain error: log"));
                }
                Ok(value.log10())
            },
        });

        // SQRT function
        self.functions.insert("sqrt", FunctionDef {
            name: "sqrt",
            implementation: |value| {
                if value < 0.0 {
                    return Err(CalcError::evaluation("math domain error: sqrt"));
                }
                Ok(value.sqrt())
            },
        });

        // EXP function
        self.functions.insert("exp", FunctionDef {
            name: "exp",
            implementation: |value| Ok(value.exp()),
        });
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn call_function(&self, name: &str, arg: f64) -> Result<f64, CalcError> {
        match self.functions.get(name) {
            Some(def) => (def.implementation)(arg),
            None => Err(CalcError::evaluation(format!("Unknown function: {}", name))),
        }
    }

    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        FunctionRegistry::new()
    }
}

lazy_static! {
    pub static ref MATH_FUNCTIONS: FunctionRegistry = FunctionRegistry::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt() {
        assert_eq!(MATH_FUNCTIONS.call_function("sqrt", 16.0).unwrap(), 4.0);
    }

    #[test]
    fn test_sqrt_negative_is_domain_error() {
        let result = MATH_FUNCTIONS.call_function("sqrt", -1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_is_base_10() {
        assert_eq!(MATH_FUNCTIONS.call_function("log", 100.0).unwrap(), 2.0);
        assert_eq!(MATH_FUNCTIONS.call_function("log", 1000.0).unwrap(), 3.0);
    }

    #[test]
    fn test_log_non_positive_is_domain_error() {
        assert!(MATH_FUNCTIONS.call_function("log", 0.0).is_err());
        assert!(MATH_FUNCTIONS.call_function("log", -5.0).is_err());
    }

    #[test]
    fn test_trig() {
        assert_eq!(MATH_FUNCTIONS.call_function("sin", 0.0).unwrap(), 0.0);
        assert_eq!(MATH_FUNCTIONS.call_function("cos", 0.0).unwrap(), 1.0);
        assert_eq!(MATH_FUNCTIONS.call_function("tan", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_exp() {
        assert_eq!(MATH_FUNCTIONS.call_function("exp", 0.0).unwrap(), 1.0);
        assert!((MATH_FUNCTIONS.call_function("exp", 1.0).unwrap() - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_function() {
        assert!(MATH_FUNCTIONS.call_function("cbrt", 8.0).is_err());
    }

    #[test]
    fn test_empty_registry_has_no_bindings() {
        let registry = FunctionRegistry::empty();
        assert!(registry.function_names().is_empty());
        assert!(registry.call_function("sqrt", 16.0).is_err());
    }

    #[test]
    fn test_whitelist_is_closed() {
        assert_eq!(
            MATH_FUNCTIONS.function_names(),
            vec!["cos", "exp", "log", "sin", "sqrt", "tan"]
        );
    }
}
