use crate::error::{CodegenError, CodegenResult};
use regex::Regex;
use std::sync::OnceLock;

/// Configuration options for code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Java package of the generated interfaces; beans go in `{package}.beans`
    pub package_name: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            package_name: "org.example.api".to_string(),
        }
    }
}

fn package_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
            .expect("package name pattern compiles")
    })
}

impl CodegenOptions {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }

    /// Package name must be dot-separated Java identifiers
    pub fn validate(&self) -> CodegenResult<()> {
        if package_pattern().is_match(&self.package_name) {
            Ok(())
        } else {
            Err(CodegenError::InvalidPackageName(self.package_name.clone()))
        }
    }

    pub fn beans_package(&self) -> String {
        format!("{}.beans", self.package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_names() {
        assert!(CodegenOptions::default().validate().is_ok());
        assert!(CodegenOptions::new("io.apicurio.$gen_2").validate().is_ok());
        for bad in ["", "org..api", "org.api.", "9lives", "org.my-api"] {
            assert_eq!(
                CodegenOptions::new(bad).validate(),
                Err(CodegenError::InvalidPackageName(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_beans_package() {
        assert_eq!(CodegenOptions::new("org.pets").beans_package(), "org.pets.beans");
    }
}
