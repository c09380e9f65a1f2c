mod path_template;
mod problem;
mod rules;
mod validator;

pub use path_template::{missing_path_parameters, template_parameters, MissingParameter};
pub use problem::{Severity, ValidationProblem};
pub use rules::{RuleRegistry, ValidationRule};
pub use validator::{find_problems, validate_document, ValidationOptions};
