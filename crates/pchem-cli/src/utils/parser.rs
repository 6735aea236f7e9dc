use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    MissingAssignment(String),

    #[error("Invalid configuration key '{0}'. Expected 'section.key' (e.g., 'grid.step').")]
    InvalidKeyFormat(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// A parsed `section.key=value` override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValue<'a> {
    pub section: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

impl SetValue<'_> {
    pub fn path(&self) -> String {
        format!("{}.{}", self.section, self.key)
    }
}

pub fn parse_set_value(input: &str) -> Result<SetValue<'_>, ParseError> {
    let (path, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::MissingAssignment(input.to_string()))?;
    let (section, key) = path
        .split_once('.')
        .ok_or_else(|| ParseError::InvalidKeyFormat(path.trim().to_string()))?;

    let (section, key, value) = (section.trim(), key.trim(), value.trim());
    for (component, text) in [("section", section), ("key", key), ("value", value)] {
        if text.is_empty() {
            return Err(ParseError::EmptyComponent {
                component,
                input: input.to_string(),
            });
        }
    }

    Ok(SetValue {
        section,
        key,
        value,
    })
}
