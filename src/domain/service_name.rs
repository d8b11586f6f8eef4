use crate::domain::validation_error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn parse(name: String) -> Result<ServiceName, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidServiceName);
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
