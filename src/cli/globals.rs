use secrecy::SecretString;

/// Read-only process-wide configuration threaded through the request
/// handling chain as an explicit dependency.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub jwt_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(jwt_secret: SecretString) -> Self {
        Self { jwt_secret }
    }
}
