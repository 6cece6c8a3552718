/// Main error type for the library.
#[derive(Debug)]
pub enum D3dError {
    /// Used when the user passes a logically invalid parameter to a function.
    InvalidParameter(String),
    /// Used when the requested configuration selects functionality that has
    /// no implementation. Runs must stop instead of computing a wrong result.
    Unsupported(String),
    Io(std::io::Error),
    Parser(String),
}

impl std::fmt::Display for D3dError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            D3dError::InvalidParameter(err) => write!(f, "Parameter error: {}", err),
            D3dError::Unsupported(err) => write!(f, "Unsupported: {}", err),
            D3dError::Io(err) => write!(f, "IO error: {}", err),
            D3dError::Parser(err) => write!(f, "Parser error: {}", err),
        }
    }
}

impl D3dError {
    /// Create an error with the kind `InvalidParameter`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_parameter<T: ToString>(msg: T) -> Self {
        D3dError::InvalidParameter(msg.to_string())
    }

    /// Create an error with the kind `Unsupported`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn unsupported<T: ToString>(msg: T) -> Self {
        D3dError::Unsupported(msg.to_string())
    }
}

impl From<std::io::Error> for D3dError {
    fn from(err: std::io::Error) -> Self {
        D3dError::Io(err)
    }
}

impl std::error::Error for D3dError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            D3dError::Io(err) => Some(err),
            D3dError::InvalidParameter(_) => None,
            D3dError::Unsupported(_) => None,
            D3dError::Parser(_) => None,
        }
    }
}
