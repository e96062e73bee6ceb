use core::fmt;

/// Errors raised while ingesting or validating request data.
#[derive(Debug)]
pub enum RequestError {
    /// JSON payload could not be decoded.
    Json(serde_json::Error),
    /// Canvas has a zero dimension.
    EmptyCanvas { width: u32, height: u32 },
    /// Grid has zero columns or rows.
    EmptyGrid { columns: u32, rows: u32 },
    /// Grid has more cells than a poster can hold.
    GridTooLarge { columns: u32, rows: u32 },
    /// Theme table payload contained no palettes.
    EmptyThemeTable,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "request json decode failed: {}", err),
            Self::EmptyCanvas { width, height } => {
                write!(f, "canvas has zero area ({}x{})", width, height)
            }
            Self::EmptyGrid { columns, rows } => {
                write!(f, "grid has no cells ({}x{})", columns, rows)
            }
            Self::GridTooLarge { columns, rows } => {
                write!(f, "grid too large ({}x{})", columns, rows)
            }
            Self::EmptyThemeTable => write!(f, "theme table is empty"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
