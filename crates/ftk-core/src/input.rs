use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Selects a file and, optionally, one page in it: `FILE_ID` or
/// `FILE_ID/PAGE_NAME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigmaInput {
    pub file: String,
    pub page: Option<String>,
}

impl FromStr for FigmaInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (file, page) = match s.split_once('/') {
            Some((file, page)) => (file, Some(page)),
            None => (s, None),
        };

        if file.is_empty() {
            return Err(Error::InvalidInput(format!("Missing file id in '{}'", s)));
        }

        Ok(Self {
            file: file.to_string(),
            page: page.filter(|p| !p.is_empty()).map(String::from),
        })
    }
}

impl fmt::Display for FigmaInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.page {
            Some(page) => write!(f, "{}/{}", self.file, page),
            None => f.write_str(&self.file),
        }
    }
}
