//! Display status derived from an indicação's identifier.
//!
//! The identifier's trailing `/<year>` segment decides the status: the
//! current calendar year means the request is still active, a past year
//! means it was archived, and anything unparsable (missing slash,
//! non-numeric, future year) falls back to pending.

use chrono::{Datelike, Local};
use strum_macros::{AsRefStr, Display, EnumString};

/// Display status of an indicação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum IndicationStatus {
    /// Filed in the current calendar year.
    Ativo,
    /// Filed in a past year.
    Arquivado,
    /// Year segment missing, non-numeric, or in the future.
    Pendente,
}

impl IndicationStatus {
    /// Derives the status from an identifier, using the current local
    /// calendar year.
    #[must_use]
    pub fn from_numero(numero: &str) -> Self {
        Self::from_numero_in_year(numero, Local::now().year())
    }

    /// Derives the status from an identifier against an explicit current
    /// year. Never fails: malformed input yields [`Self::Pendente`].
    #[must_use]
    pub fn from_numero_in_year(numero: &str, current_year: i32) -> Self {
        let Some((_, suffix)) = numero.rsplit_once('/') else {
            return Self::Pendente;
        };
        match suffix.trim().parse::<i32>() {
            Ok(year) if year == current_year => Self::Ativo,
            Ok(year) if year < current_year => Self::Arquivado,
            _ => Self::Pendente,
        }
    }

    /// CSS class for the status marker shown next to the identifier.
    #[must_use]
    pub const fn color_class(self) -> &'static str {
        match self {
            Self::Ativo => "bg-green-500",
            Self::Arquivado => "bg-gray-500",
            Self::Pendente => "bg-yellow-500",
        }
    }
}
