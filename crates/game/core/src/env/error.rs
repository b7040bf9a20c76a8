//! Static data errors.
//!
//! These are detected while assembling catalogs at startup. Any of them means
//! the data is malformed and no encounter may start.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate ability id '{0}'")]
    DuplicateAbility(String),

    #[error("duplicate actor template id '{0}'")]
    DuplicateTemplate(String),

    #[error("duplicate item id '{0}'")]
    DuplicateItem(String),

    #[error("duplicate zone id '{0}'")]
    DuplicateZone(String),

    #[error("zone '{zone}' names unknown boss template '{boss}'")]
    UnknownBoss { zone: String, boss: String },

    #[error("zone '{zone}' lists unknown enemy template '{template}'")]
    UnknownZoneEnemy { zone: String, template: String },

    #[error("ability '{ability}' summons unknown template '{template}'")]
    UnknownSummon { ability: String, template: String },

    #[error("{owner}: {field} must lie in [0, 1], got {value}")]
    OutOfRange {
        owner: String,
        field: &'static str,
        value: String,
    },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            DuplicateAbility(_) => "CATALOG_DUPLICATE_ABILITY",
            DuplicateTemplate(_) => "CATALOG_DUPLICATE_TEMPLATE",
            DuplicateItem(_) => "CATALOG_DUPLICATE_ITEM",
            DuplicateZone(_) => "CATALOG_DUPLICATE_ZONE",
            UnknownBoss { .. } => "CATALOG_UNKNOWN_BOSS",
            UnknownZoneEnemy { .. } => "CATALOG_UNKNOWN_ZONE_ENEMY",
            UnknownSummon { .. } => "CATALOG_UNKNOWN_SUMMON",
            OutOfRange { .. } => "CATALOG_OUT_OF_RANGE",
        }
    }
}
