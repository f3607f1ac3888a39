pub mod calculator;
pub mod catalog;
pub mod data_structures;
pub mod error;
pub mod export;
pub mod import;
pub mod input;
pub mod store;

pub use calculator::Calculator;
pub use catalog::{message_type_id, sanitize, Catalog, CatalogStage};
pub use data_structures::{
    Channel, ChannelCredits, ChannelFilters, ChannelKind, Channels, CreditRates, CreditTotals,
    Frequency, JourneyStage, MessageType, MessageTypeUpdate,
};
pub use error::{ImportError, ParseValueError};
pub use export::{render_report, ReportKind, ReportOptions};
pub use input::{coerce_audience, coerce_rate};
pub use store::{exclusive_expansion, CalculatorStore, ImportSummary};

pub use anyhow::Result;
pub use chrono::{DateTime, Utc};

pub mod prelude {
    pub use crate::data_structures::{
        ChannelFilters, ChannelKind, CreditRates, Frequency, MessageTypeUpdate,
    };
    pub use crate::export::{ReportKind, ReportOptions};
    pub use crate::store::CalculatorStore;
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
}
